// src/cli.rs

use crate::encoder::{DanglingPolicy, EncodeOptions, Layout};
use crate::history::{ExtractOptions, Strategy};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Commit dependency graph visualizer", long_about = None)]
pub struct Args {
    /// Path to the graph visualization program (Mermaid CLI)
    #[arg(long)]
    pub viz: PathBuf,

    /// Path to the git repository to analyze
    #[arg(long)]
    pub repo: PathBuf,

    /// Include commits before this date (YYYY-MM-DD, YYYY-MM-DD HH:MM[:SS] or RFC 3339)
    #[arg(long)]
    pub date: String,

    /// How commit history is retrieved
    #[arg(long, value_enum, default_value_t = Strategy::Log)]
    pub strategy: Strategy,

    /// Graph layout [default: linear for log, branches for walk]
    #[arg(long, value_enum)]
    pub layout: Option<Layout>,

    /// Handling of edges to parents outside the cutoff window
    #[arg(long, value_enum, default_value_t = DanglingPolicy::Drop)]
    pub dangling: DanglingPolicy,

    /// Query all refs instead of HEAD (log strategy only)
    #[arg(long)]
    pub all: bool,

    /// Directory receiving graph.mmd and graph.png
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seconds to wait for git and the renderer before giving up
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Do not open the rendered image
    #[arg(long)]
    pub no_open: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn layout(&self) -> Layout {
        self.layout.unwrap_or(match self.strategy {
            Strategy::Log => Layout::Linear,
            Strategy::Walk => Layout::Branches,
        })
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            strategy: self.strategy,
            all_refs: self.all,
            timeout: self.timeout(),
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            layout: self.layout(),
            dangling: self.dangling,
        }
    }

    /// Default tracing filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// The renderer as an existing file, or a bare program name found on `PATH`.
    pub fn renderer(&self) -> Option<PathBuf> {
        resolve_program(&self.viz)
    }
}

fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.is_file() {
        return Some(program.to_path_buf());
    }
    if program.components().count() == 1 {
        return which::which(program).ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(extra: &[&str]) -> Args {
        let base = ["git-lineage", "--viz", "mmdc", "--repo", ".", "--date", "2024-12-01"];
        Args::try_parse_from(base.iter().chain(extra)).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.strategy, Strategy::Log);
        assert_eq!(args.layout(), Layout::Linear);
        assert_eq!(args.dangling, DanglingPolicy::Drop);
        assert_eq!(args.timeout(), Duration::from_secs(120));
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.log_level(), "warn");
        assert!(!args.all);
        assert!(!args.no_open);
    }

    #[test]
    fn walk_defaults_to_branch_layout() {
        let args = parse(&["--strategy", "walk"]);
        assert_eq!(args.layout(), Layout::Branches);

        let args = parse(&["--strategy", "walk", "--layout", "linear"]);
        assert_eq!(args.layout(), Layout::Linear);
    }

    #[test]
    fn options_carry_flags() {
        let args = parse(&["--all", "--timeout", "5", "--dangling", "stub", "-vv"]);
        let extract = args.extract_options();
        assert!(extract.all_refs);
        assert_eq!(extract.timeout, Duration::from_secs(5));
        assert_eq!(args.encode_options().dangling, DanglingPolicy::Stub);
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn required_arguments() {
        assert!(Args::try_parse_from(["git-lineage", "--repo", ".", "--date", "2024-01-01"]).is_err());
        assert!(Args::try_parse_from(["git-lineage", "--viz", "x", "--date", "2024-01-01"]).is_err());
        assert!(Args::try_parse_from(["git-lineage", "--viz", "x", "--repo", "."]).is_err());
    }

    #[test]
    fn missing_renderer_path_is_not_resolved() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(resolve_program(&dir.path().join("no-such-mmdc")), None);
    }

    #[test]
    fn existing_file_is_resolved_as_is() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(resolve_program(file.path()), Some(file.path().to_path_buf()));
    }
}
