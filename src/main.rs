// src/main.rs

use clap::Parser;
use git_lineage::cli::Args;
use git_lineage::cutoff::Cutoff;
use git_lineage::error::LineageError;
use git_lineage::render::{DIAGRAM_FILE, IMAGE_FILE};
use git_lineage::{encoder, history, render};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const EXIT_RENDER_FAILED: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level());
    let start_time = Instant::now();

    let Some(renderer) = args.renderer() else {
        eprintln!("{}", LineageError::RendererNotFound(args.viz.clone()));
        return ExitCode::from(EXIT_BAD_INPUT);
    };

    if !args.repo.exists() {
        eprintln!("{}", LineageError::RepositoryNotFound(args.repo.clone()));
        return ExitCode::from(EXIT_BAD_INPUT);
    }

    let cutoff = match Cutoff::parse(&args.date) {
        Ok(cutoff) => cutoff,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_BAD_INPUT);
        }
    };

    let commits = history::commits_before(&args.repo, &cutoff, &args.extract_options());
    if commits.is_empty() {
        println!("No commits found before {}.", args.date);
        return ExitCode::SUCCESS;
    }
    println!(
        "Found {} commits before {} in {:.2?}.",
        commits.len(),
        cutoff.instant().to_rfc2822(),
        start_time.elapsed()
    );

    let diagram = encoder::encode(&commits, &args.encode_options());
    let diagram_path = args.output_dir.join(DIAGRAM_FILE);
    if let Err(e) = render::write_diagram(&diagram, &diagram_path) {
        eprintln!("Error writing {}: {e}", diagram_path.display());
        return ExitCode::from(EXIT_RENDER_FAILED);
    }

    let image_path = args.output_dir.join(IMAGE_FILE);
    if let Err(e) = render::run_renderer(&renderer, &diagram_path, &image_path, args.timeout()) {
        eprintln!("Error generating graph image: {e}");
        return ExitCode::from(EXIT_RENDER_FAILED);
    }

    println!("Graph saved to {}.", image_path.display());
    if !args.no_open {
        render::open_image(&image_path);
    }

    println!("Total time: {:.2?}", start_time.elapsed());
    ExitCode::SUCCESS
}

/// `RUST_LOG` wins over the `-v` derived default.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
