// src/history/mod.rs

//! Commit history retrieval.
//!
//! Both strategies return a [`CommitSet`] whose iteration order is the
//! order in which commits were discovered: git's native `log` order for
//! [`Strategy::Log`], branch-by-branch first-parent order for
//! [`Strategy::Walk`].

pub mod log;
pub mod walker;

use crate::cutoff::Cutoff;
use crate::model::CommitSet;
use std::path::Path;
use std::time::Duration;

/// How commit history is retrieved
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Ask `git log` for ids, subjects and touched paths
    #[default]
    Log,
    /// Walk every local branch through libgit2, keeping all parent links
    Walk,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub strategy: Strategy,
    /// Query every ref instead of HEAD only (log strategy)
    pub all_refs: bool,
    /// Upper bound for the `git log` subprocess
    pub timeout: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            all_refs: false,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Returns the commits of `repo` made strictly before `cutoff`.
///
/// Retrieval failures are logged and produce an empty set; callers treat
/// an empty set as "nothing to render".
pub fn commits_before(repo: &Path, cutoff: &Cutoff, options: &ExtractOptions) -> CommitSet {
    let result = match options.strategy {
        Strategy::Log => log::query(repo, cutoff, options.all_refs, options.timeout),
        Strategy::Walk => walker::walk_branches(repo, cutoff),
    };

    match result {
        Ok(commits) => {
            tracing::info!(
                strategy = ?options.strategy,
                count = commits.len(),
                "extracted commit history"
            );
            commits
        }
        Err(e) => {
            tracing::error!(strategy = ?options.strategy, "history query failed: {e}");
            CommitSet::new()
        }
    }
}
