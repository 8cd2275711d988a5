// src/history/walker.rs

//! Branch-walking strategy.
//!
//! Every local branch head is followed down its first-parent chain through
//! libgit2 object lookups. Unlike `git log` this keeps every parent of an
//! accepted commit and records which branch reached it first, at the cost
//! of reading objects one at a time.

use crate::cutoff::Cutoff;
use crate::error::Result;
use crate::model::{CommitRecord, CommitSet};
use git2::{BranchType, Commit, Oid, Repository};
use indicatif::ProgressBar;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

pub fn walk_branches(repo_path: &Path, cutoff: &Cutoff) -> Result<CommitSet> {
    let repo = Repository::open(repo_path)?;
    let heads = branch_heads(&repo)?;
    tracing::debug!(branches = heads.len(), "walking branch heads");

    let bar = ProgressBar::new_spinner();
    bar.set_message("Walking branches");

    let mut commits = CommitSet::new();
    // Includes commits rejected by the cutoff, so shared history is walked once.
    let mut visited: HashSet<Oid> = HashSet::new();

    for (branch, head) in &heads {
        let mut next = Some(*head);

        while let Some(oid) = next {
            if !visited.insert(oid) {
                break;
            }

            let commit = match repo.find_commit(oid) {
                Ok(commit) => commit,
                Err(e) => {
                    tracing::warn!(%branch, %oid, "commit object unreadable, truncating branch: {e}");
                    break;
                }
            };
            next = commit.parent_id(0).ok();

            if cutoff.excludes(commit.time().seconds()) {
                continue;
            }

            commits.insert(record_from_commit(&repo, &commit, branch));
            bar.inc(1);
        }
    }

    bar.finish_with_message(format!("Walked {} commits", commits.len()));
    Ok(commits)
}

/// Local branches with their target commit, sorted by name.
fn branch_heads(repo: &Repository) -> Result<Vec<(String, Oid)>> {
    let mut heads = Vec::new();

    for item in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = item?;
        let Some(name) = branch.name()?.map(String::from) else {
            tracing::warn!("skipping branch with non UTF-8 name");
            continue;
        };
        match branch.get().resolve().ok().and_then(|r| r.target()) {
            Some(oid) => heads.push((name, oid)),
            None => tracing::warn!(branch = %name, "branch does not resolve to a commit"),
        }
    }

    heads.sort();
    Ok(heads)
}

fn record_from_commit(repo: &Repository, commit: &Commit, branch: &str) -> CommitRecord {
    let summary = String::from_utf8_lossy(commit.summary_bytes().unwrap_or_default()).into_owned();

    let changed_files = changed_files(repo, commit).unwrap_or_else(|e| {
        tracing::warn!(oid = %commit.id(), "could not diff commit: {e}");
        BTreeSet::new()
    });

    CommitRecord {
        id: commit.id().to_string(),
        message: summary,
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        changed_files,
        timestamp: Some(commit.time().seconds()),
        branch: Some(branch.to_string()),
    }
}

/// Paths touched relative to the first parent, or every path for a root commit.
fn changed_files(repo: &Repository, commit: &Commit) -> std::result::Result<BTreeSet<String>, git2::Error> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

    Ok(diff
        .deltas()
        .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
        .map(|path| path.to_string_lossy().into_owned())
        .collect())
}
