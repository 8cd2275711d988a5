// src/history/log.rs

//! Delegating strategy: `git log` does the walking, we parse its text.
//!
//! Output contract, one block per commit separated by a blank line:
//!
//! ```text
//! <id> <subject>
//! <path>
//! <path>
//! ```
//!
//! git omits the separating blank line after a commit with no file list
//! (merges, empty commits), so a line starting with a full object id also
//! opens a new block.

use crate::cutoff::Cutoff;
use crate::error::Result;
use crate::model::{CommitRecord, CommitSet};
use crate::process::run_with_timeout;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

pub const GIT_COMMAND: &str = "git";

/// Header line of each block: full hash, a space, the subject.
///
/// `format:` rather than `tformat:`, which would put a blank line between
/// the header and its paths.
pub const LOG_FORMAT: &str = "--pretty=format:%H %s";

pub fn query(repo: &Path, cutoff: &Cutoff, all_refs: bool, timeout: Duration) -> Result<CommitSet> {
    let mut cmd = Command::new(GIT_COMMAND);
    cmd.arg("-C")
        .arg(repo)
        // Keep non-ASCII paths verbatim instead of octal-escaped and quoted.
        .args(["-c", "core.quotepath=off", "log", "--no-color"])
        .arg(format!("--before={}", cutoff.git_before()))
        .args([LOG_FORMAT, "--name-only"]);
    if all_refs {
        cmd.arg("--all");
    }

    let output = run_with_timeout(cmd, timeout)?;
    Ok(parse_log(&output.stdout))
}

/// Parses `git log --pretty='format:%H %s' --name-only` output, keeping git's order.
pub fn parse_log(output: &str) -> CommitSet {
    let mut commits = CommitSet::new();
    let mut block: Vec<&str> = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            flush_block(&mut block, &mut commits);
            continue;
        }
        if !block.is_empty() && starts_with_object_id(line) {
            flush_block(&mut block, &mut commits);
        }
        block.push(line);
    }
    flush_block(&mut block, &mut commits);

    commits
}

fn flush_block(block: &mut Vec<&str>, commits: &mut CommitSet) {
    if block.is_empty() {
        return;
    }
    match parse_block(block) {
        Some(record) => {
            let id = record.id.clone();
            if !commits.insert(record) {
                tracing::debug!(%id, "duplicate commit in log output, keeping first");
            }
        }
        None => tracing::warn!(header = block[0], "skipping malformed log block"),
    }
    block.clear();
}

/// SHA-1 or SHA-256 hex id as printed by `%H`.
fn starts_with_object_id(line: &str) -> bool {
    let token = line.split(char::is_whitespace).next().unwrap_or_default();
    matches!(token.len(), 40 | 64) && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn parse_block(lines: &[&str]) -> Option<CommitRecord> {
    let (header, paths) = lines.split_first()?;
    let header = header.trim();
    if header.is_empty() {
        return None;
    }

    let (id, subject) = match header.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, rest.trim()),
        None => (header, ""),
    };

    let files = paths.iter().map(|p| p.trim()).filter(|p| !p.is_empty());
    Some(CommitRecord::new(id, subject).with_files(files))
}
