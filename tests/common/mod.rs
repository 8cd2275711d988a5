//! Shared helpers for integration tests.
//!
//! Each integration test file is its own crate, so not every helper is
//! used everywhere.

#![allow(dead_code)]

pub mod test_repo;

pub use test_repo::TestRepo;

use std::process::Command;

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Returns early from a test when `git` is not installed.
macro_rules! skip_if_no_git {
    () => {
        if !common::git_available() {
            eprintln!("git not found, skipping test");
            return;
        }
    };
}
