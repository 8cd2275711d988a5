//! Temporary git repository driven through the `git` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway repository with deterministic identity and dates.
///
/// Removed when dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initializes an empty repository whose unborn HEAD is `main`.
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Runs git with a fixed identity, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        self.git_at(args, None)
    }

    /// Like [`git`](Self::git) with author and committer dates pinned to `date`.
    pub fn git_at(&self, args: &[&str], date: Option<&str>) -> String {
        let mut cmd = Command::new("git");
        cmd.args([
            "-c",
            "user.name=Tester",
            "-c",
            "user.email=tester@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(self.dir.path())
        .env("GIT_CONFIG_NOSYSTEM", "1");
        if let Some(date) = date {
            cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
        }

        let output = cmd.output().expect("Failed to execute git");
        if !output.status.success() {
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(full, content).expect("Failed to write file");
    }

    /// Writes `files`, commits everything at `date` and returns the new commit id.
    pub fn commit_at(&self, message: &str, date: &str, files: &[(&str, &str)]) -> String {
        for (path, content) in files {
            self.write_file(path, content);
        }
        self.git(&["add", "-A"]);
        self.git_at(&["commit", "-q", "--allow-empty", "-m", message], Some(date));
        self.head()
    }

    /// Merges `branch` into the current branch with a merge commit at `date`.
    pub fn merge_at(&self, branch: &str, message: &str, date: &str) -> String {
        self.git_at(&["merge", "-q", "--no-ff", "--no-edit", "-m", message, branch], Some(date));
        self.head()
    }

    pub fn create_branch(&self, name: &str) {
        self.git(&["checkout", "-q", "-b", name]);
    }

    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", "-q", name]);
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.dir.path().join(path).exists()
    }
}
