// src/error.rs

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while extracting, encoding or rendering commit history
#[derive(Error, Debug)]
pub enum LineageError {
    #[error("Invalid date {input:?}: expected YYYY-MM-DD, YYYY-MM-DD HH:MM[:SS] or RFC 3339")]
    InvalidDate { input: String },

    #[error("Repository {0} not found")]
    RepositoryNotFound(PathBuf),

    #[error("Visualization program {0} not found")]
    RendererNotFound(PathBuf),

    #[error("{program} exited with code {exit_code}: {stderr}")]
    CommandFailed {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LineageError>;
