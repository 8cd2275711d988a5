// src/lib.rs

//! Renders a repository's commit history as a Mermaid dependency diagram.
//!
//! - [`history`]: commit retrieval, via `git log` or a libgit2 branch walk
//! - [`encoder`]: Mermaid flowchart text from the retrieved commits
//! - [`render`]: diagram file output and the external renderer

pub mod cli;
pub mod cutoff;
pub mod encoder;
pub mod error;
pub mod history;
pub mod model;
pub mod process;
pub mod render;
