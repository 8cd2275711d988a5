// src/render.rs

use crate::error::Result;
use crate::process::run_with_timeout;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Mermaid source written on every run
pub const DIAGRAM_FILE: &str = "graph.mmd";

/// Image produced by the renderer
pub const IMAGE_FILE: &str = "graph.png";

/// Writes the diagram as UTF-8, replacing `path` only once the content is on disk.
pub fn write_diagram(diagram: &str, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(diagram.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), bytes = diagram.len(), "wrote diagram");
    Ok(())
}

/// Runs `<tool> -i <input> -o <output>`; the exit status is the only signal.
pub fn run_renderer(tool: &Path, input: &Path, output: &Path, timeout: Duration) -> Result<()> {
    let mut cmd = Command::new(tool);
    cmd.arg("-i").arg(input).arg("-o").arg(output);

    let result = run_with_timeout(cmd, timeout)?;
    if !result.stdout.trim().is_empty() {
        tracing::debug!(stdout = result.stdout.trim(), "renderer output");
    }
    if !result.stderr.trim().is_empty() {
        tracing::debug!(stderr = result.stderr.trim(), "renderer diagnostics");
    }
    Ok(())
}

/// Opens the rendered image in the desktop viewer. Failure is only logged.
pub fn open_image(path: &Path) {
    if let Err(e) = open::that(path) {
        tracing::warn!(path = %path.display(), "could not open image viewer: {e}");
    }
}
