// src/process.rs

use crate::error::{LineageError, Result};
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured output of a successful subprocess
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs `cmd` to completion, killing it once `timeout` has elapsed.
///
/// Both pipes are drained on helper threads so a chatty child cannot block
/// on a full pipe while we poll for its exit. The deadline also covers
/// collecting the output: a background process that inherited the pipes
/// keeps them open after the child exits. A non-zero exit becomes
/// [`LineageError::CommandFailed`].
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<CommandOutput> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(?cmd, ?timeout, "spawning subprocess");

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout_rx = drain_in_background(child.stdout.take());
    let stderr_rx = drain_in_background(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            tracing::warn!(%program, ?timeout, "subprocess timed out, killing it");
            // The child may have exited between try_wait and kill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(LineageError::Timeout { program, timeout });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let (Some(stdout), Some(stderr)) = (
        collect(&stdout_rx, deadline),
        collect(&stderr_rx, deadline),
    ) else {
        tracing::warn!(%program, ?timeout, "subprocess exited but its output pipes stayed open");
        return Err(LineageError::Timeout { program, timeout });
    };

    if status.success() {
        Ok(CommandOutput { stdout, stderr })
    } else {
        Err(LineageError::CommandFailed {
            program,
            exit_code: status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        })
    }
}

fn drain_in_background<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(drain(pipe));
    });
    rx
}

/// Output of one pipe, or None if it is still open at `deadline`.
fn collect(rx: &Receiver<String>, deadline: Instant) -> Option<String> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(output) => Some(output),
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
        Err(RecvTimeoutError::Timeout) => None,
    }
}

fn drain<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
