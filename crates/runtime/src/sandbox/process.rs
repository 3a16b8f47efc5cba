//! Bounded child-process execution.
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

use crate::config::ToolCommand;

pub(super) struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

pub(super) enum ToolFailure {
    /// The program could not be started at all.
    Spawn(io::Error),
    /// Reading the child's output failed after it started.
    Io(io::Error),
    TimedOut,
}

/// Runs `tool` inside `cwd`, collecting both output streams.
///
/// The child is killed when the limit elapses; dropping the pending wait
/// triggers `kill_on_drop`.
pub(super) async fn run_tool(
    tool: &ToolCommand,
    args: &[String],
    cwd: &Path,
    limit: Option<Duration>,
) -> Result<ToolOutput, ToolFailure> {
    let child = Command::new(&tool.program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(ToolFailure::Spawn)?;

    let output = match limit {
        Some(limit) => time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| ToolFailure::TimedOut)?,
        None => child.wait_with_output().await,
    }
    .map_err(ToolFailure::Io)?;

    Ok(ToolOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
