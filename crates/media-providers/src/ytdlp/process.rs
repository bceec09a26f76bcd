use crate::ytdlp::YtDlpError;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `program` to completion. The child is killed when the timeout
/// elapses or `cancel` fires, since dropping it triggers `kill_on_drop`.
pub async fn run(
    program: &Path,
    args: &[String],
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<ProcessOutput, YtDlpError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(?program, ?args, "Spawning process");

    let child = command.spawn().map_err(YtDlpError::Spawn)?;

    let output = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(YtDlpError::Cancelled),
        result = tokio::time::timeout(timeout, child.wait_with_output()) => match result {
            Ok(output) => output?,
            Err(_) => return Err(YtDlpError::Timeout(timeout)),
        },
    };

    let output = ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };

    if !output.stderr.trim().is_empty() {
        debug!(?program, status = %output.status, stderr = %output.stderr.trim(), "Process stderr");
    }

    Ok(output)
}
