//! External tool discovery and invocation.

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

use super::backend::OcrError;

/// Check whether a binary is on `PATH`.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Run a command to completion, killing it if `deadline` passes first.
///
/// Blocks the calling thread, so it must run on a blocking thread (or
/// outside any runtime), not inside an async task.
pub fn run_command(mut command: Command, deadline: Option<Duration>) -> Result<Output, OcrError> {
    command.kill_on_drop(true);
    let run = async move {
        let output = command.output();
        match deadline {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| OcrError::TimedOut(limit))?
                .map_err(OcrError::from),
            None => output.await.map_err(OcrError::from),
        }
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(run),
        Err(_) => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(run),
    }
}
