//! External command execution
//!
//! This module provides:
//! - `CommandLine`, a program plus arguments (no shell involved)
//! - The `CommandRunner` seam and the tokio-backed `ProcessRunner`
//! - Reporting helpers shared by every installer step

pub mod command;
pub mod runner;

pub use command::CommandLine;
pub use runner::{CommandOutput, CommandRunner, ConsoleSink, OutputSink, ProcessRunner, Stream};

use crate::error::InstallError;
use anyhow::Result;
use std::path::Path;

/// Run a command whose failure should not stop the wizard.
///
/// On failure an error banner and the captured output are printed and
/// `Ok(false)` is returned. Only console write errors propagate.
pub async fn run_reported<R: CommandRunner>(
    runner: &mut R,
    command: &CommandLine,
    dir: &Path,
    failure_banner: &str,
) -> Result<bool> {
    cliclack::log::step(format!("Running {}", command))?;

    match runner.run(command, dir).await {
        Ok(_) => Ok(true),
        Err(InstallError::CommandFailed { output, .. }) => {
            cliclack::log::error(failure_banner)?;
            if !output.trim().is_empty() {
                cliclack::log::error(output.trim_end())?;
            }
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
