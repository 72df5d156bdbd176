//! Error taxonomy for the installer

use std::path::PathBuf;
use thiserror::Error;

/// Failures the wizard distinguishes between.
///
/// Only `CommandFailed` is routinely recovered from (reported and skipped);
/// every other variant aborts the run.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Application already exists at {}", path.display())]
    TargetAlreadyExists { path: PathBuf },

    #[error("`{command}` failed{}", exit_suffix(*code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("No .env file found in {} (looked for .env and laravel/.env)", dir.display())]
    EnvFileNotFound { dir: PathBuf },

    #[error("An interactive terminal is required to answer the installer prompts")]
    NoTerminal,

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

fn exit_suffix(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}
