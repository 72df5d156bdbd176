//! Installer Core - interactive scaffolding for PHP web projects
//!
//! The wizard asks for a backend framework, lets Composer create the project
//! skeleton, configures it (database settings, optional auth scaffold and
//! migrations) and finally applies a front-end theme. All real work is done
//! by external tools; this crate sequences them and reports failures.
//!
//! # Architecture
//!
//! - **Leaves** - `process` (child processes), `prompt` (questions),
//!   `env_file` (`.env` rewriting), `assets` (embedded theme files)
//! - **Installers** - `backend` (one `BackendInstaller` per framework) and
//!   `frontend` (themes)
//! - **Orchestration** - `installer::Installer`, generic over the
//!   `CommandRunner` and `Prompter` seams so it can run without a terminal
//!
//! # Example Usage
//!
//! ```ignore
//! use installer_core::{InstallRequest, Installer, InstallerConfig, ProcessRunner, TermPrompter};
//!
//! let cwd = std::env::current_dir()?;
//! let config = InstallerConfig::resolve(&cwd, None);
//! let mut installer = Installer::new(ProcessRunner::console(), TermPrompter::new()?, config);
//! installer.run(&InstallRequest::new(cwd, Some("blog".into()))).await?;
//! ```

pub mod assets;
pub mod backend;
pub mod config;
pub mod env_file;
pub mod error;
pub mod frontend;
pub mod installer;
pub mod process;
pub mod prompt;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use assets::AssetSource;
pub use backend::{Backend, BackendInstaller, BackendOutcome, Stage};
pub use config::InstallerConfig;
pub use env_file::DatabaseConfig;
pub use error::InstallError;
pub use frontend::{Theme, ThemeInstall};
pub use installer::{InstallRequest, InstallSummary, Installer};
pub use process::{CommandLine, CommandRunner, ProcessRunner};
pub use prompt::{PromptService, Prompter, TermPrompter};
