//! Installer settings resolved from flags, environment and working directory

use crate::assets::AssetSource;
use crate::process::CommandLine;
use std::path::{Path, PathBuf};

/// Environment variable overriding the Composer command line
pub const COMPOSER_ENV: &str = "WEB_INSTALLER_COMPOSER";

/// Environment variable pointing at a local assets directory
pub const ASSETS_ENV: &str = "WEB_INSTALLER_ASSETS";

/// Resolved settings shared by every installer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Command used to create projects (`composer` or `php composer.phar`)
    pub composer: CommandLine,
    pub assets: AssetSource,
}

impl InstallerConfig {
    /// Resolve from the process environment. `assets_dir` (the CLI flag) wins
    /// over `WEB_INSTALLER_ASSETS`.
    pub fn resolve(cwd: &Path, assets_dir: Option<PathBuf>) -> Self {
        Self::from_sources(
            cwd,
            std::env::var(COMPOSER_ENV).ok(),
            assets_dir,
            std::env::var(ASSETS_ENV).ok(),
        )
    }

    fn from_sources(
        cwd: &Path,
        composer_override: Option<String>,
        assets_flag: Option<PathBuf>,
        assets_env: Option<String>,
    ) -> Self {
        let composer = composer_override
            .as_deref()
            .and_then(CommandLine::parse)
            .unwrap_or_else(|| detect_composer(cwd));

        let assets = assets_flag
            .or_else(|| assets_env.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
            .map(AssetSource::Local)
            .unwrap_or_default();

        Self { composer, assets }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            composer: CommandLine::new("composer"),
            assets: AssetSource::Embedded,
        }
    }
}

/// A `composer.phar` in the working directory takes precedence over a global install
pub fn detect_composer(cwd: &Path) -> CommandLine {
    if cwd.join("composer.phar").is_file() {
        CommandLine::new("php").arg("composer.phar")
    } else {
        CommandLine::new("composer")
    }
}
