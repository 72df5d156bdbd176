//! Front-end themes applied on top of the generated project

use crate::assets::{self, AssetSource};
use crate::process::{run_reported, CommandLine, CommandRunner};
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported front-end frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Bootstrap,
    Foundation,
    Materialize,
    MaterialDesignLite,
    AdminLte,
}

impl Theme {
    /// Choices in prompt order
    pub const CHOICES: &'static [(Theme, &'static str)] = &[
        (Theme::Bootstrap, "Bootstrap"),
        (Theme::Foundation, "Foundation"),
        (Theme::Materialize, "Materialize"),
        (Theme::MaterialDesignLite, "Material Design Lite"),
        (Theme::AdminLte, "AdminLTE"),
    ];

    pub fn display_name(&self) -> &'static str {
        Self::CHOICES
            .iter()
            .find(|(theme, _)| theme == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }

    /// Parse a theme name, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        Self::CHOICES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(theme, _)| *theme)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What the frontend step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeInstall {
    /// Theme has no installer yet; nothing was touched
    NotImplemented,
    Installed {
        /// Files written into the project
        copied: Vec<PathBuf>,
    },
}

/// Relative location of the auth views inside a Laravel project
pub const AUTH_VIEWS_DIR: &str = "resources/views/auth";

pub struct FrontendInstaller<'a> {
    assets: &'a AssetSource,
}

impl<'a> FrontendInstaller<'a> {
    pub fn new(assets: &'a AssetSource) -> Self {
        Self { assets }
    }

    /// Install `theme` into `target_dir`. Auth views are only replaced when
    /// the backend step enabled the auth feature.
    pub async fn install<R: CommandRunner>(
        &self,
        runner: &mut R,
        theme: Theme,
        target_dir: &Path,
        auth_enabled: bool,
    ) -> Result<ThemeInstall> {
        match theme {
            Theme::AdminLte => self.install_adminlte(runner, target_dir, auth_enabled).await,
            Theme::Bootstrap | Theme::Foundation | Theme::Materialize | Theme::MaterialDesignLite => {
                cliclack::log::warning(format!("{} support is coming soon...", theme))?;
                Ok(ThemeInstall::NotImplemented)
            }
        }
    }

    async fn install_adminlte<R: CommandRunner>(
        &self,
        runner: &mut R,
        target_dir: &Path,
        auth_enabled: bool,
    ) -> Result<ThemeInstall> {
        cliclack::log::info("Installation of AdminLTE")?;
        let mut copied = Vec::new();

        let bower = CommandLine::new("bower").args(["install", "adminlte"]);
        run_reported(runner, &bower, target_dir, "Installation of AdminLTE failed.").await?;

        let mix_config = target_dir.join("webpack.mix.js");
        self.assets.copy_file(assets::ADMINLTE_MIX, &mix_config)?;
        copied.push(mix_config);

        let build = CommandLine::new("npm").args(["run", "dev"]);
        run_reported(runner, &build, target_dir, "Generating assets failed.").await?;

        if auth_enabled {
            let views = self
                .assets
                .copy_tree(assets::ADMINLTE_AUTH_VIEWS, &target_dir.join(AUTH_VIEWS_DIR))?;
            cliclack::log::success(format!("Copied {} AdminLTE auth views", views.len()))?;
            copied.extend(views);
        }

        Ok(ThemeInstall::Installed { copied })
    }
}
