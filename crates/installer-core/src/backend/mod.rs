//! Backend frameworks and their post-scaffold configuration
//!
//! Each framework implements [`BackendInstaller`]. [`Backend`] maps the
//! user's choice to its scaffold command and installer, so the orchestrator
//! never branches on framework names.

mod laravel;
mod symfony;

pub use laravel::LaravelInstaller;
pub use symfony::SymfonyInstaller;

use crate::process::{run_reported, CommandLine, CommandRunner};
use crate::prompt::{PromptService, Prompter};
use anyhow::Result;
use std::fmt;
use std::path::Path;

/// Supported backend frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Laravel,
    Symfony,
}

impl Backend {
    /// Choices in prompt order
    pub const CHOICES: &'static [(Backend, &'static str)] =
        &[(Backend::Laravel, "laravel"), (Backend::Symfony, "symfony")];

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Laravel => "laravel",
            Backend::Symfony => "symfony",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Laravel => "Laravel",
            Backend::Symfony => "Symfony",
        }
    }

    /// Composer package used as the project skeleton
    pub fn skeleton_package(&self) -> &'static str {
        match self {
            Backend::Laravel => "laravel/laravel",
            Backend::Symfony => "symfony/framework-standard-edition",
        }
    }

    /// Parse a framework name, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        Self::CHOICES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(backend, _)| *backend)
    }

    /// `composer create-project <skeleton> <project>`
    pub fn scaffold_command(&self, composer: &CommandLine, project: &str) -> CommandLine {
        let command = composer
            .clone()
            .arg("create-project")
            .arg(self.skeleton_package());
        match self {
            Backend::Laravel => command.arg("--prefer-dist").arg(project),
            Backend::Symfony => command.arg(project),
        }
    }

    /// Run this framework's post-scaffold steps
    pub async fn configure<R: CommandRunner, P: Prompter>(
        &self,
        ctx: &mut BackendContext<'_, R, P>,
    ) -> Result<BackendOutcome> {
        match self {
            Backend::Laravel => LaravelInstaller.configure(ctx).await,
            Backend::Symfony => SymfonyInstaller.configure(ctx).await,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Progress of a backend installer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ScaffoldRequested,
    DependenciesInstalled,
    DatabaseConfigured,
    AuthEnabled,
    AuthSkipped,
    MigrationsRun,
    Ready,
}

/// Result of the backend step, handed on to the frontend step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOutcome {
    pub auth_enabled: bool,
    /// Stages passed through, in order
    pub stages: Vec<Stage>,
}

impl BackendOutcome {
    pub(crate) fn started() -> Self {
        Self {
            auth_enabled: false,
            stages: vec![Stage::ScaffoldRequested],
        }
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        if stage == Stage::AuthEnabled {
            self.auth_enabled = true;
        }
        self.stages.push(stage);
    }
}

/// What a backend installer works with
pub struct BackendContext<'a, R, P> {
    pub runner: &'a mut R,
    pub prompts: &'a mut PromptService<P>,
    pub project_dir: &'a Path,
}

/// Post-scaffold configuration of one backend framework
#[allow(async_fn_in_trait)]
pub trait BackendInstaller {
    async fn configure<R: CommandRunner, P: Prompter>(
        &self,
        ctx: &mut BackendContext<'_, R, P>,
    ) -> Result<BackendOutcome>;
}

/// JavaScript dependencies every generated project needs. Failure is reported only.
pub(crate) async fn install_dependencies<R: CommandRunner, P>(
    ctx: &mut BackendContext<'_, R, P>,
) -> Result<()> {
    let npm_install = CommandLine::new("npm").arg("install");
    run_reported(ctx.runner, &npm_install, ctx.project_dir, "Npm install failed.").await?;
    Ok(())
}
