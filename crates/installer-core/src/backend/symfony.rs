//! Symfony post-scaffold steps

use super::{install_dependencies, BackendContext, BackendInstaller, BackendOutcome, Stage};
use crate::process::CommandRunner;
use crate::prompt::Prompter;
use anyhow::Result;

/// Symfony only gets the shared dependency install for now
pub struct SymfonyInstaller;

impl BackendInstaller for SymfonyInstaller {
    async fn configure<R: CommandRunner, P: Prompter>(
        &self,
        ctx: &mut BackendContext<'_, R, P>,
    ) -> Result<BackendOutcome> {
        let mut outcome = BackendOutcome::started();

        install_dependencies(ctx).await?;
        outcome.advance(Stage::DependenciesInstalled);

        outcome.advance(Stage::Ready);
        Ok(outcome)
    }
}
