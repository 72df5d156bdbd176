//! Laravel post-scaffold steps: database settings, auth scaffold, migrations

use super::{install_dependencies, BackendContext, BackendInstaller, BackendOutcome, Stage};
use crate::env_file::{self, DatabaseConfig};
use crate::process::{run_reported, CommandLine, CommandRunner};
use crate::prompt::{PromptService, Prompter};
use anyhow::Result;

pub struct LaravelInstaller;

impl BackendInstaller for LaravelInstaller {
    async fn configure<R: CommandRunner, P: Prompter>(
        &self,
        ctx: &mut BackendContext<'_, R, P>,
    ) -> Result<BackendOutcome> {
        let mut outcome = BackendOutcome::started();

        install_dependencies(ctx).await?;
        outcome.advance(Stage::DependenciesInstalled);

        cliclack::log::info("Configuration of Laravel")?;
        let database = ask_database_config(ctx.prompts)?;
        write_env(ctx, &database)?;
        outcome.advance(Stage::DatabaseConfigured);

        let enable_auth = ctx
            .prompts
            .confirm("Do you want to enable the auth feature of Laravel?", false)?;

        if enable_auth {
            outcome.advance(Stage::AuthEnabled);

            let make_auth = artisan("make:auth");
            run_reported(
                ctx.runner,
                &make_auth,
                ctx.project_dir,
                "Installation of auth feature failed.",
            )
            .await?;

            let migrate = artisan("migrate");
            run_reported(ctx.runner, &migrate, ctx.project_dir, "Migrations failed.").await?;
            outcome.advance(Stage::MigrationsRun);
        } else {
            outcome.advance(Stage::AuthSkipped);
        }

        outcome.advance(Stage::Ready);
        Ok(outcome)
    }
}

fn artisan(task: &str) -> CommandLine {
    CommandLine::new("php").arg("artisan").arg(task)
}

fn ask_database_config<P: Prompter>(prompts: &mut PromptService<P>) -> Result<DatabaseConfig> {
    let defaults = DatabaseConfig::default();

    Ok(DatabaseConfig {
        driver: prompts.text("Enter the database driver", &defaults.driver)?,
        host: prompts.text("Enter the database host", &defaults.host)?,
        port: prompts.text("Enter the database port", &defaults.port)?,
        database: prompts.text("Enter the database name", &defaults.database)?,
        username: prompts.text("Enter the database username", &defaults.username)?,
        password: prompts.secret("Enter the database password", &defaults.password)?,
    })
}

fn write_env<R, P>(ctx: &BackendContext<'_, R, P>, database: &DatabaseConfig) -> Result<()> {
    let report = env_file::rewrite(ctx.project_dir, database)?;

    cliclack::log::success(format!("Database settings written to {}", report.path.display()))?;

    if !report.missing.is_empty() {
        let names: Vec<&str> = report.missing.iter().map(|k| k.name()).collect();
        cliclack::log::warning(format!(
            "{} has no line for {}; those values were not written",
            report.path.display(),
            names.join(", ")
        ))?;
    }

    Ok(())
}
