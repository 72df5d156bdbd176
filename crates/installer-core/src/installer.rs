//! The `install` wizard: target check, backend scaffold and configuration,
//! then the front-end theme.

use crate::assets;
use crate::backend::{Backend, BackendContext, BackendOutcome};
use crate::config::InstallerConfig;
use crate::error::InstallError;
use crate::frontend::{FrontendInstaller, Theme, ThemeInstall};
use crate::process::{run_reported, CommandRunner};
use crate::prompt::{PromptService, Prompter};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One `install` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Subdirectory to create; `None` installs into `cwd`
    pub name: Option<String>,
    pub cwd: PathBuf,
    /// Preselected backend (skips the prompt)
    pub backend: Option<Backend>,
    /// Preselected theme (skips the prompt)
    pub theme: Option<Theme>,
}

impl InstallRequest {
    pub fn new(cwd: PathBuf, name: Option<String>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            cwd,
            backend: None,
            theme: None,
        }
    }

    pub fn target(&self) -> PathBuf {
        resolve_target(&self.cwd, self.name.as_deref())
    }

    /// Argument handed to `create-project`
    fn project_arg(&self) -> &str {
        self.name.as_deref().unwrap_or(".")
    }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub target: PathBuf,
    pub backend: Backend,
    pub outcome: BackendOutcome,
    pub theme: Theme,
    pub frontend: ThemeInstall,
}

pub fn resolve_target(cwd: &Path, name: Option<&str>) -> PathBuf {
    match name {
        Some(name) => cwd.join(name),
        None => cwd.to_path_buf(),
    }
}

/// The target may be the working directory itself, a missing path or an
/// empty directory. Anything else is an existing application.
pub fn verify_target(target: &Path, cwd: &Path) -> Result<(), InstallError> {
    if target == cwd {
        return Ok(());
    }

    let occupied = if target.is_dir() {
        std::fs::read_dir(target)
            .map_err(|e| InstallError::io(format!("Failed to read {}", target.display()), e))?
            .next()
            .is_some()
    } else {
        target.exists()
    };

    if occupied {
        return Err(InstallError::TargetAlreadyExists {
            path: target.to_path_buf(),
        });
    }
    Ok(())
}

pub struct Installer<R, P> {
    runner: R,
    prompts: PromptService<P>,
    config: InstallerConfig,
}

impl<R: CommandRunner, P: Prompter> Installer<R, P> {
    pub fn new(runner: R, prompter: P, config: InstallerConfig) -> Self {
        Self {
            runner,
            prompts: PromptService::new(prompter),
            config,
        }
    }

    pub fn into_parts(self) -> (R, P) {
        (self.runner, self.prompts.into_inner())
    }

    /// Run the whole wizard
    pub async fn run(&mut self, request: &InstallRequest) -> Result<InstallSummary> {
        // Step 1: Refuse to clobber an existing application
        let target = request.target();
        verify_target(&target, &request.cwd)?;

        cliclack::intro("Web project installer")?;
        cliclack::log::info("Welcome to the web project installer.")?;

        // Step 2: Backend framework
        let backend = match request.backend {
            Some(backend) => {
                cliclack::log::info(format!("Using backend: {}", backend))?;
                backend
            }
            None => self
                .prompts
                .choose("Please choose your backend framework", Backend::CHOICES)?,
        };
        cliclack::log::info(format!("Installation of {}", backend))?;

        // Step 3: Project skeleton
        let scaffold = backend.scaffold_command(&self.config.composer, request.project_arg());
        run_reported(
            &mut self.runner,
            &scaffold,
            &request.cwd,
            "Composer install failed.",
        )
        .await?;

        // Step 4: Bower settings so components land in vendor/
        self.write_bowerrc(&target)?;

        // Step 5: Framework configuration
        let outcome = backend
            .configure(&mut BackendContext {
                runner: &mut self.runner,
                prompts: &mut self.prompts,
                project_dir: &target,
            })
            .await?;

        // Step 6: Front-end theme
        let theme = match request.theme {
            Some(theme) => {
                cliclack::log::info(format!("Using frontend: {}", theme))?;
                theme
            }
            None => self
                .prompts
                .choose("Please choose your frontend framework", Theme::CHOICES)?,
        };
        let frontend = FrontendInstaller::new(&self.config.assets)
            .install(&mut self.runner, theme, &target, outcome.auth_enabled)
            .await?;

        print_next_steps(backend, &target, &request.cwd)?;

        Ok(InstallSummary {
            target,
            backend,
            outcome,
            theme,
            frontend,
        })
    }

    fn write_bowerrc(&self, target: &Path) -> Result<()> {
        std::fs::create_dir_all(target)
            .with_context(|| format!("Failed to create project directory: {}", target.display()))?;
        self.config
            .assets
            .copy_file(assets::BOWERRC, &target.join(".bowerrc"))?;
        Ok(())
    }
}

fn print_next_steps(backend: Backend, target: &Path, cwd: &Path) -> Result<()> {
    let mut steps = Vec::new();
    if target != cwd {
        steps.push(format!("cd {}", target.display()));
    }
    steps.push(match backend {
        Backend::Laravel => "php artisan serve".to_string(),
        Backend::Symfony => "php bin/console server:run".to_string(),
    });

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Stage;
    use crate::frontend::AUTH_VIEWS_DIR;
    use crate::testing::{RecordingRunner, ScriptedPrompter};

    const ENV: &str = "APP_ENV=local\nDB_CONNECTION=sqlite\nDB_HOST=x\nDB_PORT=1\n\
DB_DATABASE=x\nDB_USERNAME=x\nDB_PASSWORD=\nMAIL_DRIVER=smtp\n";

    fn installer(
        runner: RecordingRunner,
        answers: &[&str],
    ) -> Installer<RecordingRunner, ScriptedPrompter> {
        Installer::new(
            runner,
            ScriptedPrompter::new(answers.iter().copied()),
            InstallerConfig::default(),
        )
    }

    fn laravel_answers(auth: &'static str, theme: &'static str) -> Vec<&'static str> {
        vec!["laravel", "", "", "", "", "", "", auth, theme]
    }

    #[test]
    fn test_resolve_target() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_target(cwd, Some("demo")), PathBuf::from("/work/demo"));
        assert_eq!(resolve_target(cwd, None), PathBuf::from("/work"));
    }

    #[test]
    fn test_verify_target_rules() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::write(cwd.path().join("README"), "x").unwrap();

        // Non-empty cwd itself is fine
        assert!(verify_target(cwd.path(), cwd.path()).is_ok());
        // Missing path is fine
        assert!(verify_target(&cwd.path().join("new"), cwd.path()).is_ok());
        // Empty directory is fine
        std::fs::create_dir(cwd.path().join("empty")).unwrap();
        assert!(verify_target(&cwd.path().join("empty"), cwd.path()).is_ok());
        // Existing file is not
        assert!(matches!(
            verify_target(&cwd.path().join("README"), cwd.path()),
            Err(InstallError::TargetAlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_existing_target_aborts_before_any_command() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::create_dir(cwd.path().join("demo-app")).unwrap();
        std::fs::write(cwd.path().join("demo-app/index.php"), "<?php").unwrap();

        let mut wizard = installer(RecordingRunner::new(), &laravel_answers("no", "AdminLTE"));
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("demo-app".into()));

        let err = wizard.run(&request).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::TargetAlreadyExists { .. })
        ));

        let (runner, prompter) = wizard.into_parts();
        assert!(runner.commands().is_empty());
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_laravel_defaults_no_auth_adminlte() {
        let cwd = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().scaffold_with_env(ENV);
        let mut wizard = installer(runner, &laravel_answers("no", "AdminLTE"));
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("demo-app".into()));

        let summary = wizard.run(&request).await.unwrap();
        let project = cwd.path().join("demo-app");

        assert_eq!(summary.target, project);
        assert!(!summary.outcome.auth_enabled);

        let (runner, prompter) = wizard.into_parts();
        assert_eq!(
            runner.commands(),
            vec![
                "composer create-project laravel/laravel --prefer-dist demo-app",
                "npm install",
                "bower install adminlte",
                "npm run dev",
            ]
        );
        assert_eq!(runner.calls()[0].1, cwd.path());
        assert!(runner.calls()[1..].iter().all(|(_, dir)| *dir == project));
        assert_eq!(prompter.remaining(), 0);

        let env = std::fs::read_to_string(project.join(".env")).unwrap();
        assert_eq!(
            env,
            "APP_ENV=local\nDB_CONNECTION=mysql\nDB_HOST=127.0.0.1\nDB_PORT=3306\n\
DB_DATABASE=homestead\nDB_USERNAME=homestead\nDB_PASSWORD=secret\nMAIL_DRIVER=smtp\n"
        );
        assert!(project.join("webpack.mix.js").is_file());
        assert!(project.join(".bowerrc").is_file());
        assert!(!project.join(AUTH_VIEWS_DIR).exists());
    }

    #[tokio::test]
    async fn test_laravel_with_auth_copies_views() {
        let cwd = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().scaffold_with_env(ENV);
        let mut wizard = installer(runner, &laravel_answers("yes", "AdminLTE"));
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("demo-app".into()));

        let summary = wizard.run(&request).await.unwrap();
        let project = cwd.path().join("demo-app");

        assert!(summary.outcome.auth_enabled);
        assert!(summary.outcome.stages.contains(&Stage::MigrationsRun));

        let (runner, _) = wizard.into_parts();
        assert_eq!(
            runner.commands(),
            vec![
                "composer create-project laravel/laravel --prefer-dist demo-app",
                "npm install",
                "php artisan make:auth",
                "php artisan migrate",
                "bower install adminlte",
                "npm run dev",
            ]
        );

        let views = project.join(AUTH_VIEWS_DIR);
        assert!(views.join("login.blade.php").is_file());
        assert!(views.join("register.blade.php").is_file());
    }

    #[tokio::test]
    async fn test_bootstrap_is_coming_soon() {
        let cwd = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().scaffold_with_env(ENV);
        let mut wizard = installer(runner, &laravel_answers("yes", "Bootstrap"));
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("demo-app".into()));

        let summary = wizard.run(&request).await.unwrap();
        let project = cwd.path().join("demo-app");

        assert_eq!(summary.frontend, ThemeInstall::NotImplemented);
        assert!(!project.join("webpack.mix.js").exists());
        assert!(!project.join(AUTH_VIEWS_DIR).exists());

        let (runner, _) = wizard.into_parts();
        assert_eq!(runner.commands().last(), Some(&"php artisan migrate"));
    }

    #[tokio::test]
    async fn test_install_into_cwd_with_symfony() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::write(cwd.path().join("notes.txt"), "keep").unwrap();

        let mut wizard = installer(RecordingRunner::new(), &["symfony", "Foundation"]);
        let request = InstallRequest::new(cwd.path().to_path_buf(), None);

        let summary = wizard.run(&request).await.unwrap();
        assert_eq!(summary.target, cwd.path());
        assert_eq!(summary.backend, Backend::Symfony);

        let (runner, _) = wizard.into_parts();
        assert_eq!(
            runner.commands(),
            vec![
                "composer create-project symfony/framework-standard-edition .",
                "npm install",
            ]
        );
        assert!(cwd.path().join(".bowerrc").is_file());
    }

    #[tokio::test]
    async fn test_scaffold_failure_is_reported_and_wizard_continues() {
        let cwd = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().fail_on("composer");
        let mut wizard = installer(runner, &["symfony", "Bootstrap"]);
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("api".into()));

        wizard.run(&request).await.unwrap();

        let (runner, _) = wizard.into_parts();
        assert_eq!(runner.commands().len(), 2);
        assert!(cwd.path().join("api/.bowerrc").is_file());
    }

    #[tokio::test]
    async fn test_invalid_backend_answer_reprompts() {
        let cwd = tempfile::tempdir().unwrap();
        let mut wizard = installer(RecordingRunner::new(), &["rails", "1", "Bootstrap"]);
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("app".into()));

        let summary = wizard.run(&request).await.unwrap();
        assert_eq!(summary.backend, Backend::Symfony);

        let (_, prompter) = wizard.into_parts();
        assert_eq!(prompter.asked()[0], prompter.asked()[1]);
    }

    #[tokio::test]
    async fn test_preselected_choices_skip_prompts() {
        let cwd = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new().scaffold_with_env(ENV);
        let mut wizard = installer(runner, &["", "", "", "", "", "", ""]);
        let mut request = InstallRequest::new(cwd.path().to_path_buf(), Some("demo-app".into()));
        request.backend = Some(Backend::Laravel);
        request.theme = Some(Theme::AdminLte);

        let summary = wizard.run(&request).await.unwrap();
        assert_eq!(summary.theme, Theme::AdminLte);

        let (_, prompter) = wizard.into_parts();
        assert_eq!(prompter.remaining(), 0);
        assert!(!prompter.asked().iter().any(|q| q.contains("choose your")));
    }

    #[tokio::test]
    async fn test_missing_env_file_aborts_run() {
        let cwd = tempfile::tempdir().unwrap();
        let mut wizard = installer(RecordingRunner::new(), &laravel_answers("no", "AdminLTE"));
        let request = InstallRequest::new(cwd.path().to_path_buf(), Some("demo-app".into()));

        let err = wizard.run(&request).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::EnvFileNotFound { .. })
        ));

        let (runner, _) = wizard.into_parts();
        assert!(!runner.commands().contains(&"bower install adminlte"));
    }
}
