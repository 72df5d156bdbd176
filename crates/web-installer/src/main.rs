//! Web project installer - Laravel/Symfony scaffolding with a front-end theme

use anyhow::Result;
use clap::{Parser, Subcommand};
use installer_core::{
    Backend, InstallRequest, Installer, InstallerConfig, ProcessRunner, TermPrompter, Theme,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "web-installer")]
#[command(about = "Interactive installer for Laravel and Symfony web projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install scaffold for web project
    Install(InstallArgs),
}

#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Directory to create for the project (defaults to the current directory)
    pub name: Option<String>,

    /// Backend framework (laravel, symfony); asked interactively when omitted
    #[arg(long, value_parser = parse_backend)]
    pub backend: Option<Backend>,

    /// Frontend framework (e.g. AdminLTE); asked interactively when omitted
    #[arg(long, value_parser = parse_theme)]
    pub frontend: Option<Theme>,

    /// Local directory to copy theme files from instead of the built-in ones (for development use)
    #[arg(long = "assets-dir")]
    pub assets_dir: Option<PathBuf>,
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Backend::CHOICES.iter().map(|(_, name)| *name).collect();
        format!("unknown backend '{}' (expected one of: {})", s, names.join(", "))
    })
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Theme::CHOICES.iter().map(|(_, name)| *name).collect();
        format!("unknown frontend '{}' (expected one of: {})", s, names.join(", "))
    })
}

async fn install(args: InstallArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = InstallerConfig::resolve(&cwd, args.assets_dir);

    let mut request = InstallRequest::new(cwd, args.name);
    request.backend = args.backend;
    request.theme = args.frontend;

    let prompter = TermPrompter::new()?;
    let mut installer = Installer::new(ProcessRunner::console(), prompter, config);
    installer.run(&request).await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Command::Install(install_args) => {
            let result = install(install_args).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
