//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, CatalogService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::session::{course_detail, MenuSession};
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::DomainError;
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if cli.no_color || !settings.color {
        output::disable_colors();
    }
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::List { file }) => cmd_list(&container, file.as_deref()),
        Some(Commands::Show { course, file }) => cmd_show(&container, course, file.as_deref()),
        Some(Commands::Check { file }) => cmd_check(&container, file.as_deref()),
        Some(Commands::Tree { file }) => cmd_tree(&container, file.as_deref()),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Menu) | None => cmd_menu(&container),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// Load the given catalog, or the configured one, and require data.
///
/// Rejected records are reported as warnings on stderr.
fn load_catalog(container: &ServiceContainer, file: Option<&Path>) -> CliResult<CatalogService> {
    let path = file.unwrap_or(container.settings.catalog_file.as_path());
    let mut service = container.catalog_service();

    let report = service.load_file(path)?;
    for diagnostic in &report.diagnostics {
        output::warning(diagnostic);
    }
    report.ensure_loaded()?;
    Ok(service)
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    output::header("Here is a sample schedule:");
    for (id, name) in service.list_all() {
        output::info(&format!("{}, {}", id, name));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, course: &str, file: Option<&Path>) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    let found = service
        .lookup(course)
        .ok_or_else(|| DomainError::CourseNotFound(course.to_string()))?;
    output::info(&course_detail(found));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let path = file.unwrap_or(container.settings.catalog_file.as_path());
    let mut service = container.catalog_service();

    let report = service.load_file(path)?;
    output::header(&format!("Checking {}", path.display()));
    for diagnostic in &report.diagnostics {
        output::failure(diagnostic);
    }
    report.ensure_loaded()?;
    output::success(&format!(
        "{} courses loaded, {} records rejected",
        report.loaded,
        report.rejected()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    if let Some(index) = service.index() {
        output::info(&index.to_tree_string());
        output::detail(&format!("{} courses, depth {}", index.len(), index.depth()));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(ApplicationError::Config {
                    message: "no config directory available".into(),
                }
                .into())
            }
        },
    }
    Ok(())
}

fn cmd_menu(container: &ServiceContainer) -> CliResult<()> {
    let mut service = container.catalog_service();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MenuSession::new(
        &mut service,
        container.settings.catalog_file.clone(),
        stdin.lock(),
        stdout.lock(),
    );
    session.run()?;
    Ok(())
}
