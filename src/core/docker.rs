//! Docker and docker compose tasks.
//!
//! Compose vocabulary for reference: up = create + start, down = stop +
//! remove, run starts a new container, exec enters a running one.

use crate::config::TaskConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec, RunMode};
use crate::validation;

/// The only `mode` under which `db_restore_raw` will run.
pub const RESTORE_CONFIRMATION: &str = "restore-no-matter-what";

const BACKUP_SCRIPT: &str = "/make_backup.sh";

/// Container name of the single instance of a compose service.
pub fn container_name(service: &str) -> String {
    format!("{}_1", service)
}

/// `docker compose -f <file> -p <project> <subcommand...>`
pub fn compose_spec<S: AsRef<str>>(config: &TaskConfig, subcommand: &[S]) -> CommandSpec {
    CommandSpec::new("docker")
        .args([
            "compose",
            "-f",
            config.compose_file.as_str(),
            "-p",
            config.project_name.as_str(),
        ])
        .args(subcommand.iter().map(|s| s.as_ref()))
}

pub fn compose_command<S: AsRef<str>>(
    ctx: &mut dyn CommandRunner,
    config: &TaskConfig,
    subcommand: &[S],
) -> Result<()> {
    ctx.run(&compose_spec(config, subcommand), RunMode::Batch)
}

/// Plain `docker <subcommand...>`.
pub fn docker_command<S: AsRef<str>>(ctx: &mut dyn CommandRunner, subcommand: &[S]) -> Result<()> {
    let spec = CommandSpec::new("docker").args(subcommand.iter().map(|s| s.as_ref()));
    ctx.run(&spec, RunMode::Batch)
}

/// Run a command in the existing container of `service`.
pub fn exec_in_service<S: AsRef<str>>(
    ctx: &mut dyn CommandRunner,
    service: &str,
    command: &[S],
) -> Result<()> {
    let service = service.trim();
    let has_command = command.iter().any(|part| !part.as_ref().trim().is_empty());
    validation::require_arguments(&[("--service", !service.is_empty()), ("--cmd", has_command)])?;

    let spec = CommandSpec::new("docker")
        .args(["exec", "-t"])
        .arg(container_name(service))
        .args(command.iter().map(|s| s.as_ref()));
    ctx.run(&spec, RunMode::Batch)
}

/// Open an interactive bash in the existing container of `service`.
pub fn shell_in_service(ctx: &mut dyn CommandRunner, service: &str) -> Result<()> {
    let service = validation::require_non_empty(service, "service", "must provide --service name")?;

    let spec = CommandSpec::new("docker")
        .args(["exec", "-ti"])
        .arg(container_name(service))
        .arg("/bin/bash");
    ctx.run(&spec, RunMode::Interactive)
}

/// Run the backup script in the database container.
pub fn db_backup(ctx: &mut dyn CommandRunner, config: &TaskConfig) -> Result<()> {
    exec_in_service(ctx, &config.db_service, &[BACKUP_SCRIPT, "backup"])
}

/// Restore the database from the latest backup.
///
/// Only `workflows::db_restore` calls this, after the operator confirmed.
pub fn db_restore_raw(ctx: &mut dyn CommandRunner, config: &TaskConfig, mode: &str) -> Result<()> {
    validation::fail_if_not(
        mode == RESTORE_CONFIRMATION,
        "mode",
        "db restore requires mode 'restore-no-matter-what'",
    )?;
    exec_in_service(ctx, &config.db_service, &[BACKUP_SCRIPT, "restore"])
}

/// Start the database service.
pub fn db_run(ctx: &mut dyn CommandRunner, config: &TaskConfig) -> Result<()> {
    compose_command(ctx, config, &["up", config.db_service.as_str(), "-d"])
}

/// Stop the database service but keep its container.
pub fn db_stop(ctx: &mut dyn CommandRunner, config: &TaskConfig) -> Result<()> {
    compose_command(ctx, config, &["stop", config.db_service.as_str()])
}
