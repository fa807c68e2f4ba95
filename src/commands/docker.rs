use clap::{Args, Subcommand};

use ztasks::docker;
use ztasks::shell::{normalize_args, split_command};
use ztasks::validation::require_non_empty;

use super::{CmdResult, Session, TaskReport};

#[derive(Args)]
pub struct DockerArgs {
    #[command(subcommand)]
    pub command: DockerCommand,
}

#[derive(Subcommand)]
pub enum DockerCommand {
    /// docker compose with the fixed compose file and project name
    #[command(visible_alias = "dc")]
    Compose {
        /// Compose subcommand, e.g. `up db -d` or "up db -d"
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Plain docker command
    Raw {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Execute a command in the existing container of a service
    Exec {
        /// Compose service name
        #[arg(long, default_value = "")]
        service: String,

        /// Command as one string
        #[arg(long = "cmd", value_name = "COMMAND")]
        cmd: Option<String>,

        /// Command as separate words (after `--`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Start an interactive shell in the existing container of a service
    Shell {
        /// Compose service name
        #[arg(long, default_value = "")]
        service: String,
    },
    /// Run `/make_backup.sh backup` in the database container
    DbBackup,
    /// Start the database service
    DbRun,
    /// Stop the database service (keeps the container)
    DbStop,
}

/// Interactive shells take over the terminal and print no JSON.
pub fn is_interactive(args: &DockerArgs) -> bool {
    matches!(args.command, DockerCommand::Shell { .. })
}

pub(crate) fn run(args: DockerArgs, session: &mut Session) -> CmdResult<TaskReport> {
    let task = match args.command {
        DockerCommand::Compose { args } => {
            docker::compose_command(&mut session.ctx, &session.config, &normalize_args(&args))?;
            "docker.compose"
        }
        DockerCommand::Raw { args } => {
            docker::docker_command(&mut session.ctx, &normalize_args(&args))?;
            "docker.raw"
        }
        DockerCommand::Exec {
            service,
            cmd,
            command,
        } => {
            let words = match cmd {
                Some(cmd) => split_command("cmd", &cmd)?,
                None => command,
            };
            docker::exec_in_service(&mut session.ctx, &service, &words)?;
            "docker.exec"
        }
        DockerCommand::Shell { service } => {
            require_non_empty(&service, "service", "must provide --service name")?;
            if !session.ctx.is_dry_run() && !crate::tty::require_tty_for_interactive() {
                return Err(ztasks::Error::validation_invalid_argument(
                    "tty",
                    "This command requires an interactive TTY",
                    None,
                ));
            }
            docker::shell_in_service(&mut session.ctx, &service)?;
            "docker.shell"
        }
        DockerCommand::DbBackup => {
            docker::db_backup(&mut session.ctx, &session.config)?;
            "docker.db_backup"
        }
        DockerCommand::DbRun => {
            docker::db_run(&mut session.ctx, &session.config)?;
            "docker.db_run"
        }
        DockerCommand::DbStop => {
            docker::db_stop(&mut session.ctx, &session.config)?;
            "docker.db_stop"
        }
    };

    Ok((session.report(task), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ztasks::config::FileConfig;
    use ztasks::{Context, ErrorCode, TaskConfig};

    fn session(dry_run: bool) -> Session {
        let env = |key: &str| match key {
            "OJS_COMPOSE_PROJECTNAME" => Some("ojs".to_string()),
            "OJS_COMPOSE_DBSERVICE" => Some("db".to_string()),
            _ => None,
        };
        Session {
            config: TaskConfig::resolve(env, FileConfig::default()).unwrap(),
            ctx: Context::local().with_dry_run(dry_run),
            level: 1,
        }
    }

    fn exec(cmd: &str) -> DockerArgs {
        DockerArgs {
            command: DockerCommand::Exec {
                service: "web".to_string(),
                cmd: Some(cmd.to_string()),
                command: Vec::new(),
            },
        }
    }

    #[test]
    fn exec_cmd_keeps_quoted_argument_whole() {
        let mut session = session(true);
        let (report, _) = run(exec("sh -c 'echo a b'"), &mut session).unwrap();
        assert_eq!(report.commands, vec!["docker exec -t web_1 sh -c 'echo a b'"]);
    }

    #[test]
    fn exec_cmd_with_unbalanced_quote_is_rejected() {
        let mut session = session(true);
        let err = run(exec("sh -c 'echo"), &mut session).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
        assert!(session.ctx.issued().is_empty());
    }

    #[test]
    fn shell_without_service_reports_service_before_tty() {
        let mut session = session(false);
        let args = DockerArgs {
            command: DockerCommand::Shell {
                service: String::new(),
            },
        };
        let err = run(args, &mut session).unwrap_err();
        assert_eq!(err.message, "must provide --service name");
        assert!(session.ctx.issued().is_empty());
    }
}
