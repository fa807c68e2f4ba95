use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    InteractivePassthrough,
}

mod commands;
mod output;
mod tty;

use commands::{config, docker, file, git, npm, php, workflow};
use ztasks::TaskConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "ztasks")]
#[command(version = VERSION)]
#[command(about = "Docker compose, git rebase and build chores for a plugin checkout")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Docker and docker compose tasks
    Docker(docker::DockerArgs),
    /// Git rebase and submodule tasks
    Git(git::GitArgs),
    /// npm install and build
    Npm(npm::NpmArgs),
    /// Composer dependency updates
    Php(php::PhpArgs),
    /// Compound workflows
    Workflow(workflow::WorkflowArgs),
    /// Idempotent file writes
    File(file::FileArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Docker(args) if docker::is_interactive(args) => {
            ResponseMode::InteractivePassthrough
        }
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = response_mode(&cli.command);

    let (json_result, exit_code) = match TaskConfig::load() {
        Ok(task_config) => commands::run_json(cli.command, &cli.global, task_config),
        Err(err) => output::map_cmd_result_to_json::<serde_json::Value>(Err(err)),
    };

    if let Err(err) = &json_result {
        eprintln!("#### {}", err);
    }

    let passthrough_ok =
        matches!(mode, ResponseMode::InteractivePassthrough) && json_result.is_ok();
    if !passthrough_ok {
        let _ = output::print_json_result(json_result);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
