use clap::{Args, Subcommand};
use serde::Serialize;

use ztasks::TaskConfig;

use super::{CmdResult, Session};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the resolved configuration
    Show,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigShowOutput {
    pub config: TaskConfig,
    pub target: String,
}

pub(crate) fn run(args: ConfigArgs, session: &mut Session) -> CmdResult<ConfigShowOutput> {
    match args.command {
        ConfigCommand::Show => Ok((
            ConfigShowOutput {
                config: session.config.clone(),
                target: session.ctx.target().describe(),
            },
            0,
        )),
    }
}
