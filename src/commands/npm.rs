use clap::{Args, Subcommand};

use ztasks::npm;

use super::{CmdResult, Session, TaskReport};

#[derive(Args)]
pub struct NpmArgs {
    #[command(subcommand)]
    command: NpmCommand,
}

#[derive(Subcommand)]
enum NpmCommand {
    /// npm install and npm run build
    Updates,
}

pub(crate) fn run(args: NpmArgs, session: &mut Session) -> CmdResult<TaskReport> {
    match args.command {
        NpmCommand::Updates => npm::npm_updates(&mut session.ctx, session.level)?,
    }
    Ok((session.report("npm.updates"), 0))
}
