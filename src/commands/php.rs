use clap::{Args, Subcommand};

use ztasks::php;

use super::{CmdResult, Session, TaskReport};

#[derive(Args)]
pub struct PhpArgs {
    #[command(subcommand)]
    command: PhpCommand,
}

#[derive(Subcommand)]
enum PhpCommand {
    /// composer update for lib/pkp
    ComposerUpdate,
}

pub(crate) fn run(args: PhpArgs, session: &mut Session) -> CmdResult<TaskReport> {
    match args.command {
        PhpCommand::ComposerUpdate => php::composer_update(&mut session.ctx, session.level)?,
    }
    Ok((session.report("php.composer_update"), 0))
}
