use clap::{Args, Subcommand};

use ztasks::git;

use super::{CmdResult, Session, TaskReport};

#[derive(Args)]
pub struct GitArgs {
    #[command(subcommand)]
    command: GitCommand,
}

#[derive(Subcommand)]
enum GitCommand {
    /// checkout base, pull --ff-only from upstream, push, checkout branch, rebase
    Rebase {
        /// Base branch to pull from upstream
        #[arg(long)]
        base: Option<String>,

        /// Branch to rebase onto the base branch
        #[arg(long)]
        branch: Option<String>,
    },
    /// git submodule update --init --recursive
    SubmoduleUpdate,
}

pub(crate) fn run(args: GitArgs, session: &mut Session) -> CmdResult<TaskReport> {
    let task = match args.command {
        GitCommand::Rebase { base, branch } => {
            git::rebase(
                &mut session.ctx,
                &base.unwrap_or_default(),
                &branch.unwrap_or_default(),
                session.level,
            )?;
            "git.rebase"
        }
        GitCommand::SubmoduleUpdate => {
            git::submodule_update(&mut session.ctx, session.level)?;
            "git.submodule_update"
        }
    };

    Ok((session.report(task), 0))
}
