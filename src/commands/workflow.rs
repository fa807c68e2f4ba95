use clap::{Args, Subcommand};
use std::io;

use ztasks::workflows;

use super::{CmdResult, Session, TaskReport};

#[derive(Args)]
pub struct WorkflowArgs {
    #[command(subcommand)]
    command: WorkflowCommand,
}

#[derive(Subcommand)]
enum WorkflowCommand {
    /// Rebase the working branch on upstream, rebuild, force-push
    RebaseOnUpstream {
        /// Base branch (default: config baseBranch)
        #[arg(long)]
        base: Option<String>,

        /// Working branch (default: config branch)
        #[arg(long)]
        branch: Option<String>,
    },
    /// Restore the database from its latest backup (asks for confirmation)
    DbRestore,
}

pub(crate) fn run(args: WorkflowArgs, session: &mut Session) -> CmdResult<TaskReport> {
    let task = match args.command {
        WorkflowCommand::RebaseOnUpstream { base, branch } => {
            let base = base.unwrap_or_else(|| session.config.base_branch.clone());
            let branch = branch.unwrap_or_else(|| session.config.branch.clone());
            workflows::rebase_on_upstream(&mut session.ctx, &base, &branch, session.level)?;
            "workflow.rebase_on_upstream"
        }
        WorkflowCommand::DbRestore => {
            let stdin = io::stdin();
            let mut stderr = io::stderr();
            workflows::db_restore(
                &mut session.ctx,
                &session.config,
                &mut stdin.lock(),
                &mut stderr,
                session.level,
            )?;
            "workflow.db_restore"
        }
    };

    Ok((session.report(task), 0))
}
