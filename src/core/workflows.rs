//! Compound tasks built from the single-tool tasks.
//!
//! Steps run strictly in order and the first failure stops the workflow.
//! Nothing is rolled back: a failure after the rebase leaves the branch
//! rebased locally with dependencies not yet rebuilt, and a rerun repeats
//! every step.

use std::io::{BufRead, Write};

use crate::config::TaskConfig;
use crate::docker::{self, RESTORE_CONFIRMATION};
use crate::error::Result;
use crate::log;
use crate::prompt::confirm_to_continue;
use crate::runner::{run_titled, CommandRunner, CommandSpec};
use crate::{git, npm, php};

/// Rebase `branch` onto upstream `base_branch`, rebuild, and force-push.
pub fn rebase_on_upstream(
    ctx: &mut dyn CommandRunner,
    base_branch: &str,
    branch: &str,
    level: u32,
) -> Result<()> {
    log::log("REBASE ON UPSTREAM", level);
    git::rebase(ctx, base_branch, branch, level + 1)?;
    git::submodule_update(ctx, level + 1)?;
    php::composer_update(ctx, level + 1)?;
    npm::npm_updates(ctx, level + 1)?;
    run_titled(
        ctx,
        &CommandSpec::new("git").args(["push", "--force"]),
        level + 1,
        true,
    )?;
    log::log("rebase-on-upstream successful. DONE.", level + 1);
    Ok(())
}

/// Overwrite the database with the latest backup, after the operator
/// answers `y` on `input`.
pub fn db_restore<R: BufRead, W: Write>(
    ctx: &mut dyn CommandRunner,
    config: &TaskConfig,
    input: &mut R,
    output: &mut W,
    level: u32,
) -> Result<()> {
    log::log("DB RESTORE", level);
    log::log(
        &format!(
            "This replaces all data in service '{}' with the latest backup.",
            config.db_service
        ),
        level + 1,
    );
    confirm_to_continue(input, output)?;
    docker::db_restore_raw(ctx, config, RESTORE_CONFIRMATION)?;
    log::log("db-restore successful. DONE.", level + 1);
    Ok(())
}
