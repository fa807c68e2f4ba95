//! Git tasks: rebase a working branch onto its upstream base.

use crate::error::Result;
use crate::log;
use crate::runner::{run_titled, CommandRunner, CommandSpec};
use crate::validation;

/// Remote the base branch is pulled from.
pub const UPSTREAM_REMOTE: &str = "upstream";

fn git<'a>(args: impl IntoIterator<Item = &'a str>) -> CommandSpec {
    CommandSpec::new("git").args(args)
}

/// The five rebase steps, in order.
pub fn rebase_steps(base_branch: &str, my_branch: &str) -> Vec<CommandSpec> {
    vec![
        git(["checkout", base_branch]),
        git(["pull", "--ff-only", UPSTREAM_REMOTE, base_branch]),
        git(["push"]),
        git(["checkout", my_branch]),
        git(["rebase", base_branch]),
    ]
}

/// Checkout base, fast-forward it from upstream, push it, checkout mine,
/// rebase mine onto base.
///
/// A diverged base or a rebase conflict fails the step and leaves the
/// repository as git left it.
pub fn rebase(
    ctx: &mut dyn CommandRunner,
    base_branch: &str,
    my_branch: &str,
    level: u32,
) -> Result<()> {
    let base_branch = validation::require_non_empty(base_branch, "base", "must provide --base branch")?;
    let my_branch = validation::require_non_empty(my_branch, "branch", "must provide --branch name")?;

    log::log(&format!("REBASE on {}:", base_branch), level);
    for step in rebase_steps(base_branch, my_branch) {
        run_titled(ctx, &step, level + 1, true)?;
    }
    Ok(())
}

pub fn submodule_update(ctx: &mut dyn CommandRunner, level: u32) -> Result<()> {
    run_titled(
        ctx,
        &git(["submodule", "update", "--init", "--recursive"]),
        level,
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::recorder::Recorder;

    #[test]
    fn rebase_issues_five_commands_in_order() {
        let mut rec = Recorder::default();
        rebase(&mut rec, "main", "feature1", 1).unwrap();
        assert_eq!(
            rec.lines(),
            vec![
                "git checkout main",
                "git pull --ff-only upstream main",
                "git push",
                "git checkout feature1",
                "git rebase main",
            ]
        );
    }

    #[test]
    fn failed_pull_halts_rebase() {
        let mut rec = Recorder::failing_on("git pull --ff-only upstream main");
        let err = rebase(&mut rec, "main", "feature1", 1).unwrap_err();
        assert_eq!(err.code.as_str(), "command.failed");
        assert_eq!(rec.calls.len(), 2);
    }

    #[test]
    fn rebase_requires_both_branches() {
        let mut rec = Recorder::default();
        assert!(rebase(&mut rec, "", "feature1", 1).is_err());
        assert!(rebase(&mut rec, "main", " ", 1).is_err());
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn branch_names_are_single_arguments() {
        let steps = rebase_steps("main", "feat; rm -rf ~");
        assert_eq!(steps[3].args, vec!["checkout", "feat; rm -rf ~"]);
        assert_eq!(steps[3].to_command_line(), "git checkout 'feat; rm -rf ~'");
    }

    #[test]
    fn submodule_update_initializes_recursively() {
        let mut rec = Recorder::default();
        submodule_update(&mut rec, 2).unwrap();
        assert_eq!(rec.lines(), vec!["git submodule update --init --recursive"]);
    }
}
