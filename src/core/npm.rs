use crate::error::Result;
use crate::runner::{run_titled, CommandRunner, CommandSpec};

/// npm install, then npm run build.
pub fn npm_updates(ctx: &mut dyn CommandRunner, level: u32) -> Result<()> {
    run_titled(ctx, &CommandSpec::new("npm").arg("install"), level, true)?;
    run_titled(ctx, &CommandSpec::new("npm").args(["run", "build"]), level, true)
}
