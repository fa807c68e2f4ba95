use crate::error::Result;
use crate::runner::{run_titled, CommandRunner, CommandSpec};

/// Directory holding the composer.json of the pkp library.
pub const COMPOSER_WORKING_DIR: &str = "lib/pkp";

/// Update composer dependencies of the pkp library.
pub fn composer_update(ctx: &mut dyn CommandRunner, level: u32) -> Result<()> {
    let spec = CommandSpec::new("composer")
        .arg(format!("--working-dir={}", COMPOSER_WORKING_DIR))
        .arg("update");
    run_titled(ctx, &spec, level, true)
}
