//! Precondition checks.
//!
//! Every check runs before a task issues its first command. A failed check
//! returns a `validation.*` error; only `main` turns that into a process exit.

use crate::error::{Error, Result};

/// Fail when `condition` holds.
pub fn fail_if(condition: bool, field: &str, message: &str) -> Result<()> {
    if condition {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(())
    }
}

/// Fail unless `condition` holds.
pub fn fail_if_not(condition: bool, field: &str, message: &str) -> Result<()> {
    fail_if(!condition, field, message)
}

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    fail_if(trimmed.is_empty(), field, message)?;
    Ok(trimmed)
}

/// Require every named argument to be non-empty.
///
/// Reports all missing flags at once, e.g. `must provide --service --cmd`.
pub fn require_arguments(args: &[(&str, bool)]) -> Result<()> {
    let missing: Vec<String> = args
        .iter()
        .filter(|(_, present)| !present)
        .map(|(flag, _)| flag.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::validation_missing_argument(missing))
    }
}
