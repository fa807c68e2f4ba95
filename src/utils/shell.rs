//! Shell quoting for display and for commands sent to a remote shell.

use crate::error::{Error, Result};

/// Characters that force an argument into single quotes.
const SHELL_META: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}', '<',
    '>', '|', '&', ';', '#', '~',
];

/// Quote a single argument for a POSIX shell.
/// - Empty strings become `''`
/// - Strings with shell metacharacters are wrapped in single quotes
/// - Embedded single quotes become `'\''`
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    if !arg.contains(SHELL_META) {
        return arg.to_string();
    }

    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Quote and join arguments into one command line.
pub fn quote_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote_arg(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a single space-containing argument into words.
///
/// `ztasks docker compose "up db -d"` and `ztasks docker compose up db -d`
/// both become `["up", "db", "-d"]`.
pub fn normalize_args(args: &[String]) -> Vec<String> {
    if args.len() == 1 && args[0].contains(' ') {
        args[0].split_whitespace().map(|s| s.to_string()).collect()
    } else {
        args.to_vec()
    }
}

/// Split one command string into words using POSIX shell quoting rules.
///
/// `sh -c 'echo a b'` becomes `["sh", "-c", "echo a b"]`.
pub fn split_command(field: &str, command: &str) -> Result<Vec<String>> {
    shell_words::split(command).map_err(|e| {
        Error::validation_invalid_argument(
            field,
            format!("Cannot split command: {}", e),
            Some(command.to_string()),
        )
    })
}
