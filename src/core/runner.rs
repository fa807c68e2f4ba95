//! Structured commands and the runner seam every task goes through.

use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::log;
use crate::shell;

/// A program plus its argument list. Never interpolated into a shell string
/// except for display and for the remote command handed to `ssh`, where every
/// argument is quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-quoted command line.
    pub fn to_command_line(&self) -> String {
        let mut line = shell::quote_arg(&self.program);
        if !self.args.is_empty() {
            line.push(' ');
            line.push_str(&shell::quote_args(&self.args));
        }
        line
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

/// How a command is attached to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Output streams to the terminal; no TTY is requested.
    Batch,
    /// Needs a pseudo-terminal (interactive shells).
    Interactive,
}

/// Runs commands against a target context.
///
/// A non-zero exit must come back as an error so the calling task halts.
pub trait CommandRunner {
    fn run(&mut self, spec: &CommandSpec, mode: RunMode) -> Result<()>;
}

/// Run a batch command, logging its command line first when `titled`.
pub fn run_titled(
    runner: &mut dyn CommandRunner,
    spec: &CommandSpec,
    level: u32,
    titled: bool,
) -> Result<()> {
    if titled {
        log::log(&spec.to_command_line(), level);
    }
    runner.run(spec, RunMode::Batch)
}

/// In-memory runner for task tests.
#[cfg(test)]
pub(crate) mod recorder {
    use super::{CommandRunner, CommandSpec, RunMode};
    use crate::error::{CommandFailedDetails, Error, Result};

    #[derive(Default)]
    pub(crate) struct Recorder {
        pub calls: Vec<(String, RunMode)>,
        /// Command line that exits non-zero when reached.
        pub fail_on: Option<String>,
    }

    impl Recorder {
        pub fn failing_on(line: &str) -> Self {
            Self {
                calls: Vec::new(),
                fail_on: Some(line.to_string()),
            }
        }

        pub fn lines(&self) -> Vec<&str> {
            self.calls.iter().map(|(line, _)| line.as_str()).collect()
        }
    }

    impl CommandRunner for Recorder {
        fn run(&mut self, spec: &CommandSpec, mode: RunMode) -> Result<()> {
            let line = spec.to_command_line();
            self.calls.push((line.clone(), mode));
            if self.fail_on.as_deref() == Some(line.as_str()) {
                return Err(Error::command_failed(CommandFailedDetails {
                    command: line,
                    exit_code: 1,
                    target: "recorder".to_string(),
                }));
            }
            Ok(())
        }
    }
}
