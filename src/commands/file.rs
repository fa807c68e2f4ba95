use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::{IsTerminal, Read};

use ztasks::io::{expand_home, write_file_if_changed};

use super::{CmdResult, Session};

#[derive(Args)]
pub struct FileArgs {
    #[command(subcommand)]
    command: FileCommand,
}

#[derive(Subcommand)]
enum FileCommand {
    /// Write a file only if its content changes (~ is expanded)
    Write {
        /// Target path
        path: String,

        /// Content to write (default: read from stdin)
        #[arg(long)]
        content: Option<String>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileWriteOutput {
    pub path: String,
    pub written: bool,
}

fn read_stdin() -> ztasks::Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(ztasks::Error::validation_invalid_argument(
            "content",
            "Pass --content or pipe the content on stdin",
            None,
        ));
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .map_err(|e| ztasks::Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
    Ok(buf)
}

pub(crate) fn run(args: FileArgs, _session: &mut Session) -> CmdResult<FileWriteOutput> {
    match args.command {
        FileCommand::Write { path, content } => {
            let content = match content {
                Some(content) => content,
                None => read_stdin()?,
            };
            let written = write_file_if_changed(&path, &content)?;
            Ok((
                FileWriteOutput {
                    path: expand_home(&path).display().to_string(),
                    written,
                },
                0,
            ))
        }
    }
}
