//! Terminal detection for interactive commands.

use std::io::{self, IsTerminal};

/// An interactive shell needs a terminal on both stdin and stdout.
pub fn require_tty_for_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}
