//! Framed status lines on stderr.
//!
//! A message at level `n` is wrapped in `max(12 - 2n, 1)` `#` marks on each
//! side, so nested steps read visibly narrower than the workflow around them.

use crossterm::style::Stylize;

const WIDEST_FRAME: u32 = 12;

/// Number of `#` marks on each side of a message at `level`.
pub fn frame_width(level: u32) -> usize {
    WIDEST_FRAME.saturating_sub(level.saturating_mul(2)).max(1) as usize
}

/// The uncoloured framed line, e.g. `########## REBASE ##########` at level 1.
pub fn frame(message: &str, level: u32) -> String {
    let marks = "#".repeat(frame_width(level));
    format!("{} {} {}", marks, message, marks)
}

/// Print a framed message to stderr on a blue background.
pub fn log(message: &str, level: u32) {
    eprintln!("{}", frame(message, level).on_blue());
}
