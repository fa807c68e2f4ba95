//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `shell` - Shell quoting
//! - `validation` - Precondition checks

pub mod io;
pub mod shell;
pub mod validation;
