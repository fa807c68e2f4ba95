// Task modules
pub mod docker;
pub mod git;
pub mod npm;
pub mod php;
pub mod workflows;

// Execution and base utilities
pub mod config;
pub mod context;
pub mod error;
pub mod log;
pub mod prompt;
pub mod runner;

pub(crate) mod paths;

// Re-export common types for convenience
pub use config::TaskConfig;
pub use context::{Context, Target};
pub use error::{Error, ErrorCode, Result};
pub use runner::{CommandRunner, CommandSpec, RunMode};
