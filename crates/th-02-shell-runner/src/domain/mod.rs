//! # Domain Module
//!
//! Command lines, run options and exit outcomes.

pub mod command;
pub mod outcome;

pub use command::{CommandLine, RunOptions, StreamKind};
pub use outcome::ExitOutcome;
