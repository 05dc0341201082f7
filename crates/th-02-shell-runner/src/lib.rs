//! # TH-02 Shell Runner
//!
//! Runs a command line as a subprocess and streams both of its output
//! channels into the log while it runs.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Process Handle Lifecycle
//!
//! ```text
//! spawn ──┬── drain(stdout) ──▶ OutputSink @ configured level ──┐
//!         ├── drain(stderr) ──▶ OutputSink @ ERROR ─────────────┤
//!         └── wait() ───────────────────────────────────────────┴──▶ ExitOutcome
//! ```
//!
//! Each drain task owns its reader and drops it at end-of-stream. The outcome
//! is only returned once the process has exited and both drain tasks have
//! been joined, so no reader outlives a call to
//! [`CommandRunner::run`].
//!
//! The runner reports the exit code; deciding whether a non-zero exit is a
//! failure is the caller's job. There is no retry and no mid-run
//! cancellation at this layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{RecordedLine, RecordingSink, TracingSink};
pub use domain::{CommandLine, ExitOutcome, RunOptions, StreamKind};
pub use error::ShellError;
pub use ports::{CommandRunner, OutputSink};
pub use service::ShellRunner;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
