//! # Ports
//!
//! - [`CommandRunner`]: driving port used by the lifecycle controller
//! - [`OutputSink`]: driven port receiving subprocess output lines

use async_trait::async_trait;
use tracing::Level;

use crate::domain::{CommandLine, ExitOutcome, RunOptions, StreamKind};
use crate::error::ShellError;

/// Runs command lines to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` and wait for it to exit.
    ///
    /// Returns the exit outcome whatever the exit code. Fails only when the
    /// command could not be started or awaited.
    async fn run(&self, command: &CommandLine, options: &RunOptions)
        -> Result<ExitOutcome, ShellError>;
}

/// Destination for subprocess output.
///
/// Called concurrently from both drain tasks; implementations must not
/// assume calls for one stream are serialised with the other.
pub trait OutputSink: Send + Sync + 'static {
    /// Receive one trimmed, non-empty line.
    fn emit(&self, label: &str, stream: StreamKind, level: Level, line: &str);
}
