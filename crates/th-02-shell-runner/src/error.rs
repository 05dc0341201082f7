//! Error types for the shell runner.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::StreamKind;

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The working directory does not exist or is not a directory.
    #[error("Invalid working directory: {}", .0.display())]
    InvalidWorkingDirectory(PathBuf),

    /// The subprocess could not be created.
    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        /// Command line that was being spawned
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Reading one output stream failed. Logged by the drain task, never
    /// returned from a run.
    #[error("Failed to read {stream} of `{command}`: {source}")]
    StreamRead {
        /// Command line whose stream failed
        command: String,
        /// Which stream failed
        stream: StreamKind,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the subprocess to exit failed.
    #[error("Failed to wait for `{command}`: {source}")]
    Wait {
        /// Command line being awaited
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}
