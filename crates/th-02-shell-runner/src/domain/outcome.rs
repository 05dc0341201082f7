//! Result of a finished subprocess.

use std::fmt;

/// How a subprocess ended, plus what its drain tasks emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Terminating signal, if the process was killed (unix only).
    pub signal: Option<i32>,
    /// Non-empty lines emitted from stdout.
    pub stdout_lines: usize,
    /// Non-empty lines emitted from stderr.
    pub stderr_lines: usize,
}

impl ExitOutcome {
    /// Exit code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {code}"),
            (None, Some(signal)) => write!(f, "terminated by signal {signal}"),
            (None, None) => f.write_str("unknown exit status"),
        }
    }
}
