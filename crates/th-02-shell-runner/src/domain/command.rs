//! Command lines and per-run options.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::Level;

/// A command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Interpreted by the runner's shell (`sh -c <script>`).
    Shell(String),
    /// Executed directly, without a shell.
    Exec {
        /// Program name or path
        program: String,
        /// Arguments passed verbatim
        args: Vec<String>,
    },
}

impl CommandLine {
    /// Shell script form.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::Shell(script.into())
    }

    /// Direct execution form.
    pub fn exec<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Shell(script) => f.write_str(script),
            CommandLine::Exec { program, args } => {
                f.write_str(program)?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                Ok(())
            }
        }
    }
}

/// Output channel of a subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// Options for a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the subprocess starts in. Must exist.
    pub working_dir: PathBuf,
    /// Variables layered over the inherited environment. Overlay keys win.
    pub env: BTreeMap<String, String>,
    /// Severity for stdout lines. Stderr is always logged at `ERROR`.
    pub log_level: Level,
    /// Short name used in log lines instead of the full command.
    pub label: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            env: BTreeMap::new(),
            log_level: Level::INFO,
            label: None,
        }
    }
}

impl RunOptions {
    /// Options rooted at `working_dir`.
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Add one overlay variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add several overlay variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the stdout severity.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
