//! Shell Runner Service
//!
//! Spawns the subprocess, attaches one drain task per output stream and
//! joins both before reporting the exit outcome.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn, Level};

use crate::adapters::TracingSink;
use crate::domain::{CommandLine, ExitOutcome, RunOptions, StreamKind};
use crate::error::ShellError;
use crate::ports::{CommandRunner, OutputSink};

const DEFAULT_SHELL: &str = "sh";

/// Subprocess runner backed by `tokio::process`.
#[derive(Clone)]
pub struct ShellRunner {
    shell: PathBuf,
    sink: Arc<dyn OutputSink>,
}

impl ShellRunner {
    /// Runner that logs through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Runner that sends output to `sink`.
    pub fn with_sink(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
            sink,
        }
    }

    /// Use a different shell for [`CommandLine::Shell`] commands.
    pub fn with_shell(mut self, shell: impl AsRef<Path>) -> Self {
        self.shell = shell.as_ref().to_path_buf();
        self
    }

    fn build(&self, command: &CommandLine, options: &RunOptions) -> Command {
        let mut cmd = match command {
            CommandLine::Shell(script) => {
                let mut cmd = Command::new(&self.shell);
                cmd.arg("-c").arg(script);
                cmd
            }
            CommandLine::Exec { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
        };

        cmd.current_dir(&options.working_dir)
            .envs(&options.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn spawn_drain<R>(
        &self,
        reader: Option<R>,
        stream: StreamKind,
        level: Level,
        label: &Arc<str>,
    ) -> Option<JoinHandle<usize>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        reader.map(|reader| {
            tokio::spawn(drain(
                reader,
                stream,
                level,
                Arc::clone(label),
                Arc::clone(&self.sink),
            ))
        })
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        command: &CommandLine,
        options: &RunOptions,
    ) -> Result<ExitOutcome, ShellError> {
        match tokio::fs::metadata(&options.working_dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err(ShellError::InvalidWorkingDirectory(
                    options.working_dir.clone(),
                ))
            }
        }

        let command_text = command.to_string();
        let label: Arc<str> = options
            .label
            .clone()
            .unwrap_or_else(|| command_text.clone())
            .into();

        debug!("[th-02] Spawning `{}` in {:?}", command_text, options.working_dir);

        let mut child = self
            .build(command, options)
            .spawn()
            .map_err(|source| ShellError::SpawnFailed {
                command: command_text.clone(),
                source,
            })?;

        let stdout_task =
            self.spawn_drain(child.stdout.take(), StreamKind::Stdout, options.log_level, &label);
        let stderr_task =
            self.spawn_drain(child.stderr.take(), StreamKind::Stderr, Level::ERROR, &label);

        let waited = child.wait().await;
        if waited.is_err() {
            // Closing the pipes is what lets the drains finish.
            let _ = child.start_kill();
        }
        let outcome = finish(waited, stdout_task, stderr_task, &command_text, &label).await?;

        debug!("[th-02] `{}` finished: {}", label, outcome);
        Ok(outcome)
    }
}

/// Read `reader` line by line until end-of-stream or the first read error.
///
/// Returns the number of lines handed to the sink. The reader is dropped on
/// return.
async fn drain<R>(
    reader: R,
    stream: StreamKind,
    level: Level,
    label: Arc<str>,
    sink: Arc<dyn OutputSink>,
) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(256);
    let mut emitted = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim();
                if !line.is_empty() {
                    sink.emit(&label, stream, level, line);
                    emitted += 1;
                }
            }
            Err(source) => {
                let err = ShellError::StreamRead {
                    command: label.to_string(),
                    stream,
                    source,
                };
                warn!("[th-02] {}", err);
                break;
            }
        }
    }

    emitted
}

/// Join both drains, then turn the wait result into an outcome. The drains
/// are joined on the error path too, so no reader outlives the run.
async fn finish(
    waited: std::io::Result<ExitStatus>,
    stdout_task: Option<JoinHandle<usize>>,
    stderr_task: Option<JoinHandle<usize>>,
    command_text: &str,
    label: &str,
) -> Result<ExitOutcome, ShellError> {
    let stdout_lines = join_drain(stdout_task, StreamKind::Stdout, label).await;
    let stderr_lines = join_drain(stderr_task, StreamKind::Stderr, label).await;

    let status = waited.map_err(|source| ShellError::Wait {
        command: command_text.to_string(),
        source,
    })?;

    #[cfg(unix)]
    let signal = {
        use std::os::unix::process::ExitStatusExt;
        status.signal()
    };
    #[cfg(not(unix))]
    let signal = None;

    Ok(ExitOutcome {
        code: status.code(),
        signal,
        stdout_lines,
        stderr_lines,
    })
}

async fn join_drain(task: Option<JoinHandle<usize>>, stream: StreamKind, label: &str) -> usize {
    let Some(task) = task else {
        return 0;
    };
    match task.await {
        Ok(lines) => lines,
        Err(e) => {
            error!("[th-02] {} drain task for `{}` failed: {}", stream, label, e);
            0
        }
    }
}
