//! Scripted command runner.
//!
//! Records every command it is asked to run and answers with exit codes
//! chosen by substring rules. Unmatched commands exit zero.

use async_trait::async_trait;
use parking_lot::Mutex;

use th_02_shell_runner::{CommandLine, CommandRunner, ExitOutcome, RunOptions, ShellError};

#[derive(Debug)]
enum Response {
    Exit(i32),
    SpawnError,
}

#[derive(Debug)]
struct Rule {
    pattern: String,
    response: Response,
    remaining: Option<usize>,
}

/// Mock runner for lifecycle tests.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `pattern` exit with `code`.
    pub fn exit_when(self, pattern: &str, code: i32) -> Self {
        self.rule(pattern, Response::Exit(code), None)
    }

    /// The next `times` commands containing `pattern` exit with `code`.
    pub fn exit_times(self, pattern: &str, code: i32, times: usize) -> Self {
        self.rule(pattern, Response::Exit(code), Some(times))
    }

    /// Commands containing `pattern` fail to spawn.
    pub fn spawn_error_when(self, pattern: &str) -> Self {
        self.rule(pattern, Response::SpawnError, None)
    }

    fn rule(self, pattern: &str, response: Response, remaining: Option<usize>) -> Self {
        self.rules.lock().push(Rule {
            pattern: pattern.to_string(),
            response,
            remaining,
        });
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of commands run so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Commands run so far that contain `pattern`.
    pub fn calls_matching(&self, pattern: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.contains(pattern))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(
        &self,
        command: &CommandLine,
        _options: &RunOptions,
    ) -> Result<ExitOutcome, ShellError> {
        let text = command.to_string();
        self.calls.lock().push(text.clone());

        let code = {
            let mut rules = self.rules.lock();
            let rule = rules
                .iter_mut()
                .find(|r| text.contains(&r.pattern) && r.remaining != Some(0));
            match rule {
                Some(rule) => {
                    if let Some(n) = rule.remaining.as_mut() {
                        *n -= 1;
                    }
                    match rule.response {
                        Response::Exit(code) => code,
                        Response::SpawnError => {
                            return Err(ShellError::SpawnFailed {
                                command: text,
                                source: std::io::Error::from(std::io::ErrorKind::NotFound),
                            })
                        }
                    }
                }
                None => 0,
            }
        };

        Ok(ExitOutcome {
            code: Some(code),
            signal: None,
            stdout_lines: 0,
            stderr_lines: 0,
        })
    }
}
