//! # Operation Reports
//!
//! Per-component results of a multi-component launch or stop.

use std::fmt;

use super::state::ComponentRunState;
use crate::error::LifecycleError;

/// Operation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start components
    Launch,
    /// Remove components
    Stop,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Launch => f.write_str("launch"),
            Action::Stop => f.write_str("stop"),
        }
    }
}

/// Result for one requested component.
#[derive(Debug)]
pub struct ComponentResult {
    /// Requested option name
    pub option_name: String,
    /// State after the operation
    pub state: ComponentRunState,
    /// Whether the controller had to act (false for skips and no-ops)
    pub changed: bool,
    /// Failure cause, if any
    pub error: Option<LifecycleError>,
}

impl ComponentResult {
    /// The operation moved the component to `state`.
    pub fn changed(option_name: impl Into<String>, state: ComponentRunState) -> Self {
        Self {
            option_name: option_name.into(),
            state,
            changed: true,
            error: None,
        }
    }

    /// Nothing to do; the component stays in `state`.
    pub fn unchanged(option_name: impl Into<String>, state: ComponentRunState) -> Self {
        Self {
            option_name: option_name.into(),
            state,
            changed: false,
            error: None,
        }
    }

    /// The operation failed for this component.
    pub fn failed(option_name: impl Into<String>, error: LifecycleError) -> Self {
        Self {
            option_name: option_name.into(),
            state: ComponentRunState::Failed,
            changed: false,
            error: Some(error),
        }
    }

    /// No error recorded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate of a multi-component operation.
#[derive(Debug)]
pub struct OperationReport {
    /// Operation kind
    pub action: Action,
    /// One entry per distinct requested name, in processing order
    pub results: Vec<ComponentResult>,
}

impl OperationReport {
    /// Empty report.
    pub fn new(action: Action) -> Self {
        Self {
            action,
            results: Vec::new(),
        }
    }

    /// Append a result.
    pub fn push(&mut self, result: ComponentResult) {
        self.results.push(result);
    }

    /// Successful results.
    pub fn succeeded(&self) -> impl Iterator<Item = &ComponentResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Failed results.
    pub fn failed(&self) -> impl Iterator<Item = &ComponentResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Whether every component succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.results.iter().all(ComponentResult::is_success)
    }

    /// Result for `option_name`.
    pub fn get(&self, option_name: &str) -> Option<&ComponentResult> {
        self.results.iter().find(|r| r.option_name == option_name)
    }

    /// All-or-nothing policy: any failure turns the report into an error.
    pub fn into_result(self) -> Result<Self, LifecycleError> {
        if self.is_complete_success() {
            return Ok(self);
        }
        Err(LifecycleError::PartialFailure {
            action: self.action,
            failed: self.failed().map(|r| r.option_name.clone()).collect(),
        })
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} succeeded, {} failed",
            self.action,
            self.succeeded().count(),
            self.failed().count()
        )?;
        for result in &self.results {
            match &result.error {
                None if result.changed => writeln!(f, "  ok      {} -> {}", result.option_name, result.state)?,
                None => writeln!(f, "  skipped {} ({})", result.option_name, result.state)?,
                Some(err) => writeln!(f, "  FAILED  {}: {}", result.option_name, err)?,
            }
        }
        Ok(())
    }
}
