//! # Component Run State

use serde::Serialize;
use std::fmt;

/// Where a component is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentRunState {
    /// Never launched by this controller and not observed running.
    #[default]
    NotStarted,
    /// Start command issued, readiness not yet confirmed.
    Starting,
    /// Container confirmed running.
    Running,
    /// Remove command issued.
    Stopping,
    /// Container removed.
    Stopped,
    /// Last start or stop step failed. A container may still exist.
    Failed,
}

impl ComponentRunState {
    /// Check whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: ComponentRunState) -> bool {
        use ComponentRunState::*;
        matches!(
            (self, next),
            (NotStarted | Stopped | Failed, Starting)
                | (Starting, Running | Failed)
                | (Running | Failed, Stopping)
                | (Stopping, Stopped | Failed)
                // observed on the host before this controller touched it
                | (NotStarted, Running | Failed)
        )
    }

    /// Whether `stop` has anything to remove.
    pub fn needs_teardown(self) -> bool {
        matches!(self, ComponentRunState::Running | ComponentRunState::Failed)
    }
}

impl fmt::Display for ComponentRunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentRunState::NotStarted => "NotStarted",
            ComponentRunState::Starting => "Starting",
            ComponentRunState::Running => "Running",
            ComponentRunState::Stopping => "Stopping",
            ComponentRunState::Stopped => "Stopped",
            ComponentRunState::Failed => "Failed",
        };
        f.write_str(s)
    }
}
