//! # Lifecycle Errors

use thiserror::Error;

use th_01_runtime_constants::ConstantsError;
use th_02_shell_runner::ShellError;
use th_03_component_registry::RegistryError;

use crate::config::ConfigError;
use crate::domain::{Action, ComponentRunState};

/// Lifecycle error types.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Component lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Constant resolution failed.
    #[error(transparent)]
    Constants(#[from] ConstantsError),

    /// Harness configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A probe command could not be run at all.
    #[error(transparent)]
    Shell(#[from] ShellError),

    /// The component did not reach `Running`.
    #[error("Failed to start {component}: {reason}")]
    ComponentStartFailed {
        /// Component option name
        component: String,
        /// What went wrong
        reason: String,
    },

    /// The component could not be removed.
    #[error("Failed to stop {component}: {reason}")]
    ComponentStopFailed {
        /// Component option name
        component: String,
        /// What went wrong
        reason: String,
    },

    /// The shared network could not be created or removed.
    #[error("Network '{network}' unavailable: {reason}")]
    Namespace {
        /// Network name
        network: String,
        /// What went wrong
        reason: String,
    },

    /// Illegal state change.
    #[error("Invalid state transition for {component}: {from} -> {to}")]
    InvalidTransition {
        /// Component option name
        component: String,
        /// Current state
        from: ComponentRunState,
        /// Attempted state
        to: ComponentRunState,
    },

    /// At least one component failed under an all-or-nothing policy.
    #[error("{action} incomplete, failed components: {}", .failed.join(", "))]
    PartialFailure {
        /// Operation that was run
        action: Action,
        /// Option names that failed
        failed: Vec<String>,
    },
}

impl LifecycleError {
    /// Whether this is an unknown component name.
    pub fn is_unknown_component(&self) -> bool {
        matches!(
            self,
            LifecycleError::Registry(RegistryError::UnknownComponent { .. })
        )
    }
}
