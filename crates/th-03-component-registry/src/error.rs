//! Error types for the component registry.

use thiserror::Error;

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No component is registered under the option name.
    #[error("Unknown component '{name}' (known: {known})")]
    UnknownComponent {
        /// Requested option name
        name: String,
        /// Comma separated registered option names
        known: String,
    },

    /// Two entries share an option name.
    #[error("Duplicate component option name: {0}")]
    DuplicateComponent(String),
}
