//! The registry itself.

use std::collections::HashSet;

use th_01_runtime_constants::names;

use crate::domain::ComponentIdentity;
use crate::error::RegistryError;

/// Chain node option name.
pub const NODE: &str = "node";
/// Relayer option name.
pub const RELAYER: &str = "relayer";

/// Immutable catalog of components, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    components: Vec<ComponentIdentity>,
}

impl ComponentRegistry {
    /// Registry from explicit entries.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateComponent`] if two entries share an option
    /// name.
    pub fn new(components: Vec<ComponentIdentity>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for c in &components {
            if !seen.insert(c.option_name.as_str()) {
                return Err(RegistryError::DuplicateComponent(c.option_name.clone()));
            }
        }
        Ok(Self { components })
    }

    /// The harness's built-in components: the chain node and the relayer.
    pub fn builtin() -> Self {
        Self {
            components: vec![
                ComponentIdentity::new(
                    NODE,
                    "ghcr.io/testnet-harness/chain-node:latest",
                    "Chain Node",
                )
                .with_constant(names::BLOCK_TIME_MS, "BLOCK_TIME_MS"),
                ComponentIdentity::new(
                    RELAYER,
                    "ghcr.io/testnet-harness/relayer:latest",
                    "Relayer",
                )
                .with_constant(names::RELAYER_POLL_INTERVAL_MS, "RELAYER_POLL_INTERVAL_MS")
                .with_constant(names::CHALLENGE_PERIOD_SECS, "CHALLENGE_PERIOD_SECS")
                .with_constant(
                    names::CONSENSUS_UPDATE_FREQUENCY_SECS,
                    "CONSENSUS_UPDATE_FREQUENCY_SECS",
                ),
            ],
        }
    }

    /// Identity registered under `option_name`.
    pub fn lookup(&self, option_name: &str) -> Result<&ComponentIdentity, RegistryError> {
        self.components
            .iter()
            .find(|c| c.option_name == option_name)
            .ok_or_else(|| RegistryError::UnknownComponent {
                name: option_name.to_string(),
                known: self.option_names().join(", "),
            })
    }

    /// Components in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentIdentity> {
        self.components.iter()
    }

    /// Option names in declaration order.
    pub fn option_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.option_name.as_str()).collect()
    }

    /// Declaration index of `option_name`.
    pub fn position(&self, option_name: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|c| c.option_name == option_name)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
