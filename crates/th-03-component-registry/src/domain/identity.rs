//! Component identity records.

use serde::{Deserialize, Serialize};

/// Deployment identity of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentIdentity {
    /// User-facing selector, unique within the registry.
    pub option_name: String,
    /// Container image reference.
    pub image_name: String,
    /// Human readable label.
    pub component_name: String,
    /// Runtime constants exported to the container.
    #[serde(default)]
    pub constants: Vec<ConstantBinding>,
}

/// Maps a runtime constant onto the environment variable the component reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantBinding {
    /// Constant name in the constant store.
    pub constant: String,
    /// Environment variable inside the container.
    pub env_var: String,
}

impl ComponentIdentity {
    /// Identity without constant bindings.
    pub fn new(
        option_name: impl Into<String>,
        image_name: impl Into<String>,
        component_name: impl Into<String>,
    ) -> Self {
        Self {
            option_name: option_name.into(),
            image_name: image_name.into(),
            component_name: component_name.into(),
            constants: Vec::new(),
        }
    }

    /// Export `constant` as `env_var`.
    pub fn with_constant(mut self, constant: impl Into<String>, env_var: impl Into<String>) -> Self {
        self.constants.push(ConstantBinding {
            constant: constant.into(),
            env_var: env_var.into(),
        });
        self
    }

    /// Container name inside `network`.
    ///
    /// Prefixing with the network keeps two harness networks on one host
    /// from colliding.
    pub fn container_name(&self, network: &str) -> String {
        format!("{}-{}", network, self.option_name)
    }
}
