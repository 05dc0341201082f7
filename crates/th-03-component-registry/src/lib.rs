//! # TH-03 Component Registry
//!
//! Static catalog of the infrastructure components the harness can launch.
//!
//! **Subsystem ID:** 03
//!
//! | Option | Component | Consumes |
//! |--------|-----------|----------|
//! | `node` | Chain Node | `block_time_ms` |
//! | `relayer` | Relayer | `relayer_poll_interval_ms`, `challenge_period_secs`, `consensus_update_frequency_secs` |
//!
//! The registry is built once at startup and never mutated. Declaration
//! order matters: components launch in it and tear down in reverse.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod error;
pub mod registry;

pub use domain::{ComponentIdentity, ConstantBinding};
pub use error::RegistryError;
pub use registry::{ComponentRegistry, NODE, RELAYER};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
