//! # Domain Module
//!
//! Per-component run state and per-operation reports.

pub mod report;
pub mod state;

pub use report::{Action, ComponentResult, OperationReport};
pub use state::ComponentRunState;
