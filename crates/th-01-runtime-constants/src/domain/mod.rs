//! # Domain Module
//!
//! The versioned value type and its resolution rule.

pub mod runtime_constant;

pub use runtime_constant::{RuntimeConstant, RuntimeVersion};
