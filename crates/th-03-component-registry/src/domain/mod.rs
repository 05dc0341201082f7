//! # Domain Module

pub mod identity;

pub use identity::{ComponentIdentity, ConstantBinding};
