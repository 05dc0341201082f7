//! # Service Layer

pub mod controller;

pub use controller::LifecycleController;
