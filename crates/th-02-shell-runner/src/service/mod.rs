//! # Service Layer

pub mod shell_runner;

pub use shell_runner::ShellRunner;
