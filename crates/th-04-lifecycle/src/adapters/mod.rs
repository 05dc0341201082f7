//! # Adapters
//!
//! - [`DockerCli`]: builds container runtime command lines
//! - [`MockRunner`]: scripted [`CommandRunner`](th_02_shell_runner::CommandRunner) for tests

pub mod docker;
pub mod mock_runner;

pub use docker::DockerCli;
pub use mock_runner::MockRunner;
