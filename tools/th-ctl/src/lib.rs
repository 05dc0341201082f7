//! # th-ctl: Testnet Harness Control
//!
//! Command line front end for the lifecycle controller.
//!
//! ```text
//! th-ctl [GLOBAL FLAGS] <COMMAND>
//!
//!   launch <COMPONENT>... | --all     start components on the shared network
//!   stop   <COMPONENT>... | --all     remove components (reverse order)
//!          [--remove-network]
//!   status [--json]                   probe the host and print every state
//!   list   [--json]                   print the registry and resolved constants
//! ```
//!
//! `launch` and `stop` ask for confirmation first unless `--yes` is given.
//! The prompt times out to "yes", so unattended runs still make progress.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command, GlobalArgs};
pub use commands::execute;
