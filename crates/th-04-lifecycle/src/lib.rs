//! # TH-04 Component Lifecycle
//!
//! Launches the requested components as containers joined to one shared
//! network and tears them down again.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## State Machine
//!
//! ```text
//!              launch                       stop
//! NotStarted ──────────▶ Starting ──▶ Running ──────▶ Stopping ──▶ Stopped
//!     │                     │                            │            │
//!     │ (observed)          └──────▶ Failed ◀────────────┘            │
//!     └────────────────────────────▶   │  ◀── launch retry / stop ────┘
//! ```
//!
//! - A failed component never aborts the others; every requested name gets
//!   its own [`ComponentResult`] in the [`OperationReport`].
//! - `stop` skips `NotStarted` and `Stopped` components without running
//!   anything, and tears down in reverse registry order.
//! - The network is created at most once per controller, and a concurrent
//!   creation by another process is tolerated.
//!
//! ## Module Structure
//!
//! ```text
//! th-04-lifecycle/
//! ├── domain/      # ComponentRunState, OperationReport
//! ├── adapters/    # DockerCli command builder, MockRunner
//! ├── service/     # LifecycleController
//! ├── namespace.rs # NetworkNamespace (idempotent create)
//! ├── prompt.rs    # confirmation with timeout + default
//! └── config.rs    # HarnessConfig, strict integer parsing
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod namespace;
pub mod prompt;
pub mod service;

pub use adapters::{DockerCli, MockRunner};
pub use config::{parse_base10, ConfigError, HarnessConfig};
pub use domain::{Action, ComponentResult, ComponentRunState, OperationReport};
pub use error::LifecycleError;
pub use namespace::NetworkNamespace;
pub use prompt::{confirm, confirm_stdin, parse_answer};
pub use service::LifecycleController;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
