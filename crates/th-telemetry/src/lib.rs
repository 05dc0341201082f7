//! # Harness Telemetry
//!
//! Log subscriber setup shared by every harness binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use th_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TH_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `TH_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |
//! | `TH_SERVICE_NAME` | `testnet-harness` | Service name in log lines |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),
}

/// Log an event with a `component` field.
///
/// ```rust,ignore
/// log_component_event!(info, "relayer", "Container started", container = %name);
/// ```
#[macro_export]
macro_rules! log_component_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = %$component,
            $($($field)*,)?
            $msg
        )
    };
}
