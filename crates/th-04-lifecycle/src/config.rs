//! # Harness Configuration
//!
//! Every knob has a default and an environment override. The CLI layers its
//! flags on top of [`HarnessConfig::from_env`].
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TH_NETWORK_NAME` | `th-testnet` |
//! | `TH_PROFILE` | `local` |
//! | `TH_RUNTIME_VERSION` | `0` |
//! | `TH_CONTAINER_CLI` | `docker` |
//! | `TH_WORKDIR` | `.` |
//! | `TH_COMMAND_LOG_LEVEL` | `info` |
//! | `TH_CONFIRM_TIMEOUT_SECS` | `10` |
//! | `TH_READINESS_ATTEMPTS` | `10` |
//! | `TH_READINESS_INTERVAL_MS` | `500` |

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::Level;

use th_01_runtime_constants::{profiles, RuntimeVersion};

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An integer setting is not a plain base-10 number.
    #[error("{key}: {reason}")]
    InvalidInteger {
        /// Setting name
        key: String,
        /// Parser message
        reason: String,
    },

    /// A log level setting is not one of trace, debug, info, warn, error.
    #[error("{key}: invalid log level '{value}'")]
    InvalidLogLevel {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
    },
}

/// Strict base-10 parsing for integer flags and settings.
///
/// Accepts ASCII digits only: no sign, no radix prefix, no surrounding
/// whitespace, no separators.
pub fn parse_base10<T>(value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value.is_empty() {
        return Err("expected a base-10 integer, got an empty value".to_string());
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected a base-10 integer, got '{value}'"));
    }
    value
        .parse::<T>()
        .map_err(|e| format!("'{value}' is out of range: {e}"))
}

/// Complete harness configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Shared container network every component joins.
    pub network_name: String,
    /// Constant store profile.
    pub profile: String,
    /// Target runtime version for constant resolution.
    pub runtime_version: RuntimeVersion,
    /// Container CLI program.
    pub container_cli: String,
    /// Working directory for every command.
    pub working_dir: PathBuf,
    /// Variables layered over the inherited environment of every command.
    pub env_overlay: BTreeMap<String, String>,
    /// Severity for command stdout.
    pub command_log_level: Level,
    /// How long the confirmation prompt waits.
    pub confirm_timeout: Duration,
    /// Answer used when the prompt times out or input is blank.
    pub confirm_default: bool,
    /// Readiness probes after a start command. Zero disables probing.
    pub readiness_attempts: u32,
    /// Delay between readiness probes.
    pub readiness_interval: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            network_name: "th-testnet".to_string(),
            profile: profiles::LOCAL.to_string(),
            runtime_version: 0,
            container_cli: "docker".to_string(),
            working_dir: PathBuf::from("."),
            env_overlay: BTreeMap::new(),
            command_log_level: Level::INFO,
            confirm_timeout: Duration::from_secs(10),
            confirm_default: true,
            readiness_attempts: 10,
            readiness_interval: Duration::from_millis(500),
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `TH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("TH_NETWORK_NAME") {
            config.network_name = v;
        }
        if let Some(v) = lookup("TH_PROFILE") {
            config.profile = v;
        }
        if let Some(v) = lookup("TH_RUNTIME_VERSION") {
            config.runtime_version = integer("TH_RUNTIME_VERSION", &v)?;
        }
        if let Some(v) = lookup("TH_CONTAINER_CLI") {
            config.container_cli = v;
        }
        if let Some(v) = lookup("TH_WORKDIR") {
            config.working_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("TH_COMMAND_LOG_LEVEL") {
            config.command_log_level =
                v.parse().map_err(|_| ConfigError::InvalidLogLevel {
                    key: "TH_COMMAND_LOG_LEVEL".to_string(),
                    value: v.clone(),
                })?;
        }
        if let Some(v) = lookup("TH_CONFIRM_TIMEOUT_SECS") {
            config.confirm_timeout =
                Duration::from_secs(integer("TH_CONFIRM_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("TH_READINESS_ATTEMPTS") {
            config.readiness_attempts = integer("TH_READINESS_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("TH_READINESS_INTERVAL_MS") {
            config.readiness_interval =
                Duration::from_millis(integer("TH_READINESS_INTERVAL_MS", &v)?);
        }

        Ok(config)
    }
}

fn integer<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_base10(value).map_err(|reason| ConfigError::InvalidInteger {
        key: key.to_string(),
        reason,
    })
}
