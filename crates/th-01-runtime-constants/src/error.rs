//! Error types for runtime constant resolution.

use crate::domain::RuntimeVersion;
use thiserror::Error;

/// Errors raised while resolving a versioned constant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstantsError {
    /// The network profile is not present in the table.
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// The constant is not defined under the profile.
    #[error("Unknown constant '{constant}' in profile '{profile}'")]
    UnknownConstant {
        /// Profile that was searched
        profile: String,
        /// Requested constant name
        constant: String,
    },

    /// Every registered version of the constant is newer than the target.
    #[error("No value of '{constant}' applies to runtime version {version} (earliest registered: {earliest:?})")]
    NoApplicableVersion {
        /// Requested constant name
        constant: String,
        /// Target runtime version
        version: RuntimeVersion,
        /// Lowest registered version key, if any
        earliest: Option<RuntimeVersion>,
    },
}
