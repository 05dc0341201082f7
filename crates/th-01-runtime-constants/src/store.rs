//! # Constant Store
//!
//! Immutable table of versioned constants keyed by network profile.
//!
//! The store is built once at startup and shared by reference (or `Arc`)
//! with every consumer. It is never mutated after construction.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{RuntimeConstant, RuntimeVersion};
use crate::error::ConstantsError;

/// Constant names known to the built-in table.
pub mod names {
    /// Target block production interval of the chain node.
    pub const BLOCK_TIME_MS: &str = "block_time_ms";
    /// How often the relayer polls both chains for new messages.
    pub const RELAYER_POLL_INTERVAL_MS: &str = "relayer_poll_interval_ms";
    /// Fraud-proof challenge window applied to relayed consensus updates.
    pub const CHALLENGE_PERIOD_SECS: &str = "challenge_period_secs";
    /// Minimum spacing between consensus client updates.
    pub const CONSENSUS_UPDATE_FREQUENCY_SECS: &str = "consensus_update_frequency_secs";
}

/// Profile names known to the built-in table.
pub mod profiles {
    /// Single-machine development network.
    pub const LOCAL: &str = "local";
    /// Shared public test network.
    pub const TESTNET: &str = "testnet";
}

type ProfileTable = HashMap<String, RuntimeConstant<u64>>;

/// Read-only lookup of versioned constants.
#[derive(Debug, Clone, Default)]
pub struct ConstantStore {
    profiles: HashMap<String, ProfileTable>,
}

impl ConstantStore {
    /// Start building a store.
    pub fn builder() -> ConstantStoreBuilder {
        ConstantStoreBuilder::default()
    }

    /// Store holding the harness's built-in profiles.
    pub fn builtin() -> Self {
        use names::*;

        Self::builder()
            .constant(profiles::LOCAL, BLOCK_TIME_MS, RuntimeConstant::fixed(6_000))
            .constant(
                profiles::LOCAL,
                RELAYER_POLL_INTERVAL_MS,
                RuntimeConstant::new([(0, 6_000), (1_200, 3_000)]),
            )
            .constant(profiles::LOCAL, CHALLENGE_PERIOD_SECS, RuntimeConstant::fixed(0))
            .constant(
                profiles::LOCAL,
                CONSENSUS_UPDATE_FREQUENCY_SECS,
                RuntimeConstant::new([(0, 60), (1_100, 30)]),
            )
            .constant(
                profiles::TESTNET,
                BLOCK_TIME_MS,
                RuntimeConstant::new([(0, 12_000), (1_100, 6_000)]),
            )
            .constant(
                profiles::TESTNET,
                RELAYER_POLL_INTERVAL_MS,
                RuntimeConstant::fixed(12_000),
            )
            .constant(
                profiles::TESTNET,
                CHALLENGE_PERIOD_SECS,
                RuntimeConstant::new([(0, 3_600), (1_200, 1_800)]),
            )
            .constant(
                profiles::TESTNET,
                CONSENSUS_UPDATE_FREQUENCY_SECS,
                RuntimeConstant::fixed(300),
            )
            .build()
    }

    /// Resolve `constant` under `profile` for the given runtime version.
    ///
    /// # Errors
    ///
    /// - [`ConstantsError::UnknownProfile`] if the profile is absent
    /// - [`ConstantsError::UnknownConstant`] if the constant is absent
    /// - [`ConstantsError::NoApplicableVersion`] if every breakpoint is newer
    ///   than `version`
    pub fn resolve(
        &self,
        profile: &str,
        constant: &str,
        version: RuntimeVersion,
    ) -> Result<u64, ConstantsError> {
        let table = self
            .profiles
            .get(profile)
            .ok_or_else(|| ConstantsError::UnknownProfile(profile.to_string()))?;

        let entry = table
            .get(constant)
            .ok_or_else(|| ConstantsError::UnknownConstant {
                profile: profile.to_string(),
                constant: constant.to_string(),
            })?;

        let value = entry
            .at(version)
            .copied()
            .ok_or_else(|| ConstantsError::NoApplicableVersion {
                constant: constant.to_string(),
                version,
                earliest: entry.earliest(),
            })?;

        debug!(
            "[th-01] Resolved {}/{} @ v{} = {}",
            profile, constant, version, value
        );
        Ok(value)
    }

    /// Profile names, sorted.
    pub fn profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Constant names registered under `profile`, sorted.
    pub fn constants(&self, profile: &str) -> Result<Vec<&str>, ConstantsError> {
        let table = self
            .profiles
            .get(profile)
            .ok_or_else(|| ConstantsError::UnknownProfile(profile.to_string()))?;
        let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Whether `profile` exists.
    pub fn has_profile(&self, profile: &str) -> bool {
        self.profiles.contains_key(profile)
    }
}

/// Builder for [`ConstantStore`].
#[derive(Debug, Default)]
pub struct ConstantStoreBuilder {
    profiles: BTreeMap<String, ProfileTable>,
}

impl ConstantStoreBuilder {
    /// Register `constant` under `profile`, replacing any earlier definition.
    pub fn constant(
        mut self,
        profile: &str,
        constant: &str,
        value: RuntimeConstant<u64>,
    ) -> Self {
        self.profiles
            .entry(profile.to_string())
            .or_default()
            .insert(constant.to_string(), value);
        self
    }

    /// Freeze the table.
    pub fn build(self) -> ConstantStore {
        ConstantStore {
            profiles: self.profiles.into_iter().collect(),
        }
    }
}
