//! # Runtime Constant
//!
//! A value that changes at known runtime upgrades.

use std::collections::BTreeMap;

/// Runtime version of the target network.
pub type RuntimeVersion = u32;

/// Step function from runtime version to value.
///
/// Breakpoints are stored as a small association list sorted by ascending
/// version. Constants rarely carry more than a handful of breakpoints, so
/// lookup is a linear scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConstant<V> {
    breakpoints: Vec<(RuntimeVersion, V)>,
}

impl<V> RuntimeConstant<V> {
    /// Build a constant from `(minimum_version, value)` pairs.
    ///
    /// Pairs may be given in any order. If a version appears twice the later
    /// pair wins.
    pub fn new(entries: impl IntoIterator<Item = (RuntimeVersion, V)>) -> Self {
        let sorted: BTreeMap<RuntimeVersion, V> = entries.into_iter().collect();
        Self {
            breakpoints: sorted.into_iter().collect(),
        }
    }

    /// Constant with a single value that applies from version 0 onward.
    pub fn fixed(value: V) -> Self {
        Self {
            breakpoints: vec![(0, value)],
        }
    }

    /// Value in effect at `version`, or `None` if every breakpoint is newer.
    pub fn at(&self, version: RuntimeVersion) -> Option<&V> {
        let mut current = None;
        for (since, value) in &self.breakpoints {
            if *since > version {
                break;
            }
            current = Some(value);
        }
        current
    }

    /// Lowest registered version.
    pub fn earliest(&self) -> Option<RuntimeVersion> {
        self.breakpoints.first().map(|(since, _)| *since)
    }

    /// Registered versions in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = RuntimeVersion> + '_ {
        self.breakpoints.iter().map(|(since, _)| *since)
    }
}
