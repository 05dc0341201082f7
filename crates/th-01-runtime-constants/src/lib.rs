//! # TH-01 Runtime Constants
//!
//! Configuration values that change between runtime upgrades of the target
//! network, resolved per network profile.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Domain + Store
//!
//! ## Resolution Rule
//!
//! A [`RuntimeConstant`] is a step function over runtime versions. The value
//! in effect for version `V` is the one registered at the greatest version
//! key `<= V`. When every registered key is greater than `V` resolution fails
//! with [`ConstantsError::NoApplicableVersion`].
//!
//! ```text
//! relayer_poll_interval_ms (profile: local)
//!
//!   version:   0 ──────────── 1200 ─────────────▶
//!   value:     6000           3000
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! th-01-runtime-constants/
//! ├── domain/     # RuntimeConstant, RuntimeVersion
//! ├── error.rs    # ConstantsError
//! └── store.rs    # ConstantStore + built-in profile table
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod error;
pub mod store;

pub use domain::{RuntimeConstant, RuntimeVersion};
pub use error::ConstantsError;
pub use store::{names, profiles, ConstantStore, ConstantStoreBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
