//! # Testnet Harness Test Suite
//!
//! Cross-crate flows that drive the lifecycle controller through the real
//! shell runner against a scripted stand-in for the container CLI.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fake_cli.rs       # Docker compatible shell script + state dir
//!     ├── launch_flows.rs   # network creation, start, readiness, failures
//!     ├── stop_flows.rs     # teardown order, adoption, network removal
//!     └── runner_flows.rs   # runner output capture, registry/constant wiring
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p th-tests
//! cargo test -p th-tests integration::stop_flows
//! ```
//!
//! The flows need `/bin/sh`; they are compiled on Unix only.

#![allow(dead_code)]

pub mod integration;
