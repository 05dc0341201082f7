//! Cross-crate integration flows.

#[cfg(all(test, unix))]
mod fake_cli;
#[cfg(all(test, unix))]
mod launch_flows;
#[cfg(all(test, unix))]
mod runner_flows;
#[cfg(all(test, unix))]
mod stop_flows;
