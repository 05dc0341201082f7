//! Command execution.
//!
//! Output meant for the user goes to `out`; diagnostics go through
//! `tracing` to stderr.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use th_01_runtime_constants::ConstantStore;
use th_02_shell_runner::CommandRunner;
use th_03_component_registry::ComponentRegistry;
use th_04_lifecycle::{confirm_stdin, ComponentRunState, HarnessConfig, LifecycleController};

use crate::cli::Command;

/// Run `command` against the built-in registry and constant store.
///
/// Returns `Ok(false)` when the command ran but did not fully succeed (a
/// component failed, or the user declined). Fatal errors come back as `Err`.
pub async fn execute<R, W>(
    command: &Command,
    assume_yes: bool,
    config: HarnessConfig,
    runner: Arc<R>,
    out: &mut W,
) -> Result<bool>
where
    R: CommandRunner,
    W: Write,
{
    let registry = Arc::new(ComponentRegistry::builtin());
    let constants = Arc::new(ConstantStore::builtin());

    match command {
        Command::List { json } => {
            if *json {
                let identities: Vec<_> = registry.iter().collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&identities)?)?;
            } else {
                list(&registry, &constants, &config, out)?;
            }
            Ok(true)
        }

        Command::Status { json } => {
            let mut controller = LifecycleController::new(runner, registry, constants, config);
            controller
                .refresh()
                .await
                .context("could not inspect existing containers")?;
            let network = controller.config().network_name.clone();
            let rows: Vec<StatusRow> = controller
                .states()
                .into_iter()
                .map(|(name, state)| StatusRow {
                    container: format!("{network}-{name}"),
                    component: name,
                    state,
                })
                .collect();

            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            } else {
                writeln!(out, "{:<10} {:<11} CONTAINER", "COMPONENT", "STATE")?;
                for row in rows {
                    writeln!(
                        out,
                        "{:<10} {:<11} {}",
                        row.component,
                        row.state.to_string(),
                        row.container
                    )?;
                }
            }
            Ok(true)
        }

        Command::Launch { components, all } => {
            let selection = select(&registry, components, *all);
            let question = format!(
                "Launch {} on network {}?",
                selection.join(", "),
                config.network_name
            );
            if !assume_yes && !ask(&question, &config).await {
                writeln!(out, "Aborted.")?;
                return Ok(false);
            }

            let mut controller = LifecycleController::new(runner, registry, constants, config);
            controller
                .refresh()
                .await
                .context("could not inspect existing containers")?;
            let report = controller.launch(&selection).await.context("launch aborted")?;
            write!(out, "{report}")?;
            Ok(report.is_complete_success())
        }

        Command::Stop {
            components,
            all,
            remove_network,
        } => {
            let selection = select(&registry, components, *all);
            let question = format!(
                "Stop {} on network {}?",
                selection.join(", "),
                config.network_name
            );
            if !assume_yes && !ask(&question, &config).await {
                writeln!(out, "Aborted.")?;
                return Ok(false);
            }

            let mut controller = LifecycleController::new(runner, registry, constants, config);
            controller
                .refresh()
                .await
                .context("could not inspect existing containers")?;
            let report = controller.stop(&selection).await.context("stop aborted")?;
            write!(out, "{report}")?;
            if !report.is_complete_success() {
                return Ok(false);
            }

            if *remove_network {
                let remaining: Vec<String> = controller
                    .states()
                    .into_iter()
                    .filter(|(_, state)| state.needs_teardown())
                    .map(|(name, _)| name)
                    .collect();
                if remaining.is_empty() {
                    controller
                        .remove_network()
                        .await
                        .context("could not remove the network")?;
                    writeln!(out, "network {} removed", controller.config().network_name)?;
                } else {
                    warn!(
                        "[th-ctl] Keeping network, still in use by: {}",
                        remaining.join(", ")
                    );
                }
            }
            Ok(true)
        }
    }
}

/// One line of `status` output.
#[derive(Debug, Serialize)]
struct StatusRow {
    component: String,
    state: ComponentRunState,
    container: String,
}

async fn ask(question: &str, config: &HarnessConfig) -> bool {
    confirm_stdin(question, config.confirm_timeout, config.confirm_default).await
}

fn select(registry: &ComponentRegistry, components: &[String], all: bool) -> Vec<String> {
    if all {
        registry.option_names().into_iter().map(String::from).collect()
    } else {
        components.to_vec()
    }
}

fn list<W: Write>(
    registry: &ComponentRegistry,
    constants: &ConstantStore,
    config: &HarnessConfig,
    out: &mut W,
) -> Result<()> {
    info!(
        "[th-ctl] Resolving constants for profile {} at runtime version {}",
        config.profile, config.runtime_version
    );
    for identity in registry.iter() {
        writeln!(
            out,
            "{:<10} {:<12} {}",
            identity.option_name, identity.component_name, identity.image_name
        )?;
        for binding in &identity.constants {
            match constants.resolve(&config.profile, &binding.constant, config.runtime_version) {
                Ok(value) => writeln!(out, "    {}={}", binding.env_var, value)?,
                Err(e) => writeln!(out, "    {}: {}", binding.env_var, e)?,
            }
        }
    }
    Ok(())
}
