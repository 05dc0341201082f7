//! Lifecycle Controller
//!
//! Drives each requested component through its state machine using the
//! registry for identities, the constant store for version dependent
//! settings and a [`CommandRunner`] for every side effect.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn, Level};

use th_01_runtime_constants::{ConstantStore, ConstantsError};
use th_02_shell_runner::{CommandLine, CommandRunner, RunOptions};
use th_03_component_registry::{ComponentIdentity, ComponentRegistry};
use th_telemetry::log_component_event;

use crate::adapters::DockerCli;
use crate::config::HarnessConfig;
use crate::domain::{Action, ComponentResult, ComponentRunState, OperationReport};
use crate::error::LifecycleError;
use crate::namespace::NetworkNamespace;

/// What to run to bring one component up.
#[derive(Debug)]
struct LaunchPlan {
    option_name: String,
    container: String,
    command: CommandLine,
    /// A leftover container from a failed attempt must be removed first.
    cleanup_first: bool,
}

/// Launches and stops test-network components.
///
/// Owns the per-component run states. Everything it shares with other
/// components (registry, constant store) is read-only.
pub struct LifecycleController<R: CommandRunner> {
    runner: Arc<R>,
    registry: Arc<ComponentRegistry>,
    constants: Arc<ConstantStore>,
    config: HarnessConfig,
    docker: DockerCli,
    namespace: NetworkNamespace,
    states: HashMap<String, ComponentRunState>,
}

impl<R: CommandRunner> LifecycleController<R> {
    /// Create a controller. Nothing runs until an operation is invoked.
    pub fn new(
        runner: Arc<R>,
        registry: Arc<ComponentRegistry>,
        constants: Arc<ConstantStore>,
        config: HarnessConfig,
    ) -> Self {
        let docker = DockerCli::new(config.container_cli.clone());
        let namespace = NetworkNamespace::new(config.network_name.clone());
        Self {
            runner,
            registry,
            constants,
            config,
            docker,
            namespace,
            states: HashMap::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Current state of `option_name`.
    pub fn state(&self, option_name: &str) -> ComponentRunState {
        self.states.get(option_name).copied().unwrap_or_default()
    }

    /// States of every registered component, in registry order.
    pub fn states(&self) -> Vec<(String, ComponentRunState)> {
        self.registry
            .iter()
            .map(|c| (c.option_name.clone(), self.state(&c.option_name)))
            .collect()
    }

    fn transition(
        &mut self,
        option_name: &str,
        next: ComponentRunState,
    ) -> Result<(), LifecycleError> {
        let current = self.state(option_name);
        if !current.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                component: option_name.to_string(),
                from: current,
                to: next,
            });
        }
        debug!("[th-04] {}: {} -> {}", option_name, current, next);
        self.states.insert(option_name.to_string(), next);
        Ok(())
    }

    fn run_options(&self, label: &str) -> RunOptions {
        RunOptions::new(&self.config.working_dir)
            .envs(self.config.env_overlay.clone())
            .log_level(self.config.command_log_level)
            .label(label)
    }

    fn probe_options(&self, label: &str) -> RunOptions {
        self.run_options(label).log_level(Level::DEBUG)
    }

    /// Resolve the version dependent settings `identity` consumes.
    fn resolve_env(
        &self,
        identity: &ComponentIdentity,
    ) -> Result<BTreeMap<String, String>, ConstantsError> {
        identity
            .constants
            .iter()
            .map(|binding| {
                self.constants
                    .resolve(
                        &self.config.profile,
                        &binding.constant,
                        self.config.runtime_version,
                    )
                    .map(|value| (binding.env_var.clone(), value.to_string()))
            })
            .collect()
    }

    // =========================================================================
    // LAUNCH
    // =========================================================================

    /// Start every named component.
    ///
    /// Each distinct name gets one result. A failing component does not stop
    /// the others; use [`OperationReport::into_result`] for all-or-nothing.
    ///
    /// # Errors
    ///
    /// Fails outright only when the configured profile is unknown.
    pub async fn launch(&mut self, names: &[String]) -> Result<OperationReport, LifecycleError> {
        if !self.constants.has_profile(&self.config.profile) {
            return Err(ConstantsError::UnknownProfile(self.config.profile.clone()).into());
        }

        info!(
            "[th-04] Launching {:?} (profile={}, runtime_version={})",
            names, self.config.profile, self.config.runtime_version
        );

        let mut report = OperationReport::new(Action::Launch);
        let mut plans = Vec::new();

        for name in distinct(names) {
            let identity = match self.registry.lookup(name) {
                Ok(identity) => identity.clone(),
                Err(e) => {
                    warn!("[th-04] {}", e);
                    report.push(ComponentResult::failed(name, e.into()));
                    continue;
                }
            };

            let previous = self.state(name);
            if previous == ComponentRunState::Running {
                log_component_event!(info, name, "[th-04] Already running, skipping");
                report.push(ComponentResult::unchanged(name, previous));
                continue;
            }

            self.transition(name, ComponentRunState::Starting)?;
            match self.resolve_env(&identity) {
                Ok(env) => plans.push(LaunchPlan {
                    option_name: name.to_string(),
                    container: identity.container_name(self.namespace.name()),
                    command: self.docker.run(&identity, self.namespace.name(), &env),
                    cleanup_first: previous == ComponentRunState::Failed,
                }),
                Err(e) => {
                    warn!("[th-04] {}: {}", name, e);
                    self.transition(name, ComponentRunState::Failed)?;
                    report.push(ComponentResult::failed(name, e.into()));
                }
            }
        }

        if plans.is_empty() {
            return Ok(report);
        }

        let ns_options = self.run_options("network");
        if let Err(e) = self
            .namespace
            .ensure(self.runner.as_ref(), &self.docker, &ns_options)
            .await
        {
            warn!("[th-04] {}", e);
            for plan in plans {
                self.transition(&plan.option_name, ComponentRunState::Failed)?;
                report.push(ComponentResult::failed(
                    &plan.option_name,
                    LifecycleError::ComponentStartFailed {
                        component: plan.option_name.clone(),
                        reason: e.to_string(),
                    },
                ));
            }
            return Ok(report);
        }

        let outcomes = join_all(plans.iter().map(|plan| self.start_one(plan))).await;

        for (plan, outcome) in plans.iter().zip(outcomes) {
            match outcome {
                Ok(()) => {
                    self.transition(&plan.option_name, ComponentRunState::Running)?;
                    report.push(ComponentResult::changed(
                        &plan.option_name,
                        ComponentRunState::Running,
                    ));
                }
                Err(e) => {
                    self.transition(&plan.option_name, ComponentRunState::Failed)?;
                    report.push(ComponentResult::failed(&plan.option_name, e));
                }
            }
        }

        Ok(report)
    }

    async fn start_one(&self, plan: &LaunchPlan) -> Result<(), LifecycleError> {
        let name = plan.option_name.as_str();
        let start_failed = |reason: String| LifecycleError::ComponentStartFailed {
            component: name.to_string(),
            reason,
        };

        if plan.cleanup_first {
            debug!("[th-04] Removing leftover container {}", plan.container);
            let cleanup = self
                .runner
                .run(&self.docker.remove(&plan.container), &self.probe_options(name))
                .await;
            if let Err(e) = cleanup {
                warn!("[th-04] Cleanup of {} failed: {}", plan.container, e);
            }
        }

        log_component_event!(info, name, "[th-04] Starting container", container = %plan.container);
        let outcome = self
            .runner
            .run(&plan.command, &self.run_options(name))
            .await
            .map_err(|e| start_failed(e.to_string()))?;
        if !outcome.success() {
            return Err(start_failed(format!(
                "`{} run` failed with {}",
                self.docker.program(),
                outcome
            )));
        }

        self.wait_ready(name, &plan.container)
            .await
            .map_err(start_failed)?;

        log_component_event!(info, name, "[th-04] Component running", container = %plan.container);
        Ok(())
    }

    /// Poll until the container reports running. Retrying here is the
    /// controller's policy; the runner itself never retries.
    async fn wait_ready(&self, name: &str, container: &str) -> Result<(), String> {
        let attempts = self.config.readiness_attempts;
        if attempts == 0 {
            return Ok(());
        }

        let probe = self.docker.container_running(container);
        let options = self.probe_options(name);
        for attempt in 1..=attempts {
            match self.runner.run(&probe, &options).await {
                Ok(outcome) if outcome.success() => return Ok(()),
                Ok(_) => debug!("[th-04] {} not running yet ({}/{})", container, attempt, attempts),
                Err(e) => return Err(format!("readiness probe failed: {e}")),
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.readiness_interval).await;
            }
        }
        Err(format!("container {container} not running after {attempts} readiness probes"))
    }

    // =========================================================================
    // STOP
    // =========================================================================

    /// Remove every named component that is `Running` or `Failed`.
    ///
    /// `NotStarted` and `Stopped` components are skipped without running
    /// anything. Teardown is sequential, in reverse registry order.
    pub async fn stop(&mut self, names: &[String]) -> Result<OperationReport, LifecycleError> {
        info!("[th-04] Stopping {:?}", names);

        let mut report = OperationReport::new(Action::Stop);
        let mut known = Vec::new();

        for name in distinct(names) {
            match self.registry.lookup(name) {
                Ok(identity) => known.push(identity.clone()),
                Err(e) => {
                    warn!("[th-04] {}", e);
                    report.push(ComponentResult::failed(name, e.into()));
                }
            }
        }
        known.sort_by_key(|c| Reverse(self.registry.position(&c.option_name)));

        for identity in known {
            let name = identity.option_name.as_str();
            let state = self.state(name);
            if !state.needs_teardown() {
                debug!("[th-04] {} is {}, nothing to stop", name, state);
                report.push(ComponentResult::unchanged(name, state));
                continue;
            }

            self.transition(name, ComponentRunState::Stopping)?;
            match self.stop_one(&identity).await {
                Ok(()) => {
                    self.transition(name, ComponentRunState::Stopped)?;
                    report.push(ComponentResult::changed(name, ComponentRunState::Stopped));
                }
                Err(e) => {
                    warn!("[th-04] {}", e);
                    self.transition(name, ComponentRunState::Failed)?;
                    report.push(ComponentResult::failed(name, e));
                }
            }
        }

        Ok(report)
    }

    async fn stop_one(&self, identity: &ComponentIdentity) -> Result<(), LifecycleError> {
        let name = identity.option_name.as_str();
        let container = identity.container_name(self.namespace.name());
        let stop_failed = |reason: String| LifecycleError::ComponentStopFailed {
            component: name.to_string(),
            reason,
        };

        log_component_event!(info, name, "[th-04] Removing container", container = %container);
        let outcome = self
            .runner
            .run(&self.docker.remove(&container), &self.run_options(name))
            .await
            .map_err(|e| stop_failed(e.to_string()))?;
        if outcome.success() {
            return Ok(());
        }

        // Already gone (removed by hand, or a start that never created it)?
        let still_there = self
            .runner
            .run(&self.docker.container_exists(&container), &self.probe_options(name))
            .await
            .map_err(|e| stop_failed(e.to_string()))?
            .success();
        if !still_there {
            log_component_event!(info, name, "[th-04] Container already gone", container = %container);
            return Ok(());
        }

        Err(stop_failed(format!(
            "`{} rm` failed with {}",
            self.docker.program(),
            outcome
        )))
    }

    /// Remove the shared network. Call after every component is stopped.
    pub async fn remove_network(&self) -> Result<(), LifecycleError> {
        self.namespace
            .remove(self.runner.as_ref(), &self.docker, &self.run_options("network"))
            .await
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Adopt containers that already exist on the host.
    ///
    /// Every `NotStarted` component whose container is running becomes
    /// `Running`; one whose container exists but is not running becomes
    /// `Failed` so that `stop` cleans it up. Lets a fresh process stop what
    /// an earlier one launched.
    pub async fn refresh(&mut self) -> Result<(), LifecycleError> {
        let network = self.namespace.name().to_string();
        let targets: Vec<(String, String)> = self
            .registry
            .iter()
            .filter(|c| self.state(&c.option_name) == ComponentRunState::NotStarted)
            .map(|c| (c.option_name.clone(), c.container_name(&network)))
            .collect();

        for (name, container) in targets {
            let options = self.probe_options(&name);
            let running = self
                .runner
                .run(&self.docker.container_running(&container), &options)
                .await?
                .success();
            let observed = if running {
                ComponentRunState::Running
            } else if self
                .runner
                .run(&self.docker.container_exists(&container), &options)
                .await?
                .success()
            {
                ComponentRunState::Failed
            } else {
                continue;
            };

            log_component_event!(info, &name, "[th-04] Observed existing container", state = %observed);
            self.transition(&name, observed)?;
        }
        Ok(())
    }
}

/// Names in first-seen order, duplicates dropped.
fn distinct(names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(|n| seen.insert(*n))
        .collect()
}
