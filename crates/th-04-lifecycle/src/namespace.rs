//! # Network Namespace
//!
//! The one container network all components join.
//!
//! Creation is "create if absent": inspect, create when missing, and if the
//! create fails re-inspect, since another harness process may have won the
//! race. Inside one process a once-cell collapses concurrent callers onto a
//! single attempt; a failed attempt leaves the cell empty so a later call
//! retries.

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use th_02_shell_runner::{CommandRunner, RunOptions};

use crate::adapters::DockerCli;
use crate::error::LifecycleError;

/// Handle on the shared network.
#[derive(Debug)]
pub struct NetworkNamespace {
    name: String,
    ready: OnceCell<()>,
}

impl NetworkNamespace {
    /// Handle for `name`. Nothing is created until [`ensure`](Self::ensure).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ready: OnceCell::new(),
        }
    }

    /// Network name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this handle has already confirmed the network exists.
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Make sure the network exists. Idempotent.
    pub async fn ensure<R>(
        &self,
        runner: &R,
        docker: &DockerCli,
        options: &RunOptions,
    ) -> Result<(), LifecycleError>
    where
        R: CommandRunner + ?Sized,
    {
        self.ready
            .get_or_try_init(|| self.create_if_absent(runner, docker, options))
            .await
            .map(|_| ())
    }

    async fn create_if_absent<R>(
        &self,
        runner: &R,
        docker: &DockerCli,
        options: &RunOptions,
    ) -> Result<(), LifecycleError>
    where
        R: CommandRunner + ?Sized,
    {
        if self.exists(runner, docker, options).await? {
            debug!("[th-04] Network {} already exists", self.name);
            return Ok(());
        }

        let created = runner
            .run(&docker.network_create(&self.name), options)
            .await
            .map_err(|e| self.error(e.to_string()))?;
        if created.success() {
            info!("[th-04] Created network {}", self.name);
            return Ok(());
        }

        // Lost a creation race to another process?
        if self.exists(runner, docker, options).await? {
            warn!(
                "[th-04] Network {} appeared while creating it ({}), reusing it",
                self.name, created
            );
            return Ok(());
        }

        Err(self.error(format!("network create failed with {created}")))
    }

    /// Remove the network. A network that is already gone counts as removed.
    pub async fn remove<R>(
        &self,
        runner: &R,
        docker: &DockerCli,
        options: &RunOptions,
    ) -> Result<(), LifecycleError>
    where
        R: CommandRunner + ?Sized,
    {
        let outcome = runner
            .run(&docker.network_remove(&self.name), options)
            .await
            .map_err(|e| self.error(e.to_string()))?;
        if outcome.success() || !self.exists(runner, docker, options).await? {
            info!("[th-04] Removed network {}", self.name);
            return Ok(());
        }
        Err(self.error(format!("network rm failed with {outcome}")))
    }

    async fn exists<R>(
        &self,
        runner: &R,
        docker: &DockerCli,
        options: &RunOptions,
    ) -> Result<bool, LifecycleError>
    where
        R: CommandRunner + ?Sized,
    {
        let outcome = runner
            .run(&docker.network_exists(&self.name), options)
            .await
            .map_err(|e| self.error(e.to_string()))?;
        Ok(outcome.success())
    }

    fn error(&self, reason: String) -> LifecycleError {
        LifecycleError::Namespace {
            network: self.name.clone(),
            reason,
        }
    }
}
