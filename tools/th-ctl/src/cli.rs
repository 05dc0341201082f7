//! Argument definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use th_04_lifecycle::{parse_base10, HarnessConfig};

/// Launch and stop test-network components.
#[derive(Parser, Debug)]
#[command(name = "th-ctl", version)]
#[command(about = "Launch and stop test-network components")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Flags layered over the `TH_*` environment.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GlobalArgs {
    /// Constant store profile (local, testnet)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Runtime version used to resolve versioned constants
    #[arg(long, global = true, value_name = "VERSION", value_parser = parse_base10::<u32>)]
    pub runtime_version: Option<u32>,

    /// Seconds to wait for a confirmation answer (0 = use the default at once)
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_base10::<u64>)]
    pub confirm_timeout: Option<u64>,

    /// Readiness probes after each start (0 = do not probe)
    #[arg(long, global = true, value_name = "N", value_parser = parse_base10::<u32>)]
    pub readiness_attempts: Option<u32>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Working directory for container commands
    #[arg(long, global = true, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Shared network name
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// Container CLI program (docker, podman)
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub container_cli: Option<String>,

    /// Extra environment for container commands, repeatable
    #[arg(long = "env", global = true, value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Log filter, e.g. `debug` or `th_04_lifecycle=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

impl GlobalArgs {
    /// Override `config` with every flag that was given.
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(profile) = &self.profile {
            config.profile = profile.clone();
        }
        if let Some(version) = self.runtime_version {
            config.runtime_version = version;
        }
        if let Some(secs) = self.confirm_timeout {
            config.confirm_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.readiness_attempts {
            config.readiness_attempts = attempts;
        }
        if let Some(dir) = &self.workdir {
            config.working_dir = dir.clone();
        }
        if let Some(network) = &self.network {
            config.network_name = network.clone();
        }
        if let Some(program) = &self.container_cli {
            config.container_cli = program.clone();
        }
        config.env_overlay.extend(self.env.iter().cloned());
    }
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start components on the shared network
    Launch {
        /// Component option names
        #[arg(value_name = "COMPONENT", required_unless_present = "all")]
        components: Vec<String>,

        /// Every registered component
        #[arg(long, conflicts_with = "components")]
        all: bool,
    },

    /// Remove running or failed components
    Stop {
        /// Component option names
        #[arg(value_name = "COMPONENT", required_unless_present = "all")]
        components: Vec<String>,

        /// Every registered component
        #[arg(long, conflicts_with = "components")]
        all: bool,

        /// Also remove the shared network once every component is down
        #[arg(long)]
        remove_network: bool,
    },

    /// Print the observed state of every component
    Status {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the component registry
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_env_pair(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.is_empty() => Ok((key.to_string(), val.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{value}'")),
    }
}
