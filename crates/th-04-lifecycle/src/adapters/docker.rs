//! Container runtime command lines.
//!
//! The harness talks to the container runtime only by running its CLI. Any
//! Docker compatible CLI (`docker`, `podman`) works.

use std::collections::BTreeMap;

use th_02_shell_runner::CommandLine;
use th_03_component_registry::ComponentIdentity;

/// Label put on every network and container the harness creates.
pub const MANAGED_LABEL: &str = "th.managed=true";

const CHECK_SHELL: &str = "sh";

/// Builds command lines for one container CLI program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    /// Builder for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// CLI program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn exec<const N: usize>(&self, args: [&str; N]) -> CommandLine {
        CommandLine::exec(self.program.clone(), args)
    }

    /// Run `script` under `sh -c` with the program as `$0` and `args` as
    /// `$1..`. Values never become part of the script text.
    fn script<const N: usize>(&self, script: &str, args: [&str; N]) -> CommandLine {
        let mut argv = vec!["-c".to_string(), script.to_string(), self.program.clone()];
        argv.extend(args.iter().map(|a| a.to_string()));
        CommandLine::exec(CHECK_SHELL, argv)
    }

    /// `args` with both output streams discarded; only the exit status counts.
    fn quiet<const N: usize>(&self, args: [&str; N]) -> CommandLine {
        self.script(r#""$0" "$@" >/dev/null 2>&1"#, args)
    }

    /// Exits zero iff `network` exists. Silent either way.
    pub fn network_exists(&self, network: &str) -> CommandLine {
        self.quiet(["network", "inspect", "--format", "{{.Name}}", network])
    }

    /// Create `network`.
    pub fn network_create(&self, network: &str) -> CommandLine {
        self.exec(["network", "create", "--label", MANAGED_LABEL, network])
    }

    /// Remove `network`.
    pub fn network_remove(&self, network: &str) -> CommandLine {
        self.exec(["network", "rm", network])
    }

    /// Start `identity` detached on `network` with `env` exported.
    ///
    /// The container is reachable from its peers under its option name.
    pub fn run(
        &self,
        identity: &ComponentIdentity,
        network: &str,
        env: &BTreeMap<String, String>,
    ) -> CommandLine {
        let container = identity.container_name(network);
        let mut args: Vec<String> = vec![
            "run".into(),
            "--detach".into(),
            "--name".into(),
            container,
            "--network".into(),
            network.into(),
            "--network-alias".into(),
            identity.option_name.clone(),
            "--label".into(),
            MANAGED_LABEL.into(),
        ];
        for (key, value) in env {
            args.push("--env".into());
            args.push(format!("{key}={value}"));
        }
        args.push(identity.image_name.clone());
        CommandLine::exec(self.program.clone(), args)
    }

    /// Exits zero iff a container named `container` exists, in any state.
    /// Silent either way.
    pub fn container_exists(&self, container: &str) -> CommandLine {
        self.quiet(["container", "inspect", "--format", "{{.Id}}", container])
    }

    /// Exits zero iff `container` exists and is running.
    pub fn container_running(&self, container: &str) -> CommandLine {
        self.script(
            r#"test "$("$0" container inspect --format '{{.State.Running}}' "$1" 2>/dev/null)" = true"#,
            [container],
        )
    }

    /// Force-remove `container`, stopping it first if it runs.
    pub fn remove(&self, container: &str) -> CommandLine {
        self.exec(["rm", "--force", container])
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}
