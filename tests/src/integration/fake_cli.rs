//! Scripted Docker compatible CLI.
//!
//! A `/bin/sh` script that keeps networks and containers as marker files in
//! its own temp directory and appends every invocation to `calls.log`.
//! Image names steer container behaviour:
//!
//! | Image contains | `run` result |
//! |----------------|--------------|
//! | `broken`       | exit 125, nothing created |
//! | `crashloop`    | created, never reports running |
//! | anything else  | created and running |

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use th_04_lifecycle::HarnessConfig;

const SCRIPT: &str = r##"#!/bin/sh
state=$(dirname "$0")
echo "$*" >> "$state/calls.log"

case "$1" in
network)
    case "$2" in
    inspect)
        test -f "$state/network-$5" || { echo "Error: network $5 not found" >&2; exit 1; }
        echo "$5" ;;
    create)
        if test -f "$state/network-$5"; then
            echo "Error: network with name $5 already exists" >&2
            exit 1
        fi
        touch "$state/network-$5"
        echo "net-$5" ;;
    rm)
        test -f "$state/network-$3" || { echo "Error: No such network: $3" >&2; exit 1; }
        rm "$state/network-$3"
        echo "$3" ;;
    esac ;;
run)
    name=$4
    for image; do :; done
    if test -f "$state/container-$name"; then
        echo "Error: Conflict. The container name \"/$name\" is already in use." >&2
        exit 125
    fi
    case "$image" in
    *broken*)
        echo "Error: pull access denied for $image" >&2
        exit 125 ;;
    *crashloop*) echo false > "$state/container-$name" ;;
    *) echo true > "$state/container-$name" ;;
    esac
    echo "$name-0123456789ab" ;;
container)
    test -f "$state/container-$5" || { echo "Error: No such container: $5" >&2; exit 1; }
    case "$4" in
    *State.Running*) cat "$state/container-$5" ;;
    *) echo "$5-0123456789ab" ;;
    esac ;;
rm)
    test -f "$state/container-$3" || { echo "Error: No such container: $3" >&2; exit 1; }
    rm "$state/container-$3"
    echo "$3" ;;
*)
    echo "unknown command: $1" >&2
    exit 2 ;;
esac
"##;

/// One installed fake CLI with its own state.
pub struct FakeContainerCli {
    _root: TempDir,
    state: PathBuf,
    program: PathBuf,
}

impl FakeContainerCli {
    pub fn install() -> Self {
        Self::install_in("bin")
    }

    /// Install under `subdir` of a fresh temp directory; the script's state
    /// lives next to it.
    pub fn install_in(subdir: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let state = root.path().join(subdir);
        fs::create_dir_all(&state).unwrap();
        let program = state.join("fake-docker");
        fs::write(&program, SCRIPT).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
        Self {
            _root: root,
            state,
            program,
        }
    }

    pub fn program(&self) -> String {
        self.program.display().to_string()
    }

    /// Harness configuration pointing at this CLI, with fast readiness probes.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            container_cli: self.program(),
            working_dir: self.state.clone(),
            readiness_attempts: 3,
            readiness_interval: Duration::from_millis(10),
            ..HarnessConfig::default()
        }
    }

    /// Arguments of every invocation, oldest first.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.state.join("calls.log"))
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn calls_matching(&self, pattern: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.contains(pattern))
            .collect()
    }

    pub fn has_network(&self, name: &str) -> bool {
        self.state.join(format!("network-{name}")).exists()
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.state.join(format!("container-{name}")).exists()
    }

    /// Remove a container behind the harness's back.
    pub fn remove_container(&self, name: &str) {
        fs::remove_file(self.state.join(format!("container-{name}"))).unwrap();
    }
}
