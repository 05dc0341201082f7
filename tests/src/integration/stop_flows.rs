//! # Stop Flows
//!
//! Teardown from the same controller and from a fresh one (a second CLI
//! invocation), plus network removal.

use std::sync::Arc;

use th_01_runtime_constants::ConstantStore;
use th_02_shell_runner::{RecordingSink, ShellRunner, StreamKind};
use th_03_component_registry::{ComponentRegistry, NODE, RELAYER};
use th_04_lifecycle::{ComponentRunState, LifecycleController};

use super::fake_cli::FakeContainerCli;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn controller(cli: &FakeContainerCli) -> LifecycleController<ShellRunner> {
    controller_with_sink(cli, Arc::new(RecordingSink::new()))
}

fn controller_with_sink(
    cli: &FakeContainerCli,
    sink: Arc<RecordingSink>,
) -> LifecycleController<ShellRunner> {
    LifecycleController::new(
        Arc::new(ShellRunner::with_sink(sink)),
        Arc::new(ComponentRegistry::builtin()),
        Arc::new(ConstantStore::builtin()),
        cli.config(),
    )
}

#[tokio::test]
async fn test_launch_then_stop_same_controller() {
    let cli = FakeContainerCli::install();
    let mut ctl = controller(&cli);
    ctl.launch(&names(&[NODE, RELAYER])).await.unwrap();

    let report = ctl.stop(&names(&[NODE, RELAYER])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert_eq!(ctl.state(NODE), ComponentRunState::Stopped);
    assert_eq!(ctl.state(RELAYER), ComponentRunState::Stopped);
    assert!(!cli.has_container("th-testnet-node"));
    assert!(!cli.has_container("th-testnet-relayer"));

    // Relayer goes first.
    let removals = cli.calls_matching("rm --force");
    assert_eq!(removals, vec!["rm --force th-testnet-relayer", "rm --force th-testnet-node"]);
}

#[tokio::test]
async fn test_fresh_controller_stops_what_another_launched() {
    let cli = FakeContainerCli::install();
    controller(&cli).launch(&names(&[NODE, RELAYER])).await.unwrap();

    let mut ctl = controller(&cli);
    ctl.refresh().await.unwrap();
    assert_eq!(ctl.state(NODE), ComponentRunState::Running);

    let report = ctl.stop(&names(&[RELAYER, NODE])).await.unwrap();
    assert!(report.is_complete_success(), "{report}");
    assert!(!cli.has_container("th-testnet-node"));

    ctl.remove_network().await.unwrap();
    assert!(!cli.has_network("th-testnet"));
}

#[tokio::test]
async fn test_stop_without_launch_runs_nothing() {
    let cli = FakeContainerCli::install();
    let mut ctl = controller(&cli);

    let report = ctl.stop(&names(&[NODE, RELAYER])).await.unwrap();

    assert!(report.is_complete_success());
    assert!(report.results.iter().all(|r| !r.changed));
    assert!(cli.calls().is_empty());
}

#[tokio::test]
async fn test_stop_after_external_removal() {
    let cli = FakeContainerCli::install();
    let sink = Arc::new(RecordingSink::new());
    let mut ctl = controller_with_sink(&cli, sink.clone());
    ctl.launch(&names(&[NODE])).await.unwrap();
    cli.remove_container("th-testnet-node");
    sink.clear();

    let report = ctl.stop(&names(&[NODE])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert_eq!(ctl.state(NODE), ComponentRunState::Stopped);
    assert_eq!(
        cli.calls_matching("{{.Id}} th-testnet-node").len(),
        1,
        "removal failure should be followed by one existence probe"
    );
    // Only the failed `rm` reports on stderr; the existence check is silent.
    let stderr = sink.stream(StreamKind::Stderr);
    assert_eq!(stderr, vec!["Error: No such container: th-testnet-node"]);
}

#[tokio::test]
async fn test_relaunch_after_stop() {
    let cli = FakeContainerCli::install();
    let mut ctl = controller(&cli);
    ctl.launch(&names(&[NODE])).await.unwrap();
    ctl.stop(&names(&[NODE])).await.unwrap();

    let report = ctl.launch(&names(&[NODE])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert_eq!(ctl.state(NODE), ComponentRunState::Running);
    assert!(cli.has_container("th-testnet-node"));
}

#[tokio::test]
async fn test_remove_network_is_idempotent() {
    let cli = FakeContainerCli::install();
    let ctl = controller(&cli);

    // Never created: the failed `network rm` is confirmed by inspect.
    ctl.remove_network().await.unwrap();
    ctl.remove_network().await.unwrap();

    assert_eq!(cli.calls_matching("network rm").len(), 2);
}
