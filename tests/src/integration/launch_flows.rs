//! # Launch Flows
//!
//! Controller → shell runner → container CLI, with the network created on
//! first use and every component's output captured per run label.

use std::sync::Arc;

use th_01_runtime_constants::ConstantStore;
use th_02_shell_runner::{RecordingSink, ShellRunner, StreamKind};
use th_03_component_registry::{ComponentIdentity, ComponentRegistry, NODE, RELAYER};
use th_04_lifecycle::{ComponentRunState, HarnessConfig, LifecycleController, LifecycleError};
use tracing::Level;

use super::fake_cli::FakeContainerCli;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn controller_with(
    config: HarnessConfig,
    registry: ComponentRegistry,
    sink: Arc<RecordingSink>,
) -> LifecycleController<ShellRunner> {
    LifecycleController::new(
        Arc::new(ShellRunner::with_sink(sink)),
        Arc::new(registry),
        Arc::new(ConstantStore::builtin()),
        config,
    )
}

fn controller(cli: &FakeContainerCli, sink: Arc<RecordingSink>) -> LifecycleController<ShellRunner> {
    controller_with(cli.config(), ComponentRegistry::builtin(), sink)
}

// =============================================================================
// HAPPY PATH
// =============================================================================

#[tokio::test]
async fn test_launch_creates_network_and_starts_components() {
    let cli = FakeContainerCli::install();
    let sink = Arc::new(RecordingSink::new());
    let mut ctl = controller(&cli, sink.clone());

    let report = ctl.launch(&names(&[NODE, RELAYER])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert!(cli.has_network("th-testnet"));
    assert!(cli.has_container("th-testnet-node"));
    assert!(cli.has_container("th-testnet-relayer"));
    assert_eq!(cli.calls_matching("network create").len(), 1);
    assert_eq!(ctl.state(NODE), ComponentRunState::Running);
    assert_eq!(ctl.state(RELAYER), ComponentRunState::Running);

    // The container id printed by `run` is logged under the component label.
    assert!(sink
        .lines()
        .iter()
        .any(|l| l.label == NODE && l.line == "th-testnet-node-0123456789ab"));
}

#[tokio::test]
async fn test_launch_passes_constants_for_runtime_version() {
    let cli = FakeContainerCli::install();
    let config = HarnessConfig {
        profile: "testnet".into(),
        runtime_version: 1_250,
        ..cli.config()
    };
    let mut ctl = controller_with(config, ComponentRegistry::builtin(), Arc::new(RecordingSink::new()));

    ctl.launch(&names(&[NODE, RELAYER])).await.unwrap();

    let node = &cli.calls_matching("run --detach --name th-testnet-node")[0];
    assert!(node.contains("--env BLOCK_TIME_MS=6000"));
    let relayer = &cli.calls_matching("run --detach --name th-testnet-relayer")[0];
    assert!(relayer.contains("--env RELAYER_POLL_INTERVAL_MS=12000"));
    assert!(relayer.contains("--env CHALLENGE_PERIOD_SECS=1800"));
    assert!(relayer.contains("--env CONSENSUS_UPDATE_FREQUENCY_SECS=300"));
    assert!(relayer.contains("--network-alias relayer"));
}

#[tokio::test]
async fn test_existing_network_is_reused() {
    let cli = FakeContainerCli::install();
    let mut first = controller(&cli, Arc::new(RecordingSink::new()));
    first.launch(&names(&[NODE])).await.unwrap();

    let mut second = controller(&cli, Arc::new(RecordingSink::new()));
    let report = second.launch(&names(&[RELAYER])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert_eq!(cli.calls_matching("network create").len(), 1);
}

#[tokio::test]
async fn test_concurrent_controllers_share_one_network() {
    let cli = FakeContainerCli::install();
    let mut a = controller(&cli, Arc::new(RecordingSink::new()));
    let mut b = controller(&cli, Arc::new(RecordingSink::new()));

    let (node, relayer) = (names(&[NODE]), names(&[RELAYER]));

    let (ra, rb) = tokio::join!(a.launch(&node), b.launch(&relayer));

    assert!(ra.unwrap().is_complete_success());
    assert!(rb.unwrap().is_complete_success());
    assert!(cli.has_network("th-testnet"));
}

#[tokio::test]
async fn test_container_cli_path_with_spaces() {
    let cli = FakeContainerCli::install_in("container tools");
    let mut ctl = controller(&cli, Arc::new(RecordingSink::new()));

    let report = ctl.launch(&names(&[NODE, RELAYER])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert_eq!(ctl.state(NODE), ComponentRunState::Running);
    assert_eq!(ctl.state(RELAYER), ComponentRunState::Running);
}

#[tokio::test]
async fn test_network_name_is_never_interpreted_by_a_shell() {
    let cli = FakeContainerCli::install();
    let config = HarnessConfig {
        network_name: "ci;touch injected;net".into(),
        ..cli.config()
    };
    let mut ctl = controller_with(config, ComponentRegistry::builtin(), Arc::new(RecordingSink::new()));

    let report = ctl.launch(&names(&[NODE])).await.unwrap();

    assert!(report.is_complete_success(), "{report}");
    assert_eq!(ctl.state(NODE), ComponentRunState::Running);
    assert!(cli.has_container("ci;touch injected;net-node"));
    assert!(!cli.config().working_dir.join("injected").exists());
}

#[tokio::test]
async fn test_missing_network_check_logs_nothing() {
    let cli = FakeContainerCli::install();
    let sink = Arc::new(RecordingSink::new());
    let mut ctl = controller(&cli, sink.clone());

    ctl.launch(&names(&[NODE])).await.unwrap();

    // The first inspect finds no network; that is expected, not an error.
    assert!(cli.calls()[0].starts_with("network inspect"));
    assert!(sink.lines().iter().all(|l| l.level != Level::ERROR), "{:?}", sink.lines());
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn test_unknown_names_do_not_block_known_ones() {
    let cli = FakeContainerCli::install();
    let mut ctl = controller(&cli, Arc::new(RecordingSink::new()));

    let report = ctl
        .launch(&names(&["indexer", NODE, "faucet"]))
        .await
        .unwrap();

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.succeeded().count(), 1);
    assert!(matches!(
        report.get("faucet").unwrap().error,
        Some(LifecycleError::Registry(_))
    ));
    assert_eq!(cli.calls_matching("run --detach").len(), 1);
}

#[tokio::test]
async fn test_failed_start_is_reported_with_runtime_error() {
    let cli = FakeContainerCli::install();
    let registry = ComponentRegistry::new(vec![
        ComponentIdentity::new(NODE, "example/chain-node:1", "Chain Node"),
        ComponentIdentity::new("indexer", "example/broken-indexer:1", "Indexer"),
    ])
    .unwrap();
    let sink = Arc::new(RecordingSink::new());
    let mut ctl = controller_with(cli.config(), registry, sink.clone());

    let report = ctl.launch(&names(&["indexer", NODE])).await.unwrap();

    assert_eq!(ctl.state(NODE), ComponentRunState::Running);
    assert_eq!(ctl.state("indexer"), ComponentRunState::Failed);
    let err = report.get("indexer").unwrap().error.as_ref().unwrap();
    assert!(err.to_string().contains("exit code 125"), "{err}");
    assert!(!cli.has_container("th-testnet-indexer"));

    let stderr: Vec<_> = sink
        .lines()
        .into_iter()
        .filter(|l| l.label == "indexer" && l.stream == StreamKind::Stderr)
        .collect();
    assert_eq!(stderr.len(), 1);
    assert_eq!(stderr[0].level, Level::ERROR);
    assert!(stderr[0].line.contains("pull access denied"));
}

#[tokio::test]
async fn test_container_that_never_runs_fails_readiness() {
    let cli = FakeContainerCli::install();
    let registry = ComponentRegistry::new(vec![ComponentIdentity::new(
        "indexer",
        "example/crashloop-indexer:1",
        "Indexer",
    )])
    .unwrap();
    let mut ctl = controller_with(cli.config(), registry, Arc::new(RecordingSink::new()));

    let report = ctl.launch(&names(&["indexer"])).await.unwrap();

    assert_eq!(ctl.state("indexer"), ComponentRunState::Failed);
    assert!(report.to_string().contains("not running after 3 readiness probes"));
    assert_eq!(cli.calls_matching("State.Running").len(), 3);

    // The leftover container is what stop cleans up.
    assert!(cli.has_container("th-testnet-indexer"));
    let stopped = ctl.stop(&names(&["indexer"])).await.unwrap();
    assert!(stopped.is_complete_success());
    assert!(!cli.has_container("th-testnet-indexer"));
}

#[tokio::test]
async fn test_fresh_controller_must_refresh_before_relaunch() {
    let cli = FakeContainerCli::install();
    controller(&cli, Arc::new(RecordingSink::new()))
        .launch(&names(&[NODE]))
        .await
        .unwrap();

    // Without looking first, the name clash is a start failure.
    let mut blind = controller(&cli, Arc::new(RecordingSink::new()));
    let report = blind.launch(&names(&[NODE])).await.unwrap();
    assert_eq!(report.failed().count(), 1);
    assert!(report.to_string().contains("exit code 125"));

    // After refresh the running container is adopted and left alone.
    let mut adopted = controller(&cli, Arc::new(RecordingSink::new()));
    adopted.refresh().await.unwrap();
    let report = adopted.launch(&names(&[NODE])).await.unwrap();
    assert!(report.is_complete_success());
    assert!(!report.results[0].changed);
}

#[tokio::test]
async fn test_invalid_working_directory_fails_every_component() {
    let cli = FakeContainerCli::install();
    let config = HarnessConfig {
        working_dir: "/nonexistent/th-tests".into(),
        ..cli.config()
    };
    let mut ctl = controller_with(config, ComponentRegistry::builtin(), Arc::new(RecordingSink::new()));

    let report = ctl.launch(&names(&[NODE, RELAYER])).await.unwrap();

    assert_eq!(report.failed().count(), 2);
    assert!(cli.calls().is_empty());
}
