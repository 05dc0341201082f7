//! # Runner and Catalog Flows
//!
//! The shell runner against real subprocesses, and the registry's constant
//! bindings against the built-in constant store.

use std::sync::Arc;

use th_01_runtime_constants::ConstantStore;
use th_02_shell_runner::{CommandLine, CommandRunner, RecordingSink, RunOptions, ShellRunner, StreamKind};
use th_03_component_registry::ComponentRegistry;
use tracing::Level;

use super::fake_cli::FakeContainerCli;

#[test]
fn test_every_binding_resolves_in_every_profile() {
    let registry = ComponentRegistry::builtin();
    let store = ConstantStore::builtin();

    for profile in store.profiles() {
        for version in [0, 1_100, 1_200, u32::MAX] {
            for identity in registry.iter() {
                for binding in &identity.constants {
                    let resolved = store.resolve(profile, &binding.constant, version);
                    assert!(
                        resolved.is_ok(),
                        "{}/{} at {}: {:?}",
                        profile,
                        binding.constant,
                        version,
                        resolved
                    );
                }
            }
        }
    }
}

#[tokio::test]
async fn test_fake_cli_errors_reach_the_sink_at_error_level() {
    let cli = FakeContainerCli::install();
    let sink = Arc::new(RecordingSink::new());
    let runner = ShellRunner::with_sink(sink.clone());
    let command = CommandLine::exec(cli.program(), ["rm", "--force", "th-testnet-missing"]);
    let options = RunOptions::new(std::env::temp_dir()).label("cleanup");

    let outcome = runner.run(&command, &options).await.unwrap();

    assert_eq!(outcome.code, Some(1));
    assert_eq!(outcome.stdout_lines, 0);
    assert_eq!(outcome.stderr_lines, 1);
    let lines = sink.lines();
    assert_eq!(lines[0].label, "cleanup");
    assert_eq!(lines[0].stream, StreamKind::Stderr);
    assert_eq!(lines[0].level, Level::ERROR);
    assert_eq!(lines[0].line, "Error: No such container: th-testnet-missing");
}

#[tokio::test]
async fn test_stdout_level_follows_options() {
    let sink = Arc::new(RecordingSink::new());
    let runner = ShellRunner::with_sink(sink.clone());
    let options = RunOptions::new(std::env::temp_dir())
        .log_level(Level::DEBUG)
        .env("TH_TESTS_GREETING", "hello");

    let outcome = runner
        .run(&CommandLine::shell("echo \"$TH_TESTS_GREETING\"; echo done >&2"), &options)
        .await
        .unwrap();

    assert!(outcome.success());
    assert_eq!(sink.stream(StreamKind::Stdout), vec!["hello"]);
    assert_eq!(sink.stream(StreamKind::Stderr), vec!["done"]);
    let levels: Vec<Level> = sink.lines().iter().map(|l| l.level).collect();
    assert!(levels.contains(&Level::DEBUG));
    assert!(levels.contains(&Level::ERROR));
}
