//! th-ctl: Testnet Harness control CLI.

use std::io;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use th_02_shell_runner::ShellRunner;
use th_04_lifecycle::HarnessConfig;
use th_ctl::{execute, Cli};
use th_telemetry::{init_logging, TelemetryConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };

    // A prompt that timed out leaves a blocking stdin read behind; exiting
    // here keeps runtime shutdown from waiting on it.
    process::exit(code);
}

async fn run(cli: Cli) -> Result<bool> {
    let mut telemetry = TelemetryConfig::from_env();
    if cli.global.json_logs {
        telemetry = telemetry.with_json_logs(true);
    }
    if let Some(filter) = &cli.global.log_level {
        telemetry = telemetry.with_log_level(filter.clone());
    }
    init_logging(&telemetry).context("could not initialise logging")?;

    let mut config = HarnessConfig::from_env().context("invalid TH_* environment")?;
    cli.global.apply(&mut config);

    let runner = Arc::new(ShellRunner::new());
    execute(&cli.command, cli.global.yes, config, runner, &mut io::stdout()).await
}
