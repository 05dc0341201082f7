//! # Confirmation Prompt
//!
//! Asks a yes/no question and races the answer against a timer. When the
//! timer wins, or input ends, the caller's default is returned, so
//! unattended runs never block.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Interpret a typed answer. Blank or unrecognised input gives `None`.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask `question` on stderr and read the answer from `input`.
///
/// A zero `timeout` returns `default` without reading.
pub async fn confirm<R>(mut input: R, question: &str, timeout: Duration, default: bool) -> bool
where
    R: AsyncBufRead + Unpin,
{
    if timeout.is_zero() {
        debug!("[th-04] Confirmation skipped, using default ({})", default);
        return default;
    }

    let hint = if default { "Y/n" } else { "y/N" };
    eprint!(
        "{question} [{hint}] (defaults to {} in {}s): ",
        if default { "yes" } else { "no" },
        timeout.as_secs()
    );
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    tokio::select! {
        read = input.read_line(&mut line) => match read {
            Ok(0) | Err(_) => default,
            Ok(_) => parse_answer(&line).unwrap_or(default),
        },
        _ = tokio::time::sleep(timeout) => {
            eprintln!();
            info!("[th-04] No answer within {}s, using default ({})", timeout.as_secs(), default);
            default
        }
    }
}

/// [`confirm`] reading from the process's stdin.
///
/// The pending stdin read is left behind if the timer wins; callers exit the
/// process rather than waiting for runtime shutdown.
pub async fn confirm_stdin(question: &str, timeout: Duration, default: bool) -> bool {
    confirm(BufReader::new(tokio::io::stdin()), question, timeout, default).await
}
