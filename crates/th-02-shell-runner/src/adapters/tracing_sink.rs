//! Sink that forwards subprocess output to `tracing`.

use tracing::Level;

use crate::domain::StreamKind;
use crate::ports::OutputSink;

/// Emits each line as a `tracing` event with `command` and `stream` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn emit(&self, label: &str, stream: StreamKind, level: Level, line: &str) {
        match level {
            Level::TRACE => tracing::trace!(command = label, %stream, "{}", line),
            Level::DEBUG => tracing::debug!(command = label, %stream, "{}", line),
            Level::INFO => tracing::info!(command = label, %stream, "{}", line),
            Level::WARN => tracing::warn!(command = label, %stream, "{}", line),
            Level::ERROR => tracing::error!(command = label, %stream, "{}", line),
        }
    }
}
