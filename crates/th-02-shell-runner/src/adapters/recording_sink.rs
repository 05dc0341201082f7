//! In-memory sink for tests and for callers that need the output text.

use parking_lot::Mutex;
use tracing::Level;

use crate::domain::StreamKind;
use crate::ports::OutputSink;

/// One captured line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLine {
    /// Run label
    pub label: String,
    /// Source stream
    pub stream: StreamKind,
    /// Severity it was emitted at
    pub level: Level,
    /// Trimmed text
    pub line: String,
}

/// Captures every emitted line in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<RecordedLine>>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    pub fn lines(&self) -> Vec<RecordedLine> {
        self.lines.lock().clone()
    }

    /// Text of the lines captured from one stream, in order.
    pub fn stream(&self, stream: StreamKind) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|l| l.stream == stream)
            .map(|l| l.line.clone())
            .collect()
    }

    /// Drop everything captured.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl OutputSink for RecordingSink {
    fn emit(&self, label: &str, stream: StreamKind, level: Level, line: &str) {
        self.lines.lock().push(RecordedLine {
            label: label.to_string(),
            stream,
            level,
            line: line.to_string(),
        });
    }
}
