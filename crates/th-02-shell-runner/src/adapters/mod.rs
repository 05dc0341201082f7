//! # Adapters
//!
//! [`OutputSink`](crate::ports::OutputSink) implementations.

pub mod recording_sink;
pub mod tracing_sink;

pub use recording_sink::{RecordedLine, RecordingSink};
pub use tracing_sink::TracingSink;
