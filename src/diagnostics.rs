//! Diagnostic output sinks
//!
//! [`Registry::debug_dump`](crate::Registry::debug_dump) writes one line per
//! registered variable to a [`DiagnosticSink`]. On target the usual choice is
//! [`LogSink`], which forwards to the crate's `log_*!` macros; host tests use
//! [`MockSink`].

use heapless::{String, Vec};

/// Line-oriented text output
///
/// Each call is one complete line; the sink appends the line terminator.
pub trait DiagnosticSink {
    /// Emit one line of diagnostic text
    fn write_line(&mut self, line: &str);
}

/// Sink that forwards every line to `log_info!`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn write_line(&mut self, line: &str) {
        crate::logging::log_info!("{}", line);
    }
}

/// Maximum number of lines retained by [`MockSink`]
pub const MOCK_SINK_LINES: usize = 40;

/// Maximum retained length of one [`MockSink`] line
pub const MOCK_SINK_LINE_LEN: usize = 64;

/// Capturing sink for tests
///
/// Lines beyond [`MOCK_SINK_LINES`] are dropped and counted; over-long lines
/// are cut to [`MOCK_SINK_LINE_LEN`] bytes.
#[derive(Debug, Default)]
pub struct MockSink {
    lines: Vec<String<MOCK_SINK_LINE_LEN>, MOCK_SINK_LINES>,
    dropped: usize,
}

impl MockSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, oldest first
    pub fn lines(&self) -> &[String<MOCK_SINK_LINE_LEN>] {
        &self.lines
    }

    /// Number of lines that did not fit
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl DiagnosticSink for MockSink {
    fn write_line(&mut self, line: &str) {
        let mut captured = String::new();
        for ch in line.chars() {
            if captured.push(ch).is_err() {
                break;
            }
        }
        if self.lines.push(captured).is_err() {
            self.dropped += 1;
        }
    }
}
