use std::sync::{Arc, Mutex};

use procdrain::capture::LineSink;
use procdrain::{Severity, StreamKind};

/// One line as seen by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLine {
    pub stream: StreamKind,
    pub level: Severity,
    pub text: String,
}

/// A sink that records every line instead of logging it.
///
/// Clones share the same record, so keep one clone for assertions and hand
/// the other to the process under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<RecordedLine>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<RecordedLine> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines seen on one stream, in order.
    pub fn lines_for(&self, stream: StreamKind) -> Vec<RecordedLine> {
        self.lines()
            .into_iter()
            .filter(|line| line.stream == stream)
            .collect()
    }

    pub fn shared(&self) -> Arc<dyn LineSink> {
        Arc::new(self.clone())
    }
}

impl LineSink for RecordingSink {
    fn line(&self, stream: StreamKind, level: Severity, line: &str) {
        let mut guard = self.lines.lock().unwrap();
        guard.push(RecordedLine {
            stream,
            level,
            text: line.to_string(),
        });
    }
}
