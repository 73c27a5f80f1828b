// src/capture/buffer.rs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Buffer shared between its monitor (the only writer) and the orchestrator,
/// which snapshots it once the drain wait is over, finished or not.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<TrailingBuffer>>,
}

impl SharedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TrailingBuffer::new(capacity))),
        }
    }

    pub fn append(&self, line: &str) {
        self.lock().append(line);
    }

    /// Retained length in characters.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the text retained so far.
    pub fn snapshot(&self) -> String {
        self.lock().snapshot().to_string()
    }

    // A writer that panicked mid-append still leaves valid UTF-8 behind, so a
    // poisoned lock is read through.
    fn lock(&self) -> MutexGuard<'_, TrailingBuffer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Text accumulator that keeps only the most recent `capacity` characters.
///
/// Each [`append`](Self::append) adds one line plus a trailing `\n`. With a
/// non-zero capacity the oldest characters are dropped from the front so the
/// retained text is always the exact trailing `capacity` characters of
/// everything appended so far. A capacity of 0 keeps everything.
///
/// Lengths are counted in `char`s, so trimming never splits a UTF-8
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrailingBuffer {
    text: String,
    chars: usize,
    capacity: usize,
}

impl TrailingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            capacity,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_bounded(&self) -> bool {
        self.capacity > 0
    }

    /// Retained length in characters.
    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Append `line` followed by a newline, evicting from the front if the
    /// capacity is exceeded.
    pub fn append(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        self.chars += line.chars().count() + 1;

        if self.is_bounded() && self.chars > self.capacity {
            self.trim_front(self.chars - self.capacity);
        }
    }

    /// Current retained text.
    pub fn snapshot(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    fn trim_front(&mut self, excess: usize) {
        let cut = self
            .text
            .char_indices()
            .nth(excess)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        self.text.drain(..cut);
        self.chars -= excess;
    }
}
