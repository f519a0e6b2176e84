//! Pending-line buffer held by every sink
//!
//! Lines are only appended until a flush drains them, oldest first.

/// Ordered, append-only store of formatted lines awaiting a flush
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line after everything already pending
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Take every pending line in insertion order, leaving the buffer empty
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Put unwritten lines back in front of anything pushed since they were drained
    pub fn requeue(&mut self, lines: impl IntoIterator<Item = String>) {
        let newer = std::mem::take(&mut self.lines);
        self.lines.extend(lines);
        self.lines.extend(newer);
    }

    /// Pending lines, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
