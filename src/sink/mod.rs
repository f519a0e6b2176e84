//! Output sinks
//!
//! A sink buffers formatted lines and writes them to its backing medium on
//! `flush`. Two media exist: the terminal (or any shared writer) and a file
//! bound to one file level.

mod buffer;
mod console;
mod file;

use std::io::Write;

pub use buffer::LineBuffer;
pub use console::{ConsoleOptions, ConsoleSink, ConsoleTarget, SharedWriter};
pub use file::FileSink;

use crate::error::{LogError, Result};
use crate::levels::LogLevel;

/// Buffered destination for formatted log lines
pub trait Sink: Send {
    /// Short name used in error messages
    fn kind(&self) -> &'static str;

    fn buffer(&self) -> &LineBuffer;

    fn buffer_mut(&mut self) -> &mut LineBuffer;

    /// Write every pending line to the backing medium, in order, and clear the buffer
    fn flush(&mut self) -> Result<()>;

    /// New sink on the same backing medium with an empty buffer
    fn copy(&self) -> Box<dyn Sink>;

    /// Whether records of `level` are routed to this sink
    fn accepts(&self, _level: LogLevel) -> bool {
        true
    }

    /// Queue a line until the next flush
    fn write(&mut self, line: String) {
        self.buffer_mut().push(line);
    }

    /// Number of lines waiting for a flush
    fn pending(&self) -> usize {
        self.buffer().len()
    }
}

/// Drain `buffer` into `out` newline-terminated and flush the writer
///
/// A line that fails to write goes back into the buffer along with every
/// line after it, so the next flush retries them.
pub(crate) fn write_lines<W: Write + ?Sized>(
    out: &mut W,
    buffer: &mut LineBuffer,
    sink: &'static str,
) -> Result<()> {
    let mut lines = buffer.drain().into_iter();
    while let Some(line) = lines.next() {
        if let Err(e) = writeln!(out, "{}", line) {
            buffer.requeue(std::iter::once(line).chain(lines));
            return Err(LogError::write(sink, e));
        }
    }
    out.flush().map_err(|e| LogError::write(sink, e))
}
