//! Terminal sink

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::{write_lines, LineBuffer, Sink};
use crate::error::{LogError, Result};

/// Writer shared between console sinks, e.g. an in-memory capture
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Where a console sink prints
#[derive(Clone, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
    Writer(SharedWriter),
}

impl std::fmt::Debug for ConsoleTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleTarget::Stdout => f.write_str("Stdout"),
            ConsoleTarget::Stderr => f.write_str("Stderr"),
            ConsoleTarget::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Options for `Logger::with_console`
#[derive(Debug, Clone, Default)]
pub struct ConsoleOptions {
    pub target: ConsoleTarget,
}

impl ConsoleOptions {
    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }

    pub fn writer(writer: SharedWriter) -> Self {
        Self {
            target: ConsoleTarget::Writer(writer),
        }
    }
}

/// Sink printing to the terminal; accepts every level
#[derive(Debug)]
pub struct ConsoleSink {
    target: ConsoleTarget,
    buffer: LineBuffer,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget) -> Self {
        Self {
            target,
            buffer: LineBuffer::new(),
        }
    }

    pub fn target(&self) -> &ConsoleTarget {
        &self.target
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> &'static str {
        "console"
    }

    fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let buffer = &mut self.buffer;
        match &self.target {
            ConsoleTarget::Stdout => write_lines(&mut io::stdout().lock(), buffer, "console"),
            ConsoleTarget::Stderr => write_lines(&mut io::stderr().lock(), buffer, "console"),
            ConsoleTarget::Writer(writer) => {
                let mut writer = writer.lock().map_err(|_| LogError::Poisoned("console sink"))?;
                write_lines(&mut *writer, buffer, "console")
            }
        }
    }

    fn copy(&self) -> Box<dyn Sink> {
        Box::new(ConsoleSink::new(self.target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LogLevel;

    fn capture() -> (Arc<Mutex<Vec<u8>>>, ConsoleSink) {
        let out = Arc::new(Mutex::new(Vec::new()));
        let writer: SharedWriter = out.clone();
        (out, ConsoleSink::new(ConsoleTarget::Writer(writer)))
    }

    fn captured(out: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(out.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_flush_prints_lines_in_order() {
        let (out, mut sink) = capture();
        sink.write("foo".to_string());
        sink.write("bar".to_string());
        sink.write("baz".to_string());

        assert_eq!(captured(&out), "");
        sink.flush().unwrap();

        assert_eq!(captured(&out), "foo\nbar\nbaz\n");
        assert_eq!(sink.pending(), 0);
    }

    #[test]
    fn test_copy_has_its_own_buffer() {
        let (out, mut sink) = capture();
        let mut copy = sink.copy();

        sink.write("foo".to_string());
        assert_eq!(sink.pending(), 1);
        assert_eq!(copy.pending(), 0);

        copy.write("bar".to_string());
        copy.flush().unwrap();
        assert_eq!(captured(&out), "bar\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_flush_keeps_lines() {
        let writer: SharedWriter = Arc::new(Mutex::new(BrokenPipe));
        let mut sink = ConsoleSink::new(ConsoleTarget::Writer(writer));
        sink.write("foo".to_string());
        sink.write("bar".to_string());

        let err = sink.flush().unwrap_err();

        assert!(matches!(err, LogError::Write { sink: "console", .. }));
        assert_eq!(sink.buffer().lines(), &["foo".to_string(), "bar".to_string()]);
    }

    #[test]
    fn test_accepts_every_level() {
        let sink = ConsoleSink::default();
        assert!(LogLevel::ALL.iter().all(|l| sink.accepts(*l)));
    }

    #[test]
    fn test_stdout_flush() {
        let mut sink = ConsoleSink::default();
        sink.write("console sink test line".to_string());
        assert!(sink.flush().is_ok());
    }
}
