//! File sink bound to one file level

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{write_lines, LineBuffer, Sink};
use crate::error::{LogError, Result};
use crate::levels::{FileLogLevel, LogLevel};

/// Sink appending lines to a file opened (and truncated) at construction
///
/// Copies share the open handle, so lines flushed by any copy land in the
/// same file in flush order.
#[derive(Debug)]
pub struct FileSink {
    level: FileLogLevel,
    path: PathBuf,
    file: Arc<Mutex<BufWriter<File>>>,
    buffer: LineBuffer,
}

impl FileSink {
    /// Create or truncate `path` and bind it to `level`
    pub fn open(level: FileLogLevel, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| LogError::OpenFile {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            level,
            path,
            file: Arc::new(Mutex::new(BufWriter::new(file))),
            buffer: LineBuffer::new(),
        })
    }

    pub fn level(&self) -> FileLogLevel {
        self.level
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn kind(&self) -> &'static str {
        "file"
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
        let mut file = self.file.lock().map_err(|_| LogError::Poisoned("file sink"))?;
        write_lines(&mut *file, &mut self.buffer, "file")
    }

    fn copy(&self) -> Box<dyn Sink> {
        Box::new(FileSink {
            level: self.level,
            path: self.path.clone(),
            file: Arc::clone(&self.file),
            buffer: LineBuffer::new(),
        })
    }

    fn accepts(&self, level: LogLevel) -> bool {
        self.level.routes(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("created.log");

        let sink = FileSink::open(FileLogLevel::Common, &path).unwrap();

        assert!(path.exists());
        assert_eq!(sink.path(), path);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("x.log");

        let err = FileSink::open(FileLogLevel::Common, &path).unwrap_err();
        assert!(matches!(err, LogError::OpenFile { .. }));
    }

    #[test]
    fn test_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("writes.log");

        let mut sink = FileSink::open(FileLogLevel::Common, &path).unwrap();
        sink.write("foo".to_string());
        sink.write("bar".to_string());
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "foo\nbar\n");
    }

    #[test]
    fn test_open_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("truncate.log");
        std::fs::write(&path, "old contents\n").unwrap();

        let mut sink = FileSink::open(FileLogLevel::Common, &path).unwrap();
        sink.write("new".to_string());
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_copies_share_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("copies.log");

        let mut sink = FileSink::open(FileLogLevel::Common, &path).unwrap();
        let mut copy = sink.copy();

        sink.write("foo".to_string());
        sink.flush().unwrap();
        sink.write("bar".to_string());

        copy.write("baz".to_string());
        copy.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "foo\nbaz\n");
        assert_eq!(sink.pending(), 1);
    }

    #[test]
    fn test_poisoned_lock_keeps_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("poisoned.log");
        let mut sink = FileSink::open(FileLogLevel::Common, &path).unwrap();

        let file = Arc::clone(&sink.file);
        let _ = std::thread::spawn(move || {
            let _guard = file.lock().unwrap();
            panic!("poison the file lock");
        })
        .join();

        sink.write("kept".to_string());
        assert!(matches!(sink.flush(), Err(LogError::Poisoned(_))));
        assert_eq!(sink.pending(), 1);
    }

    #[test]
    fn test_accepts_own_level_only() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::open(FileLogLevel::Warn, temp_dir.path().join("w.log")).unwrap();

        assert!(sink.accepts(LogLevel::Warn));
        assert!(!sink.accepts(LogLevel::Error));
        assert!(!sink.accepts(LogLevel::Dev));
    }
}
