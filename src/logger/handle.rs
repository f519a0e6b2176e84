use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{Logger, SubLoggerOptions};
use crate::error::{LogError, Result};
use crate::levels::LogLevel;
use crate::options::LogOptions;

/// Cloneable, thread-safe handle to a [`Logger`]
///
/// Every clone logs through the same logger, so the name stack, sinks and
/// buffers are shared. Use [`LoggerHandle::sub`] for a child with its own
/// buffers.
#[derive(Clone, Debug)]
pub struct LoggerHandle {
    inner: Arc<Mutex<Logger>>,
}

impl From<Logger> for LoggerHandle {
    fn from(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }
}

impl Logger {
    /// Move this logger behind a shareable handle
    pub fn into_handle(self) -> LoggerHandle {
        LoggerHandle::from(self)
    }
}

impl LoggerHandle {
    /// Run `f` with exclusive access to the logger
    pub fn with_logger<R>(&self, f: impl FnOnce(&mut Logger) -> R) -> Result<R> {
        let mut logger = self.inner.lock().map_err(|_| LogError::Poisoned("logger"))?;
        Ok(f(&mut logger))
    }

    pub fn log(&self, level: LogLevel, message: impl fmt::Display) -> &Self {
        match self.inner.lock() {
            Ok(mut logger) => {
                logger.log(level, message);
            }
            Err(_) => tracing::warn!("Logger lock poisoned, record dropped"),
        }
        self
    }

    pub fn dev(&self, message: impl fmt::Display) -> &Self {
        self.log(LogLevel::Dev, message)
    }

    pub fn info(&self, message: impl fmt::Display) -> &Self {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: impl fmt::Display) -> &Self {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: impl fmt::Display) -> &Self {
        self.log(LogLevel::Error, message)
    }

    pub fn inspect<T: Debug + ?Sized>(&self, level: LogLevel, value: &T, options: LogOptions) -> &Self {
        match self.inner.lock() {
            Ok(mut logger) => {
                logger.inspect(level, value, options);
            }
            Err(_) => tracing::warn!("Logger lock poisoned, record dropped"),
        }
        self
    }

    pub fn json<T: Serialize + ?Sized>(&self, level: LogLevel, value: &T, options: LogOptions) -> &Self {
        match self.inner.lock() {
            Ok(mut logger) => {
                logger.json(level, value, options);
            }
            Err(_) => tracing::warn!("Logger lock poisoned, record dropped"),
        }
        self
    }

    /// Flush every sink of the underlying logger
    pub fn end(&self) -> Result<()> {
        self.with_logger(|logger| logger.end().map(|_| ()))?
    }

    /// Handle to a new child logger
    pub fn sub(&self, name: impl Into<String>) -> Result<LoggerHandle> {
        self.with_logger(|logger| logger.sub(name).into_handle())
    }

    pub fn sub_with(&self, options: SubLoggerOptions) -> Result<LoggerHandle> {
        self.with_logger(|logger| logger.sub_with(options).into_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LoggerOptions;
    use crate::sink::{ConsoleOptions, SharedWriter};
    use std::thread;

    fn capture() -> (Arc<Mutex<Vec<u8>>>, ConsoleOptions) {
        let out = Arc::new(Mutex::new(Vec::new()));
        let writer: SharedWriter = out.clone();
        (out, ConsoleOptions::writer(writer))
    }

    fn line_count(out: &Arc<Mutex<Vec<u8>>>) -> usize {
        String::from_utf8(out.lock().unwrap().clone())
            .unwrap()
            .lines()
            .count()
    }

    #[test]
    fn test_handle_logs() {
        let (out, console) = capture();
        let handle = Logger::named("app").with_console(console).into_handle();

        handle.dev("foo").info("bar");

        assert_eq!(line_count(&out), 2);
    }

    #[test]
    fn test_handle_across_threads() {
        let (out, console) = capture();
        let handle = Logger::named("app").with_console(console).into_handle();

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let handle = handle.clone();
                thread::spawn(move || {
                    handle.info(format!("worker {}", i));
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(line_count(&out), 4);
    }

    #[test]
    fn test_handle_end_releases_united_lines() {
        let (out, console) = capture();
        let handle = Logger::with_options(LoggerOptions::default().unite(true))
            .with_console(console)
            .into_handle();

        handle.warn("held");
        assert_eq!(line_count(&out), 0);

        handle.end().unwrap();
        assert_eq!(line_count(&out), 1);
    }

    #[test]
    fn test_poisoned_handle_keeps_running() {
        let (out, console) = capture();
        let handle = Logger::named("app").with_console(console).into_handle();

        let poisoner = handle.clone();
        let _ = thread::spawn(move || {
            let _ = poisoner.with_logger(|_| panic!("poison the logger lock"));
        })
        .join();

        handle.info("dropped").json(LogLevel::Info, &1, LogOptions::default());

        assert_eq!(line_count(&out), 0);
        assert!(matches!(handle.end(), Err(LogError::Poisoned("logger"))));
    }

    #[test]
    fn test_handle_sub() {
        let handle = Logger::named("app").into_handle();
        let child = handle.sub("worker").unwrap();

        let names = child.with_logger(|l| l.names().to_vec()).unwrap();
        assert_eq!(names, vec!["app", "worker"]);
    }
}
