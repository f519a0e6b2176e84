//! Stacklog - hierarchical structured logging to the terminal and per-level files
//!
//! Records look like
//! `[2020-10-10T12:00:00.000Z] |W| (app; db) ::: slow query`: a timestamp,
//! a one-letter level code, the logger's name stack and the payload.
//!
//! ```rust,no_run
//! use stacklog::{ConsoleOptions, FileOptions, Logger};
//!
//! let mut logger = Logger::named("app")
//!     .with_console(ConsoleOptions::default())
//!     .with_files(FileOptions::new().folder("logs"))?;
//!
//! logger.info("started");
//! logger.sub("db").warn("slow query");
//! # Ok::<(), stacklog::LogError>(())
//! ```

pub mod config;
pub mod date_format;
pub mod error;
pub mod levels;
pub mod logger;
mod macros;
pub mod options;
pub mod sink;

pub use config::LoggerConfig;
pub use date_format::DateFormat;
pub use error::{LogError, Result};
pub use levels::{FileLevelSettings, FileLevelSpec, FileLogLevel, LevelSettings, LevelSpec, LogLevel};
pub use logger::{FileOptions, Logger, LoggerHandle, LoggerOptions, SubLoggerOptions};
pub use options::LogOptions;
pub use sink::{ConsoleOptions, ConsoleSink, ConsoleTarget, FileSink, Sink};
