//! The logger: level gating, record formatting and sink fan-out
//!
//! A record is rendered as
//! `[<timestamp>] |<level code>| (<name>; <name>; ...) ::: <payload>`
//! and written to every sink that accepts its level. Unless the logger was
//! built with `unite`, every record is flushed immediately; otherwise lines
//! stay buffered until `end()`.

mod builder;
mod handle;

use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use serde::Serialize;

pub use builder::{FileOptions, LoggerOptions, SubLoggerOptions};
pub use handle::LoggerHandle;

use crate::date_format::{self, DateFormat};
use crate::error::{LogError, Result};
use crate::levels::{LevelSettings, LogLevel};
use crate::options::{inspect_debug, inspect_json, LogOptions};
use crate::sink::{ConsoleOptions, ConsoleSink, FileSink, Sink};

static START_TIME: OnceLock<String> = OnceLock::new();
static NEXT_INDEX: AtomicUsize = AtomicUsize::new(0);

/// Fs-friendly timestamp captured once per process; names the per-run log directory
pub fn start_time() -> &'static str {
    START_TIME.get_or_init(|| date_format::fs_friendly(&Utc::now()))
}

fn next_auto_name() -> String {
    format!("#{}", NEXT_INDEX.fetch_add(1, Ordering::Relaxed))
}

/// Render one record line
pub fn format_record(now: &str, level: LogLevel, names: &[String], text: &str) -> String {
    format!(
        "[{}] |{}| ({}) ::: {}",
        now,
        level.code(),
        names.join("; "),
        text
    )
}

/// Resolve the root folder for file output: expand `~`, anchor relative paths at the cwd
pub(crate) fn resolve_folder(folder: &Path) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(&folder.to_string_lossy()).into_owned());
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = std::env::current_dir().map_err(LogError::CurrentDir)?;
    Ok(cwd.join(expanded))
}

/// Hierarchical logger writing to console and per-level file sinks
pub struct Logger {
    names: Vec<String>,
    levels: LevelSettings,
    date_format: DateFormat,
    sinks: Vec<Box<dyn Sink>>,
    unite: bool,
    default_log_options: LogOptions,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger with default options and an automatic `#<n>` name
    pub fn new() -> Self {
        Self::with_options(LoggerOptions::default())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::with_options(LoggerOptions::default().name(name))
    }

    pub fn with_options(options: LoggerOptions) -> Self {
        let LoggerOptions {
            name,
            unite,
            default_log_options,
            levels,
            date_format,
        } = options;

        Self {
            names: vec![name.unwrap_or_else(next_auto_name)],
            levels: levels.settings(),
            date_format,
            sinks: Vec::new(),
            unite,
            default_log_options,
        }
    }

    /// Child logger sharing this logger's sinks, levels and formatter
    pub fn sub(&self, name: impl Into<String>) -> Logger {
        self.sub_with(SubLoggerOptions::default().name(name))
    }

    /// Child logger with explicit options; see [`SubLoggerOptions`]
    pub fn sub_with(&self, options: SubLoggerOptions) -> Logger {
        let mut names = self.names.clone();
        names.push(options.name.unwrap_or_else(next_auto_name));

        let default_log_options = options
            .default_log_options
            .map(|o| self.default_log_options.merge(&o))
            .unwrap_or(self.default_log_options);

        Logger {
            names,
            levels: self.levels,
            date_format: self.date_format.clone(),
            sinks: self.sinks.iter().map(|s| s.copy()).collect(),
            unite: options.unite,
            default_log_options,
        }
    }

    /// Add terminal output
    pub fn with_console(mut self, options: ConsoleOptions) -> Self {
        self.sinks.push(Box::new(ConsoleSink::new(options.target)));
        self
    }

    /// Add one file per enabled file level under `<folder>/<start time>/`
    pub fn with_files(mut self, options: FileOptions) -> Result<Self> {
        let root = resolve_folder(&options.folder)?;
        let log_dir = root.join(start_time());

        std::fs::create_dir_all(&log_dir).map_err(|source| LogError::CreateDir {
            path: log_dir.clone(),
            source,
        })?;
        tracing::debug!("Log directory ready: {}", log_dir.display());

        for level in options.levels.settings().enabled() {
            let file_name = format!("{}{}.{}", options.name, level.file_suffix(), options.extension);
            let sink = FileSink::open(level, log_dir.join(file_name))?;
            self.sinks.push(Box::new(sink));
        }

        Ok(self)
    }

    /// Add an arbitrary sink
    pub fn with_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn levels(&self) -> LevelSettings {
        self.levels
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn is_united(&self) -> bool {
        self.unite
    }

    pub fn default_log_options(&self) -> LogOptions {
        self.default_log_options
    }

    pub fn sinks(&self) -> &[Box<dyn Sink>] {
        &self.sinks
    }

    /// Log a displayable message at `level`
    pub fn log(&mut self, level: LogLevel, message: impl fmt::Display) -> &mut Self {
        if self.levels.is_enabled(level) {
            let text = message.to_string();
            self.output(level, &text);
        }
        self
    }

    pub fn dev(&mut self, message: impl fmt::Display) -> &mut Self {
        self.log(LogLevel::Dev, message)
    }

    pub fn info(&mut self, message: impl fmt::Display) -> &mut Self {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&mut self, message: impl fmt::Display) -> &mut Self {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&mut self, message: impl fmt::Display) -> &mut Self {
        self.log(LogLevel::Error, message)
    }

    /// Log a value through its `Debug` impl
    ///
    /// `options` are layered over the logger's defaults for this call only.
    pub fn inspect<T: Debug + ?Sized>(
        &mut self,
        level: LogLevel,
        value: &T,
        options: LogOptions,
    ) -> &mut Self {
        if self.levels.is_enabled(level) {
            let merged = self.default_log_options.merge(&options);
            let text = inspect_debug(value, &merged);
            self.output(level, &text);
        }
        self
    }

    /// Log a value serialized as JSON
    pub fn json<T: Serialize + ?Sized>(
        &mut self,
        level: LogLevel,
        value: &T,
        options: LogOptions,
    ) -> &mut Self {
        if self.levels.is_enabled(level) {
            let merged = self.default_log_options.merge(&options);
            let text = inspect_json(value, &merged);
            self.output(level, &text);
        }
        self
    }

    /// Flush every sink, releasing lines held back by `unite`
    pub fn end(&mut self) -> Result<&mut Self> {
        self.flush_sinks()?;
        Ok(self)
    }

    fn output(&mut self, level: LogLevel, text: &str) {
        let line = format_record(&self.date_format.now_text(), level, &self.names, text);

        for sink in self.sinks.iter_mut().filter(|s| s.accepts(level)) {
            sink.write(line.clone());
        }

        if !self.unite {
            if let Err(e) = self.flush_sinks() {
                tracing::warn!("Failed to flush log record: {}", e);
            }
        }
    }

    /// Flush all sinks; keeps going after a failure and reports the first one
    fn flush_sinks(&mut self) -> Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                tracing::debug!("{} sink flush failed: {}", sink.kind(), e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("names", &self.names)
            .field("levels", &self.levels)
            .field("date_format", &self.date_format)
            .field("sinks", &self.sinks.len())
            .field("unite", &self.unite)
            .field("default_log_options", &self.default_log_options)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.sinks.iter().any(|s| s.pending() > 0) {
            if let Err(e) = self.flush_sinks() {
                tracing::warn!("Failed to flush pending log lines on drop: {}", e);
            }
        }
    }
}
