//! Construction options for loggers, sub-loggers and file output

use std::path::PathBuf;

use crate::date_format::DateFormat;
use crate::levels::{FileLevelSpec, LevelSpec};
use crate::options::LogOptions;

/// Options for a root logger; anything left unset keeps its default
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    /// Last entry of the name stack; `#<n>` when absent
    pub name: Option<String>,
    /// Hold lines until `end()` instead of flushing after every record
    pub unite: bool,
    pub default_log_options: LogOptions,
    pub levels: LevelSpec,
    pub date_format: DateFormat,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unite(mut self, unite: bool) -> Self {
        self.unite = unite;
        self
    }

    pub fn default_log_options(mut self, options: LogOptions) -> Self {
        self.default_log_options = options;
        self
    }

    pub fn levels(mut self, levels: impl Into<LevelSpec>) -> Self {
        self.levels = levels.into();
        self
    }

    pub fn date_format(mut self, date_format: impl Into<DateFormat>) -> Self {
        self.date_format = date_format.into();
        self
    }
}

/// Options for `Logger::sub_with`
///
/// `unite` is not inherited from the parent. `default_log_options` are
/// layered over the parent's.
#[derive(Debug, Clone, Default)]
pub struct SubLoggerOptions {
    pub name: Option<String>,
    pub unite: bool,
    pub default_log_options: Option<LogOptions>,
}

impl SubLoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unite(mut self, unite: bool) -> Self {
        self.unite = unite;
        self
    }

    pub fn default_log_options(mut self, options: LogOptions) -> Self {
        self.default_log_options = Some(options);
        self
    }
}

/// Options for `Logger::with_files`
#[derive(Debug, Clone)]
pub struct FileOptions {
    /// Root folder; relative paths resolve against the current directory
    pub folder: PathBuf,
    /// Base file name placed before the level suffix
    pub name: String,
    pub extension: String,
    pub levels: FileLevelSpec,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("logs"),
            name: String::new(),
            extension: "log".to_string(),
            levels: FileLevelSpec::default(),
        }
    }
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn levels(mut self, levels: impl Into<FileLevelSpec>) -> Self {
        self.levels = levels.into();
        self
    }
}
