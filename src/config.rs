//! File-based logger configuration
//!
//! A `LoggerConfig` is read from TOML. Every key is optional; anything left
//! out keeps the same default `Logger::new()` would use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::date_format::DateFormat;
use crate::error::{LogError, Result};
use crate::levels::{FileLevelSpec, LevelSpec};
use crate::logger::{FileOptions, Logger, LoggerOptions};
use crate::options::LogOptions;
use crate::sink::{ConsoleOptions, ConsoleTarget};

/// Terminal stream a configured console sink prints to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// `[console]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub target: ConsoleStream,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target: ConsoleStream::default(),
        }
    }
}

impl From<&ConsoleConfig> for ConsoleOptions {
    fn from(config: &ConsoleConfig) -> Self {
        let target = match config.target {
            ConsoleStream::Stdout => ConsoleTarget::Stdout,
            ConsoleStream::Stderr => ConsoleTarget::Stderr,
        };
        ConsoleOptions { target }
    }
}

/// `[files]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Root folder; `~` is expanded and relative paths use the current directory
    pub folder: PathBuf,
    pub name: String,
    pub extension: String,
    pub levels: FileLevelSpec,
}

impl Default for FilesConfig {
    fn default() -> Self {
        let defaults = FileOptions::default();
        Self {
            folder: defaults.folder,
            name: defaults.name,
            extension: defaults.extension,
            levels: defaults.levels,
        }
    }
}

impl From<&FilesConfig> for FileOptions {
    fn from(config: &FilesConfig) -> Self {
        FileOptions {
            folder: config.folder.clone(),
            name: config.name.clone(),
            extension: config.extension.clone(),
            levels: config.levels,
        }
    }
}

/// Logger configuration as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Root name; an automatic `#<n>` name when absent
    pub name: Option<String>,

    /// Buffer every line until the logger is ended or dropped
    pub unite: bool,

    /// "trivial", "iso-z", "iso-local" or "fs-friendly"; unknown names select "trivial"
    pub date_format: String,

    /// Threshold name (`levels = "warn"`) or per-level flags
    pub levels: LevelSpec,

    /// Default options for inspected payloads
    pub defaults: LogOptions,

    /// Console output, on by default
    pub console: ConsoleConfig,

    /// Per-level file output; omitted means no file sinks
    pub files: Option<FilesConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: None,
            unite: false,
            date_format: DateFormat::default().name().to_string(),
            levels: LevelSpec::default(),
            defaults: LogOptions::default(),
            console: ConsoleConfig::default(),
            files: None,
        }
    }
}

impl LoggerConfig {
    /// Load configuration from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LogError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `~/.stacklog/config.toml`, or return defaults if it does not exist
    pub fn load_default() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Options for the root logger described by this config
    pub fn logger_options(&self) -> LoggerOptions {
        LoggerOptions {
            name: self.name.clone(),
            unite: self.unite,
            default_log_options: self.defaults,
            levels: self.levels,
            date_format: DateFormat::from_name(&self.date_format),
        }
    }

    /// Build a logger with the configured sinks attached
    pub fn build(&self) -> Result<Logger> {
        let mut logger = Logger::with_options(self.logger_options());

        if self.console.enabled {
            logger = logger.with_console((&self.console).into());
        }
        if let Some(files) = &self.files {
            logger = logger.with_files(files.into())?;
        }

        Ok(logger)
    }
}

/// Get the base configuration directory (~/.stacklog)
/// Falls back to ./.stacklog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".stacklog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".stacklog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
