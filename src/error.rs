//! Error types for stacklog

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or writing logs
#[derive(Error, Debug)]
pub enum LogError {
    /// The log directory could not be created
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A relative log folder could not be anchored at the working directory
    #[error("failed to read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// A log file could not be opened
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing buffered lines to a sink failed
    #[error("failed to write to {sink} sink: {source}")]
    Write {
        sink: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A shared lock was poisoned by a panicking holder
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),

    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for a logger config
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// A logger config could not be rendered as TOML
    #[error("failed to serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    /// A level name did not match any known level
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}

impl LogError {
    pub(crate) fn write(sink: &'static str, source: std::io::Error) -> Self {
        Self::Write { sink, source }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LogError>;
