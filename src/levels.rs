//! Severity levels and the flag sets that gate emission and file routing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Severity of a log record, from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Dev,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All levels, least severe first
    pub const ALL: [LogLevel; 4] = [LogLevel::Dev, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    /// Lowercase name, as used in config files and file suffixes
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Dev => "dev",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Single-letter code written between the pipes of a record
    pub fn code(&self) -> char {
        match self {
            LogLevel::Dev => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warn => 'W',
            LogLevel::Error => 'E',
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(LogLevel::Dev),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

/// Level a file sink is bound to; `Common` receives every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileLogLevel {
    Common,
    Dev,
    Info,
    Warn,
    Error,
}

impl FileLogLevel {
    /// All file levels in declaration order
    pub const ALL: [FileLogLevel; 5] = [
        FileLogLevel::Common,
        FileLogLevel::Dev,
        FileLogLevel::Info,
        FileLogLevel::Warn,
        FileLogLevel::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileLogLevel::Common => "common",
            FileLogLevel::Dev => "dev",
            FileLogLevel::Info => "info",
            FileLogLevel::Warn => "warn",
            FileLogLevel::Error => "error",
        }
    }

    /// Part of the file name between the base name and the extension
    pub fn file_suffix(&self) -> String {
        match self {
            FileLogLevel::Common => String::new(),
            other => format!(".{}", other.as_str()),
        }
    }

    /// Whether a record of `level` belongs in a file bound to this level
    pub fn routes(&self, level: LogLevel) -> bool {
        match self {
            FileLogLevel::Common => true,
            other => *other == FileLogLevel::from(level),
        }
    }
}

impl From<LogLevel> for FileLogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Dev => FileLogLevel::Dev,
            LogLevel::Info => FileLogLevel::Info,
            LogLevel::Warn => FileLogLevel::Warn,
            LogLevel::Error => FileLogLevel::Error,
        }
    }
}

impl fmt::Display for FileLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileLogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("common") {
            return Ok(FileLogLevel::Common);
        }
        s.parse::<LogLevel>().map(FileLogLevel::from)
    }
}

/// Which levels a logger emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub dev: bool,
    pub info: bool,
    pub warn: bool,
    pub error: bool,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            dev: true,
            info: true,
            warn: true,
            error: true,
        }
    }
}

impl LevelSettings {
    /// Enable `threshold` and everything more severe
    pub fn from_threshold(threshold: LogLevel) -> Self {
        Self {
            dev: LogLevel::Dev >= threshold,
            info: LogLevel::Info >= threshold,
            warn: LogLevel::Warn >= threshold,
            error: LogLevel::Error >= threshold,
        }
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Dev => self.dev,
            LogLevel::Info => self.info,
            LogLevel::Warn => self.warn,
            LogLevel::Error => self.error,
        }
    }

    pub fn set(&mut self, level: LogLevel, enabled: bool) {
        match level {
            LogLevel::Dev => self.dev = enabled,
            LogLevel::Info => self.info = enabled,
            LogLevel::Warn => self.warn = enabled,
            LogLevel::Error => self.error = enabled,
        }
    }
}

/// Which per-level files are opened by `Logger::with_files`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLevelSettings {
    pub common: bool,
    pub dev: bool,
    pub info: bool,
    pub warn: bool,
    pub error: bool,
}

impl Default for FileLevelSettings {
    fn default() -> Self {
        Self {
            common: true,
            dev: true,
            info: true,
            warn: true,
            error: true,
        }
    }
}

impl FileLevelSettings {
    /// Enable files from `error` down to and including `threshold`
    pub fn from_threshold(threshold: FileLogLevel) -> Self {
        let mut settings = Self {
            common: false,
            dev: false,
            info: false,
            warn: false,
            error: false,
        };
        for level in FileLogLevel::ALL.iter().rev() {
            settings.set(*level, true);
            if *level == threshold {
                break;
            }
        }
        settings
    }

    pub fn is_enabled(&self, level: FileLogLevel) -> bool {
        match level {
            FileLogLevel::Common => self.common,
            FileLogLevel::Dev => self.dev,
            FileLogLevel::Info => self.info,
            FileLogLevel::Warn => self.warn,
            FileLogLevel::Error => self.error,
        }
    }

    pub fn set(&mut self, level: FileLogLevel, enabled: bool) {
        match level {
            FileLogLevel::Common => self.common = enabled,
            FileLogLevel::Dev => self.dev = enabled,
            FileLogLevel::Info => self.info = enabled,
            FileLogLevel::Warn => self.warn = enabled,
            FileLogLevel::Error => self.error = enabled,
        }
    }

    /// Enabled file levels in declaration order
    pub fn enabled(&self) -> Vec<FileLogLevel> {
        FileLogLevel::ALL
            .into_iter()
            .filter(|level| self.is_enabled(*level))
            .collect()
    }
}

/// Level selection as written by a user: a threshold name or explicit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Threshold(LogLevel),
    Flags(LevelSettings),
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::Flags(LevelSettings::default())
    }
}

impl LevelSpec {
    pub fn settings(&self) -> LevelSettings {
        match self {
            LevelSpec::Threshold(level) => LevelSettings::from_threshold(*level),
            LevelSpec::Flags(flags) => *flags,
        }
    }
}

impl From<LogLevel> for LevelSpec {
    fn from(level: LogLevel) -> Self {
        LevelSpec::Threshold(level)
    }
}

impl From<LevelSettings> for LevelSpec {
    fn from(flags: LevelSettings) -> Self {
        LevelSpec::Flags(flags)
    }
}

/// File level selection: a threshold name or explicit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileLevelSpec {
    Threshold(FileLogLevel),
    Flags(FileLevelSettings),
}

impl Default for FileLevelSpec {
    fn default() -> Self {
        FileLevelSpec::Flags(FileLevelSettings::default())
    }
}

impl FileLevelSpec {
    pub fn settings(&self) -> FileLevelSettings {
        match self {
            FileLevelSpec::Threshold(level) => FileLevelSettings::from_threshold(*level),
            FileLevelSpec::Flags(flags) => *flags,
        }
    }
}

impl From<FileLogLevel> for FileLevelSpec {
    fn from(level: FileLogLevel) -> Self {
        FileLevelSpec::Threshold(level)
    }
}

impl From<FileLevelSettings> for FileLevelSpec {
    fn from(flags: FileLevelSettings) -> Self {
        FileLevelSpec::Flags(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_counts() {
        assert_eq!(LogLevel::ALL.len(), 4);
        assert_eq!(FileLogLevel::ALL.len(), 5);
    }

    #[test]
    fn test_level_codes() {
        let codes: String = LogLevel::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, "DIWE");
    }

    #[test]
    fn test_threshold_warn() {
        let settings = LevelSettings::from_threshold(LogLevel::Warn);
        assert_eq!(
            settings,
            LevelSettings {
                dev: false,
                info: false,
                warn: true,
                error: true,
            }
        );
    }

    #[test]
    fn test_threshold_dev_enables_everything() {
        assert_eq!(LevelSettings::from_threshold(LogLevel::Dev), LevelSettings::default());
    }

    #[test]
    fn test_file_threshold_warn() {
        let settings = FileLevelSettings::from_threshold(FileLogLevel::Warn);
        assert_eq!(settings.enabled(), vec![FileLogLevel::Warn, FileLogLevel::Error]);
    }

    #[test]
    fn test_file_threshold_common_enables_everything() {
        let settings = FileLevelSettings::from_threshold(FileLogLevel::Common);
        assert_eq!(settings.enabled().len(), 5);
    }

    #[test]
    fn test_file_routing() {
        assert!(FileLogLevel::Common.routes(LogLevel::Dev));
        assert!(FileLogLevel::Common.routes(LogLevel::Error));
        assert!(FileLogLevel::Warn.routes(LogLevel::Warn));
        assert!(!FileLogLevel::Warn.routes(LogLevel::Error));
    }

    #[test]
    fn test_file_suffix() {
        assert_eq!(FileLogLevel::Common.file_suffix(), "");
        assert_eq!(FileLogLevel::Dev.file_suffix(), ".dev");
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("common".parse::<FileLogLevel>().unwrap(), FileLogLevel::Common);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[derive(Deserialize)]
    struct Wrapper {
        levels: LevelSpec,
    }

    #[test]
    fn test_level_spec_from_toml_threshold() {
        let parsed: Wrapper = toml::from_str(r#"levels = "info""#).unwrap();
        assert_eq!(parsed.levels, LevelSpec::Threshold(LogLevel::Info));
        assert!(!parsed.levels.settings().dev);
    }

    #[test]
    fn test_level_spec_from_toml_flags() {
        let parsed: Wrapper = toml::from_str("[levels]\ndev = false\n").unwrap();
        let settings = parsed.levels.settings();
        assert!(!settings.dev);
        assert!(settings.info);
        assert!(settings.warn);
        assert!(settings.error);
    }
}
