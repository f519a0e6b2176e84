//! Timestamp formatters used in the first field of every record

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};

/// `chrono`'s default rendering of the local time
pub fn trivial<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    date.to_string()
}

/// UTC with millisecond precision, e.g. `2020-10-10T12:00:00.000Z`
pub fn iso_z<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Wall clock in the date's own zone plus its offset, e.g. `2020-10-10 13:00:00.000+01:00`
pub fn iso_local<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    date.format("%Y-%m-%d %H:%M:%S%.3f%:z").to_string()
}

/// UTC without separators, safe for directory names, e.g. `20201010-120000000`
pub fn fs_friendly<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc).format("%Y%m%d-%H%M%S%3f").to_string()
}

/// Picks the formatter a logger stamps its records with
#[derive(Clone, Default)]
pub enum DateFormat {
    Trivial,
    #[default]
    IsoZ,
    IsoLocal,
    FsFriendly,
    Custom(Arc<dyn Fn() -> String + Send + Sync>),
}

impl DateFormat {
    /// Select a formatter by name; unknown names fall back to `Trivial`
    pub fn from_name(name: &str) -> Self {
        match name {
            "iso-z" => DateFormat::IsoZ,
            "iso-local" => DateFormat::IsoLocal,
            "fs-friendly" => DateFormat::FsFriendly,
            _ => DateFormat::Trivial,
        }
    }

    /// Wrap a closure producing the timestamp text
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        DateFormat::Custom(Arc::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            DateFormat::Trivial => "trivial",
            DateFormat::IsoZ => "iso-z",
            DateFormat::IsoLocal => "iso-local",
            DateFormat::FsFriendly => "fs-friendly",
            DateFormat::Custom(_) => "custom",
        }
    }

    /// Current time rendered with this formatter
    pub fn now_text(&self) -> String {
        match self {
            DateFormat::Trivial => trivial(&Local::now()),
            DateFormat::IsoZ => iso_z(&Utc::now()),
            DateFormat::IsoLocal => iso_local(&Local::now()),
            DateFormat::FsFriendly => fs_friendly(&Utc::now()),
            DateFormat::Custom(f) => f(),
        }
    }
}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateFormat({})", self.name())
    }
}

impl From<&str> for DateFormat {
    fn from(name: &str) -> Self {
        DateFormat::from_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> DateTime<Utc> {
        "2020-10-10T12:00:00.000Z".parse().unwrap()
    }

    #[test]
    fn test_trivial_is_not_empty() {
        assert!(!DateFormat::Trivial.now_text().is_empty());
    }

    #[test]
    fn test_iso_z() {
        assert_eq!(iso_z(&sample()), "2020-10-10T12:00:00.000Z");
        assert_eq!(DateFormat::IsoZ.now_text().len(), 24);
    }

    #[test]
    fn test_iso_local_positive_offset() {
        let east = FixedOffset::east_opt(3600).unwrap();
        let date = sample().with_timezone(&east);
        assert_eq!(iso_local(&date), "2020-10-10 13:00:00.000+01:00");
    }

    #[test]
    fn test_iso_local_negative_offset() {
        let west = FixedOffset::west_opt(3600).unwrap();
        let date = sample().with_timezone(&west);
        assert_eq!(iso_local(&date), "2020-10-10 11:00:00.000-01:00");
    }

    #[test]
    fn test_iso_local_utc_offset() {
        assert_eq!(iso_local(&sample().fixed_offset()), "2020-10-10 12:00:00.000+00:00");
        assert_eq!(DateFormat::IsoLocal.now_text().len(), 29);
    }

    #[test]
    fn test_fs_friendly() {
        assert_eq!(fs_friendly(&sample()), "20201010-120000000");
        assert_eq!(DateFormat::FsFriendly.now_text().len(), 18);
    }

    #[test]
    fn test_fs_friendly_matches_stripped_iso_z() {
        let date = sample();
        let stripped: String = iso_z(&date)
            .chars()
            .filter(|c| !matches!(c, '-' | ':' | '.' | 'Z'))
            .map(|c| if c == 'T' { '-' } else { c })
            .collect();
        assert_eq!(fs_friendly(&date), stripped);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(DateFormat::from_name("iso-local").name(), "iso-local");
        assert_eq!(DateFormat::from_name("fs-friendly").name(), "fs-friendly");
        assert_eq!(DateFormat::from_name("iso-z").name(), "iso-z");
        assert_eq!(DateFormat::from_name("__").name(), "trivial");
        assert_eq!(DateFormat::default().name(), "iso-z");
    }

    #[test]
    fn test_custom() {
        let format = DateFormat::custom(|| "no date...".to_string());
        assert_eq!(format.now_text(), "no date...");
    }
}
