//! Date/time normalization for attendance rows.
//!
//! The attendance service ships dates as ISO timestamps, space separated
//! datetimes, bare ISO dates, long Indonesian/English locale dates and
//! `dd-MM-yyyy`. Everything is reduced to a [`CanonicalDate`] plus an
//! optional clock time.

mod locale;
pub mod normalizer;

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

pub use normalizer::{normalize, parse_date, parse_time, sort_key, sort_newest_first};

/// Calendar date in canonical form, or the sentinel for input that could
/// not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalDate {
    Day(NaiveDate),
    Unknown,
}

impl CanonicalDate {
    pub const UNKNOWN_STR: &'static str = "unknown";

    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            CanonicalDate::Day(d) => Some(*d),
            CanonicalDate::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CanonicalDate::Unknown)
    }

    /// Exact-day comparison. The unknown sentinel never matches.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.day() == Some(date)
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        CanonicalDate::Day(date)
    }
}

impl std::fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonicalDate::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CanonicalDate::Unknown => f.write_str(Self::UNKNOWN_STR),
        }
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of normalizing a raw date/time pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub date: CanonicalDate,
    pub time: Option<NaiveTime>,
}

impl Moment {
    pub fn sort_key(&self) -> String {
        sort_key(&self.date, self.time)
    }
}
