use std::cmp::Reverse;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::locale::month_number;
use super::{CanonicalDate, Moment};

/// Date layouts understood by the normalizer, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateLayout {
    /// `2026-02-13T07:15:00`, optional fraction and zone suffix.
    IsoDateTime,
    /// `2026-02-13 07:15:00`
    SpacedDateTime,
    /// `2026-02-13`
    IsoDate,
    /// `Senin, 13 Februari 2026` / `Friday, 13 Feb 2026`
    LongLocale,
    /// `13-02-2026`
    DayMonthYear,
}

const DATE_LAYOUTS: [DateLayout; 5] = [
    DateLayout::IsoDateTime,
    DateLayout::SpacedDateTime,
    DateLayout::IsoDate,
    DateLayout::LongLocale,
    DateLayout::DayMonthYear,
];

fn long_date_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(?:[^\d,]+,\s*)?(\d{1,2})\s+(\p{L}+\.?)\s+(\d{4})$").ok())
        .as_ref()
}

/// Normalizes a raw date and an optional separate raw time.
///
/// A time embedded in the date string wins over `raw_time`. When no date
/// layout matches, the date becomes [`CanonicalDate::Unknown`]; this is
/// never reported as an error.
pub fn normalize(raw_date: Option<&str>, raw_time: Option<&str>) -> Moment {
    let date_input = raw_date.map(str::trim).filter(|s| !s.is_empty());

    let parsed = date_input.and_then(parse_date_and_time);
    let (date, embedded_time) = match parsed {
        Some((date, time)) => (CanonicalDate::Day(date), time),
        None => {
            if let Some(raw) = date_input {
                log::debug!("Unrecognized attendance date '{}', using unknown sentinel", raw);
            }
            (CanonicalDate::Unknown, None)
        }
    };

    let time = embedded_time.or_else(|| raw_time.and_then(parse_time));

    Moment { date, time }
}

/// Parses just the calendar date of a raw string, ignoring any time part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_and_time(raw.trim()).map(|(date, _)| date)
}

/// Parses a raw clock time: `HH:mm:ss`, then `HH:mm`, then the time part of
/// a full datetime string.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
        .or_else(|| {
            let separator = raw.as_bytes().get(10).copied();
            if matches!(separator, Some(b'T') | Some(b' ')) {
                embedded_time(raw)
            } else {
                None
            }
        })
}

fn parse_date_and_time(raw: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| parse_with_layout(*layout, raw))
}

fn parse_with_layout(layout: DateLayout, raw: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    match layout {
        DateLayout::IsoDateTime => parse_datetime(raw, b'T'),
        DateLayout::SpacedDateTime => parse_datetime(raw, b' '),
        DateLayout::IsoDate => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| (d, None)),
        DateLayout::LongLocale => parse_long_locale(raw).map(|d| (d, None)),
        DateLayout::DayMonthYear => NaiveDate::parse_from_str(raw, "%d-%m-%Y")
            .ok()
            .map(|d| (d, None)),
    }
}

fn parse_datetime(raw: &str, separator: u8) -> Option<(NaiveDate, Option<NaiveTime>)> {
    if raw.len() < 11 || raw.as_bytes()[10] != separator {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()?;
    Some((date, embedded_time(raw)))
}

/// Slices the clock time out of a datetime string: positions 11..19 for
/// second precision, 11..16 for minute precision.
fn embedded_time(raw: &str) -> Option<NaiveTime> {
    raw.get(11..19)
        .and_then(|s| NaiveTime::parse_from_str(s, "%H:%M:%S").ok())
        .or_else(|| {
            raw.get(11..16)
                .and_then(|s| NaiveTime::parse_from_str(s, "%H:%M").ok())
        })
}

fn parse_long_locale(raw: &str) -> Option<NaiveDate> {
    let caps = long_date_regex()?.captures(raw)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = month_number(caps.get(2)?.as_str())?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Chronologically sortable key, whatever format the input arrived in.
///
/// Unknown dates sort before every real date and a missing time counts as
/// midnight.
pub fn sort_key(date: &CanonicalDate, time: Option<NaiveTime>) -> String {
    let date_part = match date {
        CanonicalDate::Day(d) => d.format("%Y-%m-%d").to_string(),
        CanonicalDate::Unknown => "0000-00-00".to_string(),
    };
    let time_part = time
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "00:00:00".to_string());
    format!("{} {}", date_part, time_part)
}

/// Stable newest-first ordering by [`sort_key`].
pub fn sort_newest_first<T, F>(items: &mut [T], moment: F)
where
    F: Fn(&T) -> (CanonicalDate, Option<NaiveTime>),
{
    items.sort_by_cached_key(|item| {
        let (date, time) = moment(item);
        Reverse(sort_key(&date, time))
    });
}
