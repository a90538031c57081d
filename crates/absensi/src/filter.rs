//! Record filtering for dashboard lists.

use chrono::NaiveDate;

use crate::model::{AttendanceRecord, CanonicalStatus};

/// Optional predicates over a record set. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub status: Option<CanonicalStatus>,
    /// Exact day. Records with an unknown date never match.
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of attendee name, attendee id or class.
    pub text: Option<String>,
}

impl RecordFilter {
    pub fn status(mut self, status: CanonicalStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.date.is_none() && self.needle().is_none()
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.matches_with_needle(record, self.needle().as_deref())
    }

    // Predicates short-circuit in status, date, text order.
    fn matches_with_needle(&self, record: &AttendanceRecord, needle: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if record.status() != status {
                return false;
            }
        }

        if let Some(date) = self.date {
            if !record.date().is_on(date) {
                return false;
            }
        }

        if let Some(needle) = needle {
            return text_matches(record, needle);
        }

        true
    }
}

fn text_matches(record: &AttendanceRecord, needle: &str) -> bool {
    record.attendee_name().to_lowercase().contains(needle)
        || record.attendee_id().to_lowercase().contains(needle)
        || record
            .class_name()
            .is_some_and(|c| c.to_lowercase().contains(needle))
}

/// Returns the records matching every predicate, in input order.
pub fn filter(records: &[AttendanceRecord], filter: &RecordFilter) -> Vec<AttendanceRecord> {
    let needle = filter.needle();
    records
        .iter()
        .filter(|r| filter.matches_with_needle(r, needle.as_deref()))
        .cloned()
        .collect()
}
