//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use absensi::ingest::RawAttendanceRow;
use absensi::model::{
    AttendanceEntry, AttendanceRecord, AttendeeType, CanonicalStatus, RecordParts, RecordSource,
};
use absensi::temporal::CanonicalDate;
use chrono::{NaiveDate, NaiveTime};

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

/// Builder for `AttendanceRecord` instances.
pub struct RecordBuilder {
    parts: RecordParts,
}

impl RecordBuilder {
    /// A present student on 2026-02-13 with no time.
    pub fn new(id: &str, attendee_id: &str) -> Self {
        Self {
            parts: RecordParts {
                id: id.to_string(),
                attendee_type: AttendeeType::Student,
                attendee_id: attendee_id.to_string(),
                attendee_name: format!("Siswa {}", attendee_id),
                class_name: None,
                schedule_id: None,
                date: CanonicalDate::Day(ymd(2026, 2, 13)),
                time: None,
                status: CanonicalStatus::Present,
                raw_status: Some("hadir".to_string()),
                status_label: None,
                note: None,
                source: RecordSource::Scan,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.parts.attendee_name = name.to_string();
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.parts.class_name = Some(class_name.to_string());
        self
    }

    pub fn teacher(mut self) -> Self {
        self.parts.attendee_type = AttendeeType::Teacher;
        self
    }

    pub fn status(mut self, status: CanonicalStatus) -> Self {
        self.parts.status = status;
        self.parts.raw_status = Some(status.as_str().to_string());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.parts.date = CanonicalDate::Day(date);
        self
    }

    pub fn unknown_date(mut self) -> Self {
        self.parts.date = CanonicalDate::Unknown;
        self
    }

    pub fn time(mut self, time: NaiveTime) -> Self {
        self.parts.time = Some(time);
        self
    }

    pub fn source(mut self, source: RecordSource) -> Self {
        self.parts.source = source;
        self
    }

    pub fn build(self) -> AttendanceRecord {
        AttendanceRecord::from_parts(self.parts)
    }
}

/// Shorthand for a record with a given status.
pub fn record(id: &str, attendee_id: &str, status: CanonicalStatus) -> AttendanceRecord {
    RecordBuilder::new(id, attendee_id).status(status).build()
}

/// Builder for `RawAttendanceRow` instances as the service would send them.
pub struct RowBuilder {
    row: RawAttendanceRow,
}

impl RowBuilder {
    pub fn new(id: &str, attendee_id: &str) -> Self {
        Self {
            row: RawAttendanceRow {
                id: Some(id.to_string()),
                attendee_id: Some(attendee_id.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.row.attendee_name = Some(name.to_string());
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.row.class_name = Some(class_name.to_string());
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.row.date = Some(date.to_string());
        self
    }

    pub fn time(mut self, time: &str) -> Self {
        self.row.time = Some(time.to_string());
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.row.status = Some(status.to_string());
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.row.note = Some(note.to_string());
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.row.source = Some(source.to_string());
        self
    }

    /// Drops the row id, as a truncated service response would.
    pub fn without_id(mut self) -> Self {
        self.row.id = None;
        self
    }

    pub fn build(self) -> RawAttendanceRow {
        self.row
    }
}

pub fn entry(attendee_id: &str, status: CanonicalStatus) -> AttendanceEntry {
    AttendanceEntry::new(AttendeeType::Student, attendee_id, status, ymd(2026, 2, 13))
}
