use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::CanonicalStatus;
use crate::temporal::{sort_key, CanonicalDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeType {
    Student,
    Teacher,
}

impl AttendeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendeeType::Student => "student",
            AttendeeType::Teacher => "teacher",
        }
    }

    /// Accepts the English and Indonesian spellings used by the service.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "student" | "siswa" | "murid" => Some(AttendeeType::Student),
            "teacher" | "guru" => Some(AttendeeType::Teacher),
            _ => None,
        }
    }
}

/// How an attendance record came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Scan,
    Manual,
    BulkManual,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Scan => "scan",
            RecordSource::Manual => "manual",
            RecordSource::BulkManual => "bulk_manual",
        }
    }

    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "scan" | "qr" | "qr_scan" => Some(RecordSource::Scan),
            "manual" => Some(RecordSource::Manual),
            "bulk_manual" | "bulk" => Some(RecordSource::BulkManual),
            _ => None,
        }
    }
}

/// Field values for building an [`AttendanceRecord`].
#[derive(Debug, Clone)]
pub struct RecordParts {
    pub id: String,
    pub attendee_type: AttendeeType,
    pub attendee_id: String,
    pub attendee_name: String,
    pub class_name: Option<String>,
    pub schedule_id: Option<String>,
    pub date: CanonicalDate,
    pub time: Option<NaiveTime>,
    pub status: CanonicalStatus,
    pub raw_status: Option<String>,
    pub status_label: Option<String>,
    pub note: Option<String>,
    pub source: RecordSource,
}

/// Canonical attendance record.
///
/// Fields are read-only once constructed. A correction is a new record
/// (see [`AttendanceRecord::corrected`]) pointing back at the one it
/// supersedes. The raw status is kept for tracing classification issues
/// and is never serialized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    id: String,
    attendee_type: AttendeeType,
    attendee_id: String,
    attendee_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule_id: Option<String>,
    date: CanonicalDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<NaiveTime>,
    status: CanonicalStatus,
    #[serde(skip)]
    raw_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    source: RecordSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    supersedes: Option<String>,
}

impl AttendanceRecord {
    pub fn from_parts(parts: RecordParts) -> Self {
        Self {
            id: parts.id,
            attendee_type: parts.attendee_type,
            attendee_id: parts.attendee_id,
            attendee_name: parts.attendee_name,
            class_name: parts.class_name,
            schedule_id: parts.schedule_id,
            date: parts.date,
            time: parts.time,
            status: parts.status,
            raw_status: parts.raw_status,
            status_label: parts.status_label,
            note: parts.note,
            source: parts.source,
            supersedes: None,
        }
    }

    /// Returns a new manual record correcting this one. The original is
    /// left untouched.
    pub fn corrected(&self, status: CanonicalStatus, note: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            status,
            raw_status: None,
            status_label: None,
            note: note.or_else(|| self.note.clone()),
            source: RecordSource::Manual,
            supersedes: Some(self.id.clone()),
            ..self.clone()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attendee_type(&self) -> AttendeeType {
        self.attendee_type
    }

    pub fn attendee_id(&self) -> &str {
        &self.attendee_id
    }

    pub fn attendee_name(&self) -> &str {
        &self.attendee_name
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn schedule_id(&self) -> Option<&str> {
        self.schedule_id.as_deref()
    }

    pub fn date(&self) -> CanonicalDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn status(&self) -> CanonicalStatus {
        self.status
    }

    pub fn raw_status(&self) -> Option<&str> {
        self.raw_status.as_deref()
    }

    pub fn status_label(&self) -> Option<&str> {
        self.status_label.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn source(&self) -> RecordSource {
        self.source
    }

    pub fn supersedes(&self) -> Option<&str> {
        self.supersedes.as_deref()
    }

    pub fn sort_key(&self) -> String {
        sort_key(&self.date, self.time)
    }
}
