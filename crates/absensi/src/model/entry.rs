use chrono::NaiveDate;
use serde::Serialize;

use super::{AttendeeType, CanonicalStatus};

/// A manual attendance entry composed locally before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub attendee_type: AttendeeType,
    pub attendee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
    pub status: CanonicalStatus,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AttendanceEntry {
    pub fn new(
        attendee_type: AttendeeType,
        attendee_id: impl Into<String>,
        status: CanonicalStatus,
        date: NaiveDate,
    ) -> Self {
        Self {
            attendee_type,
            attendee_id: attendee_id.into(),
            attendee_name: None,
            schedule_id: None,
            status,
            date,
            reason: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.attendee_name = Some(name.into());
        self
    }

    pub fn with_schedule(mut self, schedule_id: impl Into<String>) -> Self {
        self.schedule_id = Some(schedule_id.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
