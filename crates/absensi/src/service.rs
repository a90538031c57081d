//! Seam to the remote attendance service.
//!
//! The transport (HTTP client, auth headers, base URL) lives outside this
//! crate. Implementations hand back rows in the service's own loose shape;
//! everything downstream normalizes them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::ingest::RawAttendanceRow;
use crate::model::AttendanceEntry;
use crate::report::FollowUpCounters;

/// Per-status totals as the service reports them, keyed by its own raw
/// status words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawStatusSummary(pub BTreeMap<String, usize>);

impl RawStatusSummary {
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl FromIterator<(String, usize)> for RawStatusSummary {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        RawStatusSummary(iter.into_iter().collect())
    }
}

#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Records a check-in from a scanned QR token.
    async fn scan_attendance(&self, token: &str) -> Result<RawAttendanceRow, ServiceError>;

    async fn get_attendance_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawStatusSummary, ServiceError>;

    async fn get_class_attendance_by_date(
        &self,
        class_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<RawAttendanceRow>, ServiceError>;

    /// Attendance of the signed-in student.
    async fn get_my_attendance(&self) -> Result<Vec<RawAttendanceRow>, ServiceError>;

    /// Teaching attendance of the signed-in teacher.
    async fn get_my_teaching_attendance(&self) -> Result<Vec<RawAttendanceRow>, ServiceError>;

    async fn record_manual_attendance(
        &self,
        entry: &AttendanceEntry,
    ) -> Result<RawAttendanceRow, ServiceError>;

    /// Submits the whole batch in one call. The service either accepts every
    /// entry or fails the call.
    async fn record_bulk_manual_attendance(
        &self,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<RawAttendanceRow>, ServiceError>;

    async fn get_students_follow_up(&self) -> Result<Vec<FollowUpCounters>, ServiceError>;
}
