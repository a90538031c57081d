//! Scripted attendance service for integration tests.
//!
//! Responses are set up front; every call is appended to a call log so
//! tests can assert on what reached the "network".

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use absensi::error::ServiceError;
use absensi::ingest::RawAttendanceRow;
use absensi::model::AttendanceEntry;
use absensi::report::FollowUpCounters;
use absensi::service::{AttendanceService, RawStatusSummary};
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Default)]
pub struct FakeService {
    pub my_rows: Vec<RawAttendanceRow>,
    pub class_rows: Vec<RawAttendanceRow>,
    pub scan_row: Option<RawAttendanceRow>,
    pub summary: RawStatusSummary,
    pub counters: Vec<FollowUpCounters>,
    /// Returned by the bulk call instead of echoing the entries.
    pub bulk_response: Option<Vec<RawAttendanceRow>>,
    /// Returned by every call when set.
    pub failure: Option<ServiceError>,
    /// Returned by the summary call only when set.
    pub summary_failure: Option<ServiceError>,
    /// Artificial latency of the summary call.
    pub summary_delay: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<AttendanceEntry>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<AttendanceEntry> {
        self.submitted.lock().unwrap().clone()
    }

    fn record_call(&self, call: &str) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call.to_string());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn echo(entry: &AttendanceEntry, n: usize) -> RawAttendanceRow {
        RawAttendanceRow {
            id: Some(format!("srv-{}", n)),
            attendee_type: Some(entry.attendee_type.as_str().to_string()),
            attendee_id: Some(entry.attendee_id.clone()),
            attendee_name: entry.attendee_name.clone(),
            schedule_id: entry.schedule_id.clone(),
            date: Some(entry.date.format("%Y-%m-%d").to_string()),
            status: Some(entry.status.as_str().to_string()),
            note: entry.reason.clone(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AttendanceService for FakeService {
    async fn scan_attendance(&self, token: &str) -> Result<RawAttendanceRow, ServiceError> {
        self.record_call(&format!("scan_attendance:{}", token))?;
        self.scan_row
            .clone()
            .ok_or_else(|| ServiceError::api(404, "QR code tidak valid"))
    }

    async fn get_attendance_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawStatusSummary, ServiceError> {
        self.record_call(&format!("get_attendance_summary:{}..{}", start, end))?;
        if let Some(delay) = self.summary_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.summary_failure {
            Some(e) => Err(e.clone()),
            None => Ok(self.summary.clone()),
        }
    }

    async fn get_class_attendance_by_date(
        &self,
        class_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<RawAttendanceRow>, ServiceError> {
        self.record_call(&format!("get_class_attendance_by_date:{}:{}", class_id, date))?;
        Ok(self.class_rows.clone())
    }

    async fn get_my_attendance(&self) -> Result<Vec<RawAttendanceRow>, ServiceError> {
        self.record_call("get_my_attendance")?;
        Ok(self.my_rows.clone())
    }

    async fn get_my_teaching_attendance(&self) -> Result<Vec<RawAttendanceRow>, ServiceError> {
        self.record_call("get_my_teaching_attendance")?;
        Ok(self.my_rows.clone())
    }

    async fn record_manual_attendance(
        &self,
        entry: &AttendanceEntry,
    ) -> Result<RawAttendanceRow, ServiceError> {
        self.record_call("record_manual_attendance")?;
        self.submitted.lock().unwrap().push(entry.clone());
        Ok(Self::echo(entry, 1))
    }

    async fn record_bulk_manual_attendance(
        &self,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<RawAttendanceRow>, ServiceError> {
        self.record_call("record_bulk_manual_attendance")?;
        self.submitted.lock().unwrap().extend_from_slice(entries);
        if let Some(rows) = &self.bulk_response {
            return Ok(rows.clone());
        }
        Ok(entries
            .iter()
            .enumerate()
            .map(|(i, e)| Self::echo(e, i + 1))
            .collect())
    }

    async fn get_students_follow_up(&self) -> Result<Vec<FollowUpCounters>, ServiceError> {
        self.record_call("get_students_follow_up")?;
        Ok(self.counters.clone())
    }
}
