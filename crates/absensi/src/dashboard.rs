//! Role dashboards: fetch from the service, normalize, then report.
//!
//! Every operation is an independent call returning its own [`Outcome`].
//! Nothing is cached between calls.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use futures_util::future::join_all;
use serde::Serialize;
use tracing::Instrument;

use crate::classifier::{label_in, LabelLocale, StatusClassifier};
use crate::config::{Role, Settings};
use crate::filter::{filter, RecordFilter};
use crate::ingest::{ingest, normalize_row, IngestContext, RawAttendanceRow};
use crate::model::{AttendanceRecord, AttendeeType, RecordSource};
use crate::outcome::Outcome;
use crate::report::{count_by_status, FollowUpEntry, FollowUpScorer, StatusCounts, StatusFractions};
use crate::service::AttendanceService;
use crate::temporal::sort_newest_first;

/// Attendance of one class on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDayReport {
    pub records: Vec<AttendanceRecord>,
    pub counts: StatusCounts,
    pub fractions: StatusFractions,
}

impl ClassDayReport {
    pub fn from_records(records: Vec<AttendanceRecord>) -> Self {
        let counts = count_by_status(&records);
        let fractions = counts.fractions();
        Self {
            records,
            counts,
            fractions,
        }
    }

    /// Narrows the report; counts and fractions follow the narrowed set.
    pub fn filtered(&self, criteria: &RecordFilter) -> Self {
        Self::from_records(filter(&self.records, criteria))
    }
}

/// Landing view of a role. The two halves are fetched concurrently and
/// fail independently.
#[derive(Debug, Clone, PartialEq)]
pub enum Overview {
    /// Students and teachers: their own attendance plus the period summary.
    Personal {
        attendance: Outcome<Vec<AttendanceRecord>>,
        summary: Outcome<StatusCounts>,
    },
    /// Homeroom teachers, vice-principals and admins.
    Supervisor {
        summary: Outcome<StatusCounts>,
        follow_up: Outcome<Vec<FollowUpEntry>>,
    },
}

pub struct AttendanceDashboard<S> {
    service: Arc<S>,
    classifier: StatusClassifier,
    scorer: FollowUpScorer,
    locale: LabelLocale,
}

impl<S: AttendanceService> AttendanceDashboard<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            classifier: StatusClassifier::default(),
            scorer: FollowUpScorer::default(),
            locale: LabelLocale::default(),
        }
    }

    pub fn with_settings(service: Arc<S>, settings: &Settings) -> Self {
        Self {
            service,
            classifier: StatusClassifier::new(&settings.status_synonyms),
            scorer: FollowUpScorer::new(settings.follow_up),
            locale: settings.locale,
        }
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    /// Display label for a record in the configured locale.
    pub fn status_label(&self, record: &AttendanceRecord) -> String {
        label_in(record.status(), record.status_label(), self.locale)
    }

    fn records_from(
        &self,
        rows: &[RawAttendanceRow],
        attendee_type: AttendeeType,
        source: RecordSource,
    ) -> Vec<AttendanceRecord> {
        let mut records =
            ingest(rows, &self.classifier, IngestContext::new(attendee_type, source)).records;
        sort_newest_first(&mut records, |r| (r.date(), r.time()));
        records
    }

    pub async fn my_attendance(&self) -> Outcome<Vec<AttendanceRecord>> {
        let result = self
            .service
            .get_my_attendance()
            .instrument(tracing::info_span!("my_attendance"))
            .await;
        Outcome::from_service_result(result)
            .map(|rows| self.records_from(&rows, AttendeeType::Student, RecordSource::Scan))
    }

    pub async fn my_teaching_attendance(&self) -> Outcome<Vec<AttendanceRecord>> {
        let result = self
            .service
            .get_my_teaching_attendance()
            .instrument(tracing::info_span!("my_teaching_attendance"))
            .await;
        Outcome::from_service_result(result)
            .map(|rows| self.records_from(&rows, AttendeeType::Teacher, RecordSource::Scan))
    }

    pub async fn class_day_report(&self, class_id: &str, date: NaiveDate) -> Outcome<ClassDayReport> {
        let result = self
            .service
            .get_class_attendance_by_date(class_id, date)
            .instrument(tracing::info_span!("class_day_report", class_id, %date))
            .await;

        Outcome::from_service_result(result).map(|rows| {
            let records = self.records_from(&rows, AttendeeType::Student, RecordSource::Scan);
            tracing::debug!(class_id, records = records.len(), "Class attendance loaded");
            ClassDayReport::from_records(records)
        })
    }

    /// Reports for several classes on the same day, fetched concurrently.
    /// Results keep the order of `class_ids`.
    pub async fn class_day_reports(
        &self,
        class_ids: &[String],
        date: NaiveDate,
    ) -> Vec<(String, Outcome<ClassDayReport>)> {
        let reports = join_all(class_ids.iter().map(|id| self.class_day_report(id, date))).await;
        class_ids.iter().cloned().zip(reports).collect()
    }

    pub async fn summary(&self, start: NaiveDate, end: NaiveDate) -> Outcome<StatusCounts> {
        let result = self
            .service
            .get_attendance_summary(start, end)
            .instrument(tracing::info_span!("attendance_summary", %start, %end))
            .await;
        Outcome::from_service_result(result)
            .map(|summary| StatusCounts::from_raw_summary(&summary, &self.classifier))
    }

    pub async fn follow_up_board(&self) -> Outcome<Vec<FollowUpEntry>> {
        let result = self
            .service
            .get_students_follow_up()
            .instrument(tracing::info_span!("follow_up_board"))
            .await;
        Outcome::from_service_result(result).map(|counters| {
            let board = self.scorer.board_from_counters(&counters);
            tracing::debug!(
                students = counters.len(),
                flagged = board.len(),
                "Follow-up board computed"
            );
            board
        })
    }

    pub async fn scan(&self, token: &str) -> Outcome<AttendanceRecord> {
        let result = self
            .service
            .scan_attendance(token)
            .instrument(tracing::info_span!("scan_attendance"))
            .await;

        Outcome::from_service_result(result).and_then(|row| {
            match normalize_row(
                &row,
                &self.classifier,
                IngestContext::forced(AttendeeType::Student, RecordSource::Scan),
            ) {
                Ok(record) => Outcome::Success(record),
                Err(reason) => {
                    tracing::warn!(%reason, "Scan response could not be normalized");
                    Outcome::failed(crate::error::ServiceError::Malformed(reason.to_string()))
                }
            }
        })
    }

    /// Landing view for `role`. The summary covers the month of `today` up
    /// to and including `today`.
    pub async fn overview(&self, role: Role, today: NaiveDate) -> Overview {
        let start = today.with_day(1).unwrap_or(today);

        if role.is_supervisory() {
            let (summary, follow_up) =
                tokio::join!(self.summary(start, today), self.follow_up_board());
            return Overview::Supervisor { summary, follow_up };
        }

        let attendance = async {
            if role == Role::Teacher {
                self.my_teaching_attendance().await
            } else {
                self.my_attendance().await
            }
        };
        let (attendance, summary) = tokio::join!(attendance, self.summary(start, today));
        Overview::Personal {
            attendance,
            summary,
        }
    }
}
