//! Manual and bulk attendance submission.

use std::sync::Arc;

use tracing::Instrument;

use crate::classifier::StatusClassifier;
use crate::error::{ServiceError, ValidationError};
use crate::ingest::{ingest, normalize_row, IngestContext};
use crate::model::{AttendanceEntry, AttendanceRecord, AttendeeType, RecordSource};
use crate::outcome::Outcome;
use crate::report::StatusCounts;
use crate::service::AttendanceService;

/// A batch that passed local validation and is ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkBatch {
    entries: Vec<AttendanceEntry>,
}

impl BulkBatch {
    pub fn entries(&self) -> &[AttendanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries per intended status, for the confirmation summary shown
    /// before submitting. Not reconciled with what the service stores.
    pub fn tally(&self) -> StatusCounts {
        let mut counts = StatusCounts::zeroed();
        for entry in &self.entries {
            counts.add(entry.status, 1);
        }
        counts
    }
}

fn validate_entry(index: usize, entry: &AttendanceEntry) -> Result<(), ValidationError> {
    if entry.attendee_id.trim().is_empty() {
        return Err(ValidationError::MissingAttendeeId { index });
    }
    if !entry.status.is_known() {
        return Err(ValidationError::UnknownStatus {
            index,
            attendee_id: entry.attendee_id.clone(),
            status: entry.status,
        });
    }
    Ok(())
}

/// Checks every entry and stops at the first invalid one.
pub fn prepare(entries: Vec<AttendanceEntry>) -> Result<BulkBatch, ValidationError> {
    for (index, entry) in entries.iter().enumerate() {
        validate_entry(index, entry)?;
    }
    Ok(BulkBatch { entries })
}

pub struct BulkRecorder<S> {
    service: Arc<S>,
    classifier: StatusClassifier,
}

impl<S: AttendanceService> BulkRecorder<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self::with_classifier(service, StatusClassifier::default())
    }

    pub fn with_classifier(service: Arc<S>, classifier: StatusClassifier) -> Self {
        Self {
            service,
            classifier,
        }
    }

    pub fn prepare(&self, entries: Vec<AttendanceEntry>) -> Result<BulkBatch, ValidationError> {
        prepare(entries)
    }

    /// Validates and submits in one step.
    pub async fn submit(&self, entries: Vec<AttendanceEntry>) -> Outcome<Vec<AttendanceRecord>> {
        match prepare(entries) {
            Ok(batch) => self.submit_batch(batch).await,
            Err(e) => {
                tracing::warn!(error = %e, "Bulk attendance rejected before submission");
                Outcome::failed(e)
            }
        }
    }

    /// Submits a prepared batch as a single service call. The result is all
    /// or nothing: a response row that cannot be turned into a record fails
    /// the whole call. An empty batch succeeds without contacting the
    /// service.
    pub async fn submit_batch(&self, batch: BulkBatch) -> Outcome<Vec<AttendanceRecord>> {
        if batch.is_empty() {
            tracing::debug!("Empty bulk attendance batch, nothing to submit");
            return Outcome::Success(Vec::new());
        }

        let span = tracing::info_span!("bulk_attendance", entries = batch.len());
        async {
            let result = self
                .service
                .record_bulk_manual_attendance(batch.entries())
                .await;

            let rows = match result {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(error = %e, "Bulk attendance submission failed");
                    return Outcome::failed(e);
                }
            };

            let default_type = batch
                .entries()
                .first()
                .map(|e| e.attendee_type)
                .unwrap_or(AttendeeType::Student);
            let report = ingest(
                &rows,
                &self.classifier,
                IngestContext::forced(default_type, RecordSource::BulkManual),
            );

            // All or nothing: one unusable row fails the call.
            if !report.rejected.is_empty() {
                let (index, reason) = &report.rejected[0];
                tracing::warn!(
                    rejected = report.rejected.len(),
                    returned = rows.len(),
                    "Bulk attendance response contained unusable rows"
                );
                return Outcome::failed(ServiceError::Malformed(format!(
                    "{} of {} returned rows unusable, first at #{}: {}",
                    report.rejected.len(),
                    rows.len(),
                    index,
                    reason
                )));
            }

            tracing::info!(
                submitted = batch.len(),
                returned = report.records.len(),
                "Bulk attendance recorded"
            );
            Outcome::Success(report.records)
        }
        .instrument(span)
        .await
    }

    /// Submits a single manual entry.
    pub async fn record_one(&self, entry: AttendanceEntry) -> Outcome<AttendanceRecord> {
        if let Err(e) = validate_entry(0, &entry) {
            return Outcome::failed(e);
        }

        let span = tracing::info_span!("manual_attendance", attendee = %entry.attendee_id);
        async {
            let row = match self.service.record_manual_attendance(&entry).await {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(error = %e, "Manual attendance submission failed");
                    return Outcome::failed(e);
                }
            };

            match normalize_row(
                &row,
                &self.classifier,
                IngestContext::forced(entry.attendee_type, RecordSource::Manual),
            ) {
                Ok(record) => Outcome::Success(record),
                Err(reason) => Outcome::failed(ServiceError::Malformed(reason.to_string())),
            }
        }
        .instrument(span)
        .await
    }
}
