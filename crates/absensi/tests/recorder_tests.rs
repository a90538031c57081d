//! Bulk and single manual attendance submission against a fake service.

mod common;

use std::sync::Arc;

use absensi::error::{Failure, ServiceError, ValidationError};
use absensi::model::{CanonicalStatus, RecordSource};
use absensi::outcome::{Outcome, OutcomeChannel, wait_terminal, NETWORK_MESSAGE};
use absensi::recorder::BulkRecorder;
use common::{entry, FakeService, RowBuilder};

#[tokio::test]
async fn test_empty_batch_short_circuits() {
    let service = Arc::new(FakeService::new());
    let recorder = BulkRecorder::new(Arc::clone(&service));

    let outcome = recorder.submit(vec![]).await;

    assert_eq!(outcome, Outcome::Success(vec![]));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_batch_is_one_call_and_ingested_as_bulk() {
    let service = Arc::new(FakeService::new());
    let recorder = BulkRecorder::new(Arc::clone(&service));

    let entries = vec![
        entry("NIS-1", CanonicalStatus::Present),
        entry("NIS-2", CanonicalStatus::Sick).with_reason("demam"),
        entry("NIS-3", CanonicalStatus::Absent),
    ];
    let records = recorder.submit(entries.clone()).await.success().unwrap();

    assert_eq!(service.calls(), vec!["record_bulk_manual_attendance"]);
    assert_eq!(service.submitted(), entries);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.source() == RecordSource::BulkManual));
    assert_eq!(records[1].status(), CanonicalStatus::Sick);
    assert_eq!(records[1].note(), Some("demam"));
}

#[tokio::test]
async fn test_bulk_source_wins_over_returned_source() {
    let service = Arc::new(FakeService {
        bulk_response: Some(vec![
            RowBuilder::new("srv-1", "NIS-1")
                .date("2026-02-13")
                .status("hadir")
                .source("manual")
                .build(),
            RowBuilder::new("srv-2", "NIS-2")
                .date("2026-02-13")
                .status("alpha")
                .source("scan")
                .build(),
        ]),
        ..Default::default()
    });
    let recorder = BulkRecorder::new(service);

    let records = recorder
        .submit(vec![
            entry("NIS-1", CanonicalStatus::Present),
            entry("NIS-2", CanonicalStatus::Absent),
        ])
        .await
        .success()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.source() == RecordSource::BulkManual));
}

#[tokio::test]
async fn test_unusable_returned_row_fails_whole_batch() {
    let service = Arc::new(FakeService {
        bulk_response: Some(vec![
            RowBuilder::new("srv-1", "NIS-1")
                .date("2026-02-13")
                .status("hadir")
                .build(),
            RowBuilder::new("srv-2", "NIS-2")
                .date("2026-02-13")
                .status("hadir")
                .without_id()
                .build(),
        ]),
        ..Default::default()
    });
    let recorder = BulkRecorder::new(Arc::clone(&service));

    let outcome = recorder
        .submit(vec![
            entry("NIS-1", CanonicalStatus::Present),
            entry("NIS-2", CanonicalStatus::Present),
        ])
        .await;

    assert!(!outcome.is_success());
    match outcome.cause() {
        Some(Failure::Service(ServiceError::Malformed(message))) => {
            assert!(message.contains("1 of 2"), "unexpected message: {}", message);
        }
        other => panic!("expected malformed response, got {:?}", other),
    }
    assert_eq!(service.calls(), vec!["record_bulk_manual_attendance"]);
}

#[tokio::test]
async fn test_validation_error_names_entry_and_skips_network() {
    let service = Arc::new(FakeService::new());
    let recorder = BulkRecorder::new(Arc::clone(&service));

    let outcome = recorder
        .submit(vec![
            entry("NIS-1", CanonicalStatus::Present),
            entry("NIS-2", CanonicalStatus::Unknown),
        ])
        .await;

    match outcome.cause() {
        Some(Failure::Validation(ValidationError::UnknownStatus {
            index, attendee_id, ..
        })) => {
            assert_eq!(*index, 1);
            assert_eq!(attendee_id, "NIS-2");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert!(outcome.user_message().unwrap().contains("Entry 1"));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_prepare_tally_matches_confirmation_summary() {
    let service = Arc::new(FakeService::new());
    let recorder = BulkRecorder::new(Arc::clone(&service));

    let batch = recorder
        .prepare(vec![
            entry("NIS-1", CanonicalStatus::Excused),
            entry("NIS-2", CanonicalStatus::Excused),
            entry("NIS-3", CanonicalStatus::Late),
        ])
        .unwrap();
    let tally = batch.tally();
    assert_eq!(tally.get(CanonicalStatus::Excused), 2);
    assert_eq!(tally.get(CanonicalStatus::Late), 1);
    assert!(service.calls().is_empty());

    let records = recorder.submit_batch(batch).await.success().unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_api_rejection_keeps_message_verbatim() {
    let service = Arc::new(FakeService::failing(ServiceError::api(
        422,
        "Jadwal sudah ditutup",
    )));
    let recorder = BulkRecorder::new(service);

    let outcome = recorder
        .submit(vec![entry("NIS-1", CanonicalStatus::Present)])
        .await;
    assert_eq!(outcome.user_message().as_deref(), Some("Jadwal sudah ditutup"));
}

#[tokio::test]
async fn test_network_failure_is_whole_batch_error() {
    let service = Arc::new(FakeService::failing(ServiceError::Timeout(
        "30s".to_string(),
    )));
    let recorder = BulkRecorder::new(service);

    let outcome = recorder
        .submit(vec![
            entry("NIS-1", CanonicalStatus::Present),
            entry("NIS-2", CanonicalStatus::Present),
        ])
        .await;
    assert!(outcome.success().is_none());

    let outcome = recorder
        .submit(vec![entry("NIS-1", CanonicalStatus::Present)])
        .await;
    assert_eq!(outcome.user_message().as_deref(), Some(NETWORK_MESSAGE));
}

#[tokio::test]
async fn test_submission_through_outcome_channel() {
    let service = Arc::new(FakeService::new());
    let recorder = Arc::new(BulkRecorder::new(Arc::clone(&service)));

    let channel = OutcomeChannel::new();
    let mut rx = channel.subscribe();
    assert!(rx.borrow().is_loading());

    let task_recorder = Arc::clone(&recorder);
    let handle = tokio::spawn(channel.run(async move {
        task_recorder
            .submit(vec![entry("NIS-1", CanonicalStatus::Return)])
            .await
    }));

    let terminal = wait_terminal(&mut rx).await;
    assert!(terminal.is_success());
    assert_eq!(handle.await.unwrap(), terminal);
}

#[tokio::test]
async fn test_record_one_validates_locally() {
    let service = Arc::new(FakeService::new());
    let recorder = BulkRecorder::new(Arc::clone(&service));

    let outcome = recorder.record_one(entry("  ", CanonicalStatus::Late)).await;
    assert_eq!(
        outcome.cause(),
        Some(&Failure::Validation(ValidationError::MissingAttendeeId {
            index: 0
        }))
    );
    assert!(service.calls().is_empty());
}
