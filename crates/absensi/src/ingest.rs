//! Conversion of raw service rows into canonical [`AttendanceRecord`]s.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::classifier::StatusClassifier;
use crate::model::{AttendanceRecord, AttendeeType, RecordParts, RecordSource};
use crate::temporal::normalize;

const ID_KEYS: &[&str] = &["id"];
const TYPE_KEYS: &[&str] = &["attendee_type", "type"];
const ATTENDEE_ID_KEYS: &[&str] = &["attendee_id", "student_id", "teacher_id", "user_id"];
const NAME_KEYS: &[&str] = &["attendee_name", "name", "student_name", "teacher_name"];
const CLASS_KEYS: &[&str] = &["class_name", "class", "rombel"];
const SCHEDULE_KEYS: &[&str] = &["schedule_id"];
const DATE_KEYS: &[&str] = &["date"];
const TIME_KEYS: &[&str] = &["time", "checked_in_at"];
const STATUS_KEYS: &[&str] = &["status"];
const STATUS_LABEL_KEYS: &[&str] = &["status_label"];
const NOTE_KEYS: &[&str] = &["note", "keterangan", "reason"];
const SOURCE_KEYS: &[&str] = &["source"];

/// Attendance row as delivered by the service. Every field is optional and
/// identifiers may arrive as strings or numbers.
///
/// Each field accepts several spellings. When a row carries more than one,
/// the first non-blank key in the field's list wins (for the attendee id:
/// `attendee_id`, `student_id`, `teacher_id`, `user_id`). Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RawAttendanceRow {
    pub id: Option<String>,
    pub attendee_type: Option<String>,
    pub attendee_id: Option<String>,
    pub attendee_name: Option<String>,
    pub class_name: Option<String>,
    pub schedule_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub status_label: Option<String>,
    pub note: Option<String>,
    pub source: Option<String>,
}

impl TryFrom<Map<String, Value>> for RawAttendanceRow {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: text_field(&map, ID_KEYS)?,
            attendee_type: text_field(&map, TYPE_KEYS)?,
            attendee_id: text_field(&map, ATTENDEE_ID_KEYS)?,
            attendee_name: text_field(&map, NAME_KEYS)?,
            class_name: text_field(&map, CLASS_KEYS)?,
            schedule_id: text_field(&map, SCHEDULE_KEYS)?,
            date: text_field(&map, DATE_KEYS)?,
            time: text_field(&map, TIME_KEYS)?,
            status: text_field(&map, STATUS_KEYS)?,
            status_label: text_field(&map, STATUS_LABEL_KEYS)?,
            note: text_field(&map, NOTE_KEYS)?,
            source: text_field(&map, SOURCE_KEYS)?,
        })
    }
}

/// First non-blank string or number under `keys`, as text. Nulls and blank
/// strings fall through to the next key.
pub(crate) fn text_field(map: &Map<String, Value>, keys: &[&str]) -> Result<Option<String>, String> {
    for key in keys {
        match map.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.trim().is_empty() => continue,
            Some(Value::String(s)) => return Ok(Some(s.clone())),
            Some(Value::Number(n)) => return Ok(Some(n.to_string())),
            Some(other) => {
                return Err(format!(
                    "field '{}': expected string or number, got {}",
                    key, other
                ))
            }
        }
    }
    Ok(None)
}

/// First count under `keys`; numeric strings are accepted. Missing means 0.
pub(crate) fn count_field(map: &Map<String, Value>, keys: &[&str]) -> Result<u32, String> {
    match text_field(map, keys)? {
        None => Ok(0),
        Some(text) => text
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("count '{}' in {:?}: {}", text, keys, e)),
    }
}

/// Why a raw row was kept out of the record set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("row has no id")]
    MissingId,
    #[error("row has no attendee id")]
    MissingAttendeeId,
    #[error("row has no date")]
    MissingDate,
}

/// Defaults applied when a row does not say what it is.
#[derive(Debug, Clone, Copy)]
pub struct IngestContext {
    pub attendee_type: AttendeeType,
    pub source: RecordSource,
    /// When set, `source` wins over whatever the row claims.
    pub force_source: bool,
}

impl IngestContext {
    pub fn new(attendee_type: AttendeeType, source: RecordSource) -> Self {
        Self {
            attendee_type,
            source,
            force_source: false,
        }
    }

    /// Context for rows produced by a call whose source is known: a scan,
    /// a manual entry or a bulk submission.
    pub fn forced(attendee_type: AttendeeType, source: RecordSource) -> Self {
        Self {
            force_source: true,
            ..Self::new(attendee_type, source)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub records: Vec<AttendanceRecord>,
    /// Row index and reason for each rejected row.
    pub rejected: Vec<(usize, RejectReason)>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalizes one row. A row with a date string that cannot be parsed is
/// still accepted with the unknown date sentinel; a row with no date at
/// all is rejected.
pub fn normalize_row(
    row: &RawAttendanceRow,
    classifier: &StatusClassifier,
    context: IngestContext,
) -> Result<AttendanceRecord, RejectReason> {
    let id = non_blank(&row.id).ok_or(RejectReason::MissingId)?;
    let attendee_id = non_blank(&row.attendee_id).ok_or(RejectReason::MissingAttendeeId)?;
    let raw_date = non_blank(&row.date).ok_or(RejectReason::MissingDate)?;

    let moment = normalize(Some(&raw_date), row.time.as_deref());
    let status = classifier.classify(row.status.as_deref());

    let attendee_type = row
        .attendee_type
        .as_deref()
        .and_then(AttendeeType::from_raw)
        .unwrap_or(context.attendee_type);
    let source = if context.force_source {
        context.source
    } else {
        row.source
            .as_deref()
            .and_then(RecordSource::from_raw)
            .unwrap_or(context.source)
    };
    let attendee_name = non_blank(&row.attendee_name).unwrap_or_else(|| attendee_id.clone());

    Ok(AttendanceRecord::from_parts(RecordParts {
        id,
        attendee_type,
        attendee_id,
        attendee_name,
        class_name: non_blank(&row.class_name),
        schedule_id: non_blank(&row.schedule_id),
        date: moment.date,
        time: moment.time,
        status,
        raw_status: row.status.clone(),
        status_label: non_blank(&row.status_label),
        note: non_blank(&row.note),
        source,
    }))
}

/// Normalizes a batch of rows, keeping input order for accepted rows.
pub fn ingest(
    rows: &[RawAttendanceRow],
    classifier: &StatusClassifier,
    context: IngestContext,
) -> IngestReport {
    let mut report = IngestReport::default();

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, classifier, context) {
            Ok(record) => report.records.push(record),
            Err(reason) => report.rejected.push((index, reason)),
        }
    }

    if !report.rejected.is_empty() {
        log::warn!(
            "Rejected {} of {} attendance rows: {}",
            report.rejected.len(),
            rows.len(),
            report
                .rejected
                .iter()
                .map(|(i, r)| format!("#{} {}", i, r))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    report
}
