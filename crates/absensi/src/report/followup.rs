//! Follow-up alerts: which attendees need attention, and how urgently.
//!
//! The severity score weighs one absence above ten excused days and one
//! excused day above ten sick days:
//! `absent * 100 + excused * 10 + sick`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::schema::FollowUpThresholds;
use crate::ingest::{count_field, text_field};
use crate::model::{AttendanceRecord, CanonicalStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowUpLabel {
    #[serde(rename = "Frequent Absence")]
    FrequentAbsence,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "Safe")]
    Safe,
}

impl FollowUpLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpLabel::FrequentAbsence => "Frequent Absence",
            FollowUpLabel::NeedsAttention => "Needs Attention",
            FollowUpLabel::Safe => "Safe",
        }
    }
}

impl std::fmt::Display for FollowUpLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived per-attendee alert state. Never stored; recomputed on every
/// reporting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpFlag {
    pub absent_count: u32,
    pub excused_count: u32,
    pub sick_count: u32,
    pub severity_score: u64,
    pub label: FollowUpLabel,
    pub visible: bool,
}

/// Pre-aggregated absence counters per student, as served upstream.
///
/// Keys are matched like [`crate::ingest::RawAttendanceRow`]: the first
/// non-blank spelling wins, so `{"alpha": 2, "absent": 2}` is not an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct FollowUpCounters {
    pub attendee_id: Option<String>,
    pub attendee_name: Option<String>,
    pub class_name: Option<String>,
    pub absent_count: u32,
    pub excused_count: u32,
    pub sick_count: u32,
}

impl TryFrom<Map<String, Value>> for FollowUpCounters {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            attendee_id: text_field(&map, &["attendee_id", "student_id"])?,
            attendee_name: text_field(&map, &["attendee_name", "name"])?,
            class_name: text_field(&map, &["class_name", "rombel", "class"])?,
            absent_count: count_field(&map, &["absent_count", "alpha", "absent"])?,
            excused_count: count_field(&map, &["excused_count", "izin", "excused"])?,
            sick_count: count_field(&map, &["sick_count", "sakit", "sick"])?,
        })
    }
}

/// One row of a follow-up board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpEntry {
    pub attendee_id: String,
    pub attendee_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub flag: FollowUpFlag,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FollowUpScorer {
    thresholds: FollowUpThresholds,
}

impl FollowUpScorer {
    pub fn new(thresholds: FollowUpThresholds) -> Self {
        Self { thresholds }
    }

    pub fn score_counts(&self, absent: u32, excused: u32, sick: u32) -> FollowUpFlag {
        let severity_score = u64::from(absent) * 100 + u64::from(excused) * 10 + u64::from(sick);

        let (label, visible) = if absent >= self.thresholds.absent_threshold {
            (FollowUpLabel::FrequentAbsence, true)
        } else if excused > self.thresholds.excused_threshold {
            (FollowUpLabel::NeedsAttention, true)
        } else {
            (FollowUpLabel::Safe, false)
        };

        FollowUpFlag {
            absent_count: absent,
            excused_count: excused,
            sick_count: sick,
            severity_score,
            label,
            visible,
        }
    }

    /// Scores one attendee's records. Statuses other than absent, excused
    /// and sick do not contribute.
    pub fn score(&self, attendee_records: &[AttendanceRecord]) -> FollowUpFlag {
        let (mut absent, mut excused, mut sick) = (0u32, 0u32, 0u32);
        for record in attendee_records {
            match record.status() {
                CanonicalStatus::Absent => absent += 1,
                CanonicalStatus::Excused => excused += 1,
                CanonicalStatus::Sick => sick += 1,
                _ => {}
            }
        }
        self.score_counts(absent, excused, sick)
    }

    /// Scores every attendee in the set, keeps the visible ones and orders
    /// them by severity, highest first. Ties keep first-seen order.
    pub fn board(&self, records: &[AttendanceRecord]) -> Vec<FollowUpEntry> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<&AttendanceRecord>> = Vec::new();

        for record in records {
            let slot = *index.entry(record.attendee_id()).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(record);
        }

        let entries = groups
            .into_iter()
            .filter_map(|group| {
                let first = *group.first()?;
                let owned: Vec<AttendanceRecord> = group.into_iter().cloned().collect();
                Some(FollowUpEntry {
                    attendee_id: first.attendee_id().to_string(),
                    attendee_name: first.attendee_name().to_string(),
                    class_name: first.class_name().map(str::to_string),
                    flag: self.score(&owned),
                })
            })
            .collect();

        visible_by_severity(entries)
    }

    /// Same as [`Self::board`] but from upstream counters. Counters without
    /// an attendee id are skipped.
    pub fn board_from_counters(&self, counters: &[FollowUpCounters]) -> Vec<FollowUpEntry> {
        let entries = counters
            .iter()
            .filter_map(|c| {
                let attendee_id = c
                    .attendee_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())?
                    .to_string();
                Some(FollowUpEntry {
                    attendee_name: c
                        .attendee_name
                        .clone()
                        .unwrap_or_else(|| attendee_id.clone()),
                    attendee_id,
                    class_name: c.class_name.clone(),
                    flag: self.score_counts(c.absent_count, c.excused_count, c.sick_count),
                })
            })
            .collect();

        visible_by_severity(entries)
    }
}

fn visible_by_severity(entries: Vec<FollowUpEntry>) -> Vec<FollowUpEntry> {
    let mut visible: Vec<FollowUpEntry> = entries.into_iter().filter(|e| e.flag.visible).collect();
    // sort_by is stable
    visible.sort_by(|a, b| b.flag.severity_score.cmp(&a.flag.severity_score));
    visible
}

/// Scores with the default thresholds.
pub fn score(attendee_records: &[AttendanceRecord]) -> FollowUpFlag {
    FollowUpScorer::default().score(attendee_records)
}

pub fn follow_up_board(records: &[AttendanceRecord]) -> Vec<FollowUpEntry> {
    FollowUpScorer::default().board(records)
}

pub fn follow_up_board_from_counters(counters: &[FollowUpCounters]) -> Vec<FollowUpEntry> {
    FollowUpScorer::default().board_from_counters(counters)
}
