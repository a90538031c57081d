//! Per-status counts and fractions over a record set.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::StatusClassifier;
use crate::model::{AttendanceRecord, CanonicalStatus};
use crate::service::RawStatusSummary;

/// Count per canonical status. Every status is always present, so the
/// counts add up to the size of the set they were taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts {
    counts: BTreeMap<CanonicalStatus, usize>,
}

impl StatusCounts {
    pub fn zeroed() -> Self {
        Self {
            counts: CanonicalStatus::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }

    pub fn get(&self, status: CanonicalStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn add(&mut self, status: CanonicalStatus, n: usize) {
        *self.counts.entry(status).or_insert(0) += n;
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalStatus, usize)> + '_ {
        self.counts.iter().map(|(s, n)| (*s, *n))
    }

    /// Canonical counts from the service's summary, which is keyed by raw
    /// status words. Synonyms fold into the same status; unrecognized keys
    /// land in `Unknown`.
    pub fn from_raw_summary(summary: &RawStatusSummary, classifier: &StatusClassifier) -> Self {
        let mut counts = Self::zeroed();
        for (raw, n) in &summary.0 {
            counts.add(classifier.classify(Some(raw)), *n);
        }
        counts
    }

    pub fn fractions(&self) -> StatusFractions {
        let total = self.total();
        let values = self
            .counts
            .iter()
            .map(|(status, n)| {
                let fraction = if total == 0 {
                    0.0
                } else {
                    *n as f64 / total as f64
                };
                (*status, fraction)
            })
            .collect();
        StatusFractions { values }
    }
}

impl Default for StatusCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Share of the total per canonical status, in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatusFractions {
    values: BTreeMap<CanonicalStatus, f64>,
}

impl StatusFractions {
    pub fn get(&self, status: CanonicalStatus) -> f64 {
        self.values.get(&status).copied().unwrap_or(0.0)
    }

    /// Same value scaled to 0..=100.
    pub fn percent(&self, status: CanonicalStatus) -> f64 {
        self.get(status) * 100.0
    }

    pub fn contains(&self, status: CanonicalStatus) -> bool {
        self.values.contains_key(&status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalStatus, f64)> + '_ {
        self.values.iter().map(|(s, v)| (*s, *v))
    }
}

pub fn count_by_status(records: &[AttendanceRecord]) -> StatusCounts {
    let mut counts = StatusCounts::zeroed();
    for record in records {
        counts.add(record.status(), 1);
    }
    counts
}

/// count/total per status; all zero for an empty set.
pub fn percentages(records: &[AttendanceRecord]) -> StatusFractions {
    count_by_status(records).fractions()
}
