use serde::{Deserialize, Serialize};

/// Canonical attendance outcome, independent of any source vocabulary.
///
/// `Unknown` is a first-class value: input that cannot be classified lands
/// here and never in `Absent`, so absenteeism alerts only fire on real
/// absences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Present,
    Late,
    Excused,
    Sick,
    Absent,
    Return,
    Unknown,
}

impl CanonicalStatus {
    /// Every status, in reporting order.
    pub const ALL: [CanonicalStatus; 7] = [
        CanonicalStatus::Present,
        CanonicalStatus::Late,
        CanonicalStatus::Excused,
        CanonicalStatus::Sick,
        CanonicalStatus::Absent,
        CanonicalStatus::Return,
        CanonicalStatus::Unknown,
    ];

    /// The six statuses a person can actually be recorded with.
    pub const KNOWN: [CanonicalStatus; 6] = [
        CanonicalStatus::Present,
        CanonicalStatus::Late,
        CanonicalStatus::Excused,
        CanonicalStatus::Sick,
        CanonicalStatus::Absent,
        CanonicalStatus::Return,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalStatus::Present => "present",
            CanonicalStatus::Late => "late",
            CanonicalStatus::Excused => "excused",
            CanonicalStatus::Sick => "sick",
            CanonicalStatus::Absent => "absent",
            CanonicalStatus::Return => "return",
            CanonicalStatus::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CanonicalStatus::Unknown)
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
