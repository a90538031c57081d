use std::collections::HashMap;

use crate::config::schema::StatusSynonym;
use crate::model::CanonicalStatus;

/// Maps raw status vocabulary onto [`CanonicalStatus`].
///
/// The built-in synonym table always applies; configured synonyms are
/// consulted only for words the built-in table does not know.
#[derive(Debug, Clone, Default)]
pub struct StatusClassifier {
    extra: HashMap<String, CanonicalStatus>,
}

impl StatusClassifier {
    pub fn new(synonyms: &[StatusSynonym]) -> Self {
        let mut extra = HashMap::new();

        for synonym in synonyms {
            let key = normalize_key(&synonym.raw);
            if key.is_empty() || !synonym.status.is_known() {
                log::warn!(
                    "Ignoring status synonym '{}' -> {}: needs raw text and a known status",
                    synonym.raw,
                    synonym.status
                );
                continue;
            }
            if let Some(builtin) = builtin_status(&key) {
                if builtin != synonym.status {
                    log::warn!(
                        "Status synonym '{}' cannot remap built-in {} to {}",
                        synonym.raw,
                        builtin,
                        synonym.status
                    );
                }
                continue;
            }
            extra.insert(key, synonym.status);
        }

        Self { extra }
    }

    pub fn classify(&self, raw: Option<&str>) -> CanonicalStatus {
        let Some(raw) = raw else {
            return CanonicalStatus::Unknown;
        };
        let key = normalize_key(raw);

        builtin_status(&key)
            .or_else(|| self.extra.get(&key).copied())
            .unwrap_or_else(|| {
                if !key.is_empty() {
                    log::debug!("Unrecognized attendance status '{}'", raw);
                }
                CanonicalStatus::Unknown
            })
    }

    /// Number of configured synonyms in effect.
    pub fn extra_len(&self) -> usize {
        self.extra.len()
    }
}

/// Classifies with the built-in synonym table only.
pub fn classify(raw: Option<&str>) -> CanonicalStatus {
    raw.map(normalize_key)
        .and_then(|key| builtin_status(&key))
        .unwrap_or(CanonicalStatus::Unknown)
}

/// Lowercases, treats `_` and `-` as spaces, and collapses whitespace.
fn normalize_key(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn builtin_status(key: &str) -> Option<CanonicalStatus> {
    let status = match key {
        "present" | "hadir" => CanonicalStatus::Present,
        "late" | "terlambat" => CanonicalStatus::Late,
        "excused" | "permission" | "izin" => CanonicalStatus::Excused,
        "sick" | "sakit" => CanonicalStatus::Sick,
        "absent" | "alpha" | "alfa" | "tanpa keterangan" | "tidak hadir" => {
            CanonicalStatus::Absent
        }
        "return" | "pulang" => CanonicalStatus::Return,
        _ => return None,
    };
    Some(status)
}
