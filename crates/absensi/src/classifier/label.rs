use serde::{Deserialize, Serialize};

use crate::model::CanonicalStatus;

/// Language of the built-in status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLocale {
    #[default]
    #[serde(alias = "id")]
    Indonesian,
    #[serde(alias = "en")]
    English,
}

/// Human-readable label, preferring an explicit label sent by the source.
pub fn label(status: CanonicalStatus, explicit: Option<&str>) -> String {
    label_in(status, explicit, LabelLocale::Indonesian)
}

pub fn label_in(status: CanonicalStatus, explicit: Option<&str>, locale: LabelLocale) -> String {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => text.to_string(),
        None => builtin_label(status, locale).to_string(),
    }
}

/// Every built-in label classifies back to the status it was rendered from.
pub fn builtin_label(status: CanonicalStatus, locale: LabelLocale) -> &'static str {
    match locale {
        LabelLocale::Indonesian => match status {
            CanonicalStatus::Present => "Hadir",
            CanonicalStatus::Late => "Terlambat",
            CanonicalStatus::Excused => "Izin",
            CanonicalStatus::Sick => "Sakit",
            CanonicalStatus::Absent => "Alpha",
            CanonicalStatus::Return => "Pulang",
            CanonicalStatus::Unknown => "Belum Ada Status",
        },
        LabelLocale::English => match status {
            CanonicalStatus::Present => "Present",
            CanonicalStatus::Late => "Late",
            CanonicalStatus::Excused => "Excused",
            CanonicalStatus::Sick => "Sick",
            CanonicalStatus::Absent => "Absent",
            CanonicalStatus::Return => "Return",
            CanonicalStatus::Unknown => "No status yet",
        },
    }
}
