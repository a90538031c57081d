use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::LabelLocale;
use crate::model::CanonicalStatus;

pub const SETTINGS_VERSION: &str = "1.0";

/// Locally persisted preferences of the dashboard client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    /// Role whose dashboard was opened last.
    #[serde(default)]
    pub last_role: Option<Role>,
    #[serde(default)]
    pub locale: LabelLocale,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub follow_up: FollowUpThresholds,
    /// Extra raw status words on top of the built-in vocabulary.
    #[serde(default)]
    pub status_synonyms: Vec<StatusSynonym>,
}

fn default_version() -> String {
    SETTINGS_VERSION.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            last_role: None,
            locale: LabelLocale::default(),
            refresh: RefreshSettings::default(),
            follow_up: FollowUpThresholds::default(),
            status_synonyms: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(alias = "siswa")]
    Student,
    #[serde(alias = "guru")]
    Teacher,
    #[serde(alias = "wali_kelas")]
    HomeroomTeacher,
    #[serde(alias = "waka")]
    VicePrincipal,
    Admin,
}

impl Role {
    /// Roles that look at other people's attendance rather than their own.
    pub fn is_supervisory(&self) -> bool {
        matches!(
            self,
            Role::HomeroomTeacher | Role::VicePrincipal | Role::Admin
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSettings {
    #[serde(default = "default_clock_tick_secs")]
    pub clock_tick_secs: u64,
    #[serde(default = "default_dashboard_refresh_secs")]
    pub dashboard_refresh_secs: u64,
}

fn default_clock_tick_secs() -> u64 {
    1
}

fn default_dashboard_refresh_secs() -> u64 {
    30
}

impl RefreshSettings {
    pub fn clock_tick(&self) -> Duration {
        Duration::from_secs(self.clock_tick_secs)
    }

    pub fn dashboard_refresh(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs)
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            clock_tick_secs: default_clock_tick_secs(),
            dashboard_refresh_secs: default_dashboard_refresh_secs(),
        }
    }
}

/// An attendee is flagged once absences reach `absent_threshold`, or once
/// excused days exceed `excused_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpThresholds {
    #[serde(default = "default_absent_threshold")]
    pub absent_threshold: u32,
    #[serde(default = "default_excused_threshold")]
    pub excused_threshold: u32,
}

fn default_absent_threshold() -> u32 {
    1
}

fn default_excused_threshold() -> u32 {
    5
}

impl Default for FollowUpThresholds {
    fn default() -> Self {
        Self {
            absent_threshold: default_absent_threshold(),
            excused_threshold: default_excused_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSynonym {
    pub raw: String,
    pub status: CanonicalStatus,
}
