use std::path::{Path, PathBuf};

use crate::config::schema::{Settings, SETTINGS_VERSION};
use crate::error::ConfigError;

const APP_DIR: &str = "absensi";
const SETTINGS_FILE: &str = "settings.json";

/// `<platform config dir>/absensi/settings.json`.
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(SETTINGS_FILE))
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_settings_from_str(&content)
}

/// Loads settings from `path`, falling back to defaults when the file does
/// not exist yet. Any other read or parse failure is still an error.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!(
            "No settings file at {}, using defaults",
            path.display()
        );
        return Ok(Settings::default());
    }
    load_settings(path)
}

pub fn load_settings_from_str(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = serde_json::from_str(content)?;

    validate_settings(&settings)?;

    Ok(settings)
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<(), ConfigError> {
    let path = path.as_ref();
    validate_settings(settings)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("Saved settings to {}", path.display());
    Ok(())
}

pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.version != SETTINGS_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported settings version: {}", settings.version),
        });
    }

    if settings.refresh.clock_tick_secs == 0 {
        return Err(ConfigError::Validation {
            message: "refresh.clock_tick_secs must be greater than zero".to_string(),
        });
    }
    if settings.refresh.dashboard_refresh_secs == 0 {
        return Err(ConfigError::Validation {
            message: "refresh.dashboard_refresh_secs must be greater than zero".to_string(),
        });
    }
    // Zero would flag every attendee, including those with no absences.
    if settings.follow_up.absent_threshold == 0 {
        return Err(ConfigError::Validation {
            message: "follow_up.absent_threshold must be greater than zero".to_string(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for synonym in &settings.status_synonyms {
        let raw = synonym.raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::InvalidSynonym {
                raw: synonym.raw.clone(),
                reason: "Raw status text is blank".to_string(),
            });
        }
        if !synonym.status.is_known() {
            return Err(ConfigError::InvalidSynonym {
                raw: synonym.raw.clone(),
                reason: format!("Cannot map to '{}'", synonym.status),
            });
        }
        if !seen.insert(raw.to_lowercase()) {
            return Err(ConfigError::InvalidSynonym {
                raw: synonym.raw.clone(),
                reason: "Duplicate synonym".to_string(),
            });
        }
    }

    Ok(())
}
