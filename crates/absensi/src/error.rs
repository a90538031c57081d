use std::path::PathBuf;
use thiserror::Error;

use crate::model::CanonicalStatus;

#[derive(Error, Debug)]
pub enum AbsensiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Attendance service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Telemetry setup failed: {0}")]
    Telemetry(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write settings file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Settings validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid status synonym '{raw}': {reason}")]
    InvalidSynonym { raw: String, reason: String },

    #[error("No platform configuration directory available")]
    NoConfigDir,
}

/// Failures of a call into the external attendance service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Attendance service rejected the request{}", describe_api(.status, .message))]
    Api {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Malformed response from attendance service: {0}")]
    Malformed(String),
}

fn describe_api(status: &Option<u16>, message: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(code) = status {
        out.push_str(&format!(" (HTTP {})", code));
    }
    if let Some(text) = message {
        out.push_str(": ");
        out.push_str(text);
    }
    out
}

impl ServiceError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Api {
            status: Some(status),
            message: Some(message.into()),
        }
    }

    /// Connectivity problems, as opposed to the service answering "no".
    pub fn is_network(&self) -> bool {
        matches!(self, ServiceError::Network(_) | ServiceError::Timeout(_))
    }
}

/// Local precondition failures on manual entries. These block a submission
/// before anything is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Entry {index}: attendee id is required")]
    MissingAttendeeId { index: usize },

    #[error("Entry {index} ({attendee_id}): manual attendance needs a known status, got {status}")]
    UnknownStatus {
        index: usize,
        attendee_id: String,
        status: CanonicalStatus,
    },
}

/// Cause carried by a failed [`crate::outcome::Outcome`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, AbsensiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_message() {
        let err = ServiceError::api(422, "Jadwal tidak ditemukan");
        assert_eq!(
            err.to_string(),
            "Attendance service rejected the request (HTTP 422): Jadwal tidak ditemukan"
        );
        assert!(!err.is_network());
    }

    #[test]
    fn test_api_error_display_without_details() {
        let err = ServiceError::Api {
            status: None,
            message: None,
        };
        assert_eq!(err.to_string(), "Attendance service rejected the request");
    }

    #[test]
    fn test_network_classification() {
        assert!(ServiceError::Network("dns".into()).is_network());
        assert!(ServiceError::Timeout("30s".into()).is_network());
        assert!(!ServiceError::Malformed("eof".into()).is_network());
    }
}
