//! Logging setup for binaries embedding this crate.
//!
//! Library code logs through both `log` and `tracing`. [`init_tracing`]
//! installs a `tracing` subscriber and forwards `log` records into it, so
//! one filter governs both.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::error::AbsensiError;

/// Environment variable holding the filter directives, e.g.
/// `ABSENSI_LOG=absensi=debug,info`.
pub const LOG_ENV: &str = "ABSENSI_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Filter from [`LOG_ENV`], or `default_filter` when unset or invalid.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter))
}

pub fn init_tracing(default_filter: &str) -> Result<(), AbsensiError> {
    init_tracing_with(default_filter, LogFormat::Text)
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing_with(default_filter: &str, format: LogFormat) -> Result<(), AbsensiError> {
    tracing_log::LogTracer::init()
        .map_err(|e| AbsensiError::Telemetry(format!("log bridge: {}", e)))?;

    let registry = tracing_subscriber::registry().with(env_filter(default_filter));
    let result = match format {
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().with_target(true)),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().json()),
        ),
    };

    result.map_err(|e| AbsensiError::Telemetry(e.to_string()))
}
