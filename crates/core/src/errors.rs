use thiserror::Error;

/// Unified error type for the praxis-core library.
///
/// Grid builders and aggregations never fail; only settings, JSON helpers
/// and appointment payload building return `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
