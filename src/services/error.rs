use thiserror::Error;

/// Transport-level failures from external services.
///
/// These are always caught at the call site inside the recording loop and
/// degraded to a safe default; they never halt the session.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(u16),

    #[error("service not configured: {0}")]
    Unavailable(&'static str),

    #[error("malformed service response: {0}")]
    Parse(String),
}
