//! Error types for ephemeris queries and target position retrieval.

use thiserror::Error;

/// Errors raised while converting times, parsing coordinates or fetching
/// target ephemerides.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("MJD {0} cannot be represented as a calendar date")]
    DateOutOfRange(f64),

    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("Horizons request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Unreadable Horizons reply: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Horizons returned an error: {0}")]
    Horizons(String),

    #[error("Malformed Horizons response: {0}")]
    MalformedResponse(String),
}

/// Result alias for ephemeris operations.
pub type Result<T> = std::result::Result<T, EphemerisError>;
