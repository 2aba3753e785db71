//! Error types for visibility runs.

use ephemeris::EphemerisError;
use thiserror::Error;

/// Errors that stop a visibility run.
#[derive(Error, Debug)]
pub enum VisibilityError {
    #[error("Start MJD {start} is after end MJD {end}")]
    StartAfterEnd { start: f64, end: f64 },

    #[error("{which} date {date} outside of available ephemeris {domain_start} to {domain_end}")]
    OutsideDomain {
        which: &'static str,
        date: String,
        domain_start: String,
        domain_end: String,
    },

    #[error("{actual} epochs retrieved for the moving target, but {expected} expected")]
    EphemerisLengthMismatch { expected: usize, actual: usize },

    #[error(
        "{0} not recognized. --instrument should be one of: v3, nircam, miri, nirspec, niriss, fgs"
    )]
    UnknownInstrument(String),

    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Plot error: {0}")]
    Plot(String),
}

impl VisibilityError {
    /// True for the range errors raised before any scanning starts
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            VisibilityError::StartAfterEnd { .. } | VisibilityError::OutsideDomain { .. }
        )
    }
}

/// Result alias for visibility operations.
pub type Result<T> = std::result::Result<T, VisibilityError>;
