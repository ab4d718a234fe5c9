//! Error types for shift-engine operations.

use thiserror::Error;

/// Errors that can occur while parsing times, partitioning an interval, or
/// editing a name pool.
#[derive(Error, Debug)]
pub enum ShiftError {
    /// A time string was not two colon-separated integers ("HH:MM").
    #[error("Invalid time format: {0:?} (expected HH:MM)")]
    InvalidFormat(String),

    /// The interval cannot be split into fewer than one segment.
    #[error("Shift count must be at least 1, got {0}")]
    DegenerateShiftCount(u32),

    /// The rounding step must be a positive number of minutes.
    #[error("Granularity must be at least 1 minute, got {0}")]
    InvalidGranularity(u32),

    /// A remainder split outside `[0, remainder]` or off the step grid.
    #[error(
        "Invalid remainder split: first segment extra {first_extra} must be a multiple of {step} \
         between 0 and {remainder}"
    )]
    InvalidRemainderSplit {
        first_extra: u32,
        remainder: u32,
        step: u32,
    },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Name already in pool: {0}")]
    DuplicateName(String),

    #[error("Name not in pool: {0}")]
    UnknownName(String),

    #[error("Unsupported language: {0:?} (expected \"en\" or \"he\")")]
    UnsupportedLanguage(String),

    /// The persisted name pool was not valid JSON.
    #[error("Name pool JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout shift-engine.
pub type Result<T> = std::result::Result<T, ShiftError>;
