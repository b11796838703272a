use thiserror::Error;

/// Why a record's timestamp could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("record has no timestamp")]
    Missing,
    #[error("timestamp is empty")]
    Empty,
    #[error("unrecognized timestamp format: {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("year {0} is outside the supported range 1..=9999")]
    UnsupportedYear(i32),
}
