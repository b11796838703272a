//! Timestamp parsing for incoming records.
//!
//! Records arrive with whatever timestamp text the upstream store produced.
//! Everything is reduced to a date in the host's local calendar before it
//! reaches the bucketing code.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::TimestampError;
use crate::models::IncidentRecord;

/// Offset-carrying formats beyond RFC 3339 (Postgres renders `+00` offsets).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Anything that can be placed on the calendar.
pub trait Timestamped {
    fn timestamp(&self) -> Result<NaiveDate, TimestampError>;
}

impl Timestamped for IncidentRecord {
    fn timestamp(&self) -> Result<NaiveDate, TimestampError> {
        match self.timestamp.as_deref() {
            Some(raw) => parse_timestamp(raw),
            None => Err(TimestampError::Missing),
        }
    }
}

impl Timestamped for NaiveDate {
    fn timestamp(&self) -> Result<NaiveDate, TimestampError> {
        Ok(*self)
    }
}

impl Timestamped for NaiveDateTime {
    fn timestamp(&self) -> Result<NaiveDate, TimestampError> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> Timestamped for DateTime<Tz> {
    fn timestamp(&self) -> Result<NaiveDate, TimestampError> {
        Ok(self.with_timezone(&Local).date_naive())
    }
}

impl<T: Timestamped> Timestamped for &T {
    fn timestamp(&self) -> Result<NaiveDate, TimestampError> {
        (**self).timestamp()
    }
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDate, TimestampError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Local).date_naive());
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Ok(parsed.with_timezone(&Local).date_naive());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TimestampError::Unrecognized(raw.to_string()))
}
