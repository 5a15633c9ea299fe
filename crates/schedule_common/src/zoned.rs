//! Zoned timestamp strings.
//!
//! Slots travel between the page and the booking form as strings of the form
//! `2025-06-02T09:00:00-06:00[America/Denver]`: an RFC 3339 local time with offset,
//! followed by the IANA zone in brackets. Two slots are "the same" when these strings
//! are equal, so formatting must be canonical (seconds always present, no fraction).

use chrono::{DateTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZonedParseError {
    #[error("missing [zone] suffix in {0:?}")]
    MissingZone(String),
    #[error("invalid timestamp {input:?}: {message}")]
    InvalidTimestamp { input: String, message: String },
    #[error("unknown time zone {0:?}")]
    UnknownZone(String),
    #[error("offset of {input:?} does not match zone {zone}")]
    OffsetMismatch { input: String, zone: String },
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SS±HH:MM[Zone]`.
pub fn format_zoned(dt: &DateTime<Tz>) -> String {
    format!("{}[{}]", format_local(dt), dt.timezone().name())
}

/// The RFC 3339 part of [`format_zoned`], without the bracketed zone.
pub fn format_local(dt: &DateTime<Tz>) -> String {
    dt.format(LOCAL_FORMAT).to_string()
}

/// Parses a string produced by [`format_zoned`].
///
/// The offset must agree with the zone at that instant.
pub fn parse_zoned(input: &str) -> Result<DateTime<Tz>, ZonedParseError> {
    let (local, zone) = input
        .strip_suffix(']')
        .and_then(|rest| rest.split_once('['))
        .ok_or_else(|| ZonedParseError::MissingZone(input.to_string()))?;

    let tz: Tz = zone
        .parse()
        .map_err(|_| ZonedParseError::UnknownZone(zone.to_string()))?;

    let fixed = DateTime::parse_from_rfc3339(local).map_err(|e| {
        ZonedParseError::InvalidTimestamp {
            input: input.to_string(),
            message: e.to_string(),
        }
    })?;

    let zoned = fixed.with_timezone(&tz);
    if zoned.offset().fix() != *fixed.offset() {
        return Err(ZonedParseError::OffsetMismatch {
            input: input.to_string(),
            zone: zone.to_string(),
        });
    }
    Ok(zoned)
}

/// Parses an RFC 3339 timestamp from the calendar API and moves it into `tz`.
pub fn parse_absolute_in<Z: TimeZone>(input: &str, tz: &Z) -> Result<DateTime<Z>, ZonedParseError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(tz))
        .map_err(|e| ZonedParseError::InvalidTimestamp {
            input: input.to_string(),
            message: e.to_string(),
        })
}
