//! Expiration Types
//!
//! Absolute expiration input and its text encoding.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ArgumentError;

/// Naive layouts read as UTC, tried after the offset-carrying ones.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f UTC",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Absolute expiration supplied at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpirationDate {
    /// Already-typed instant.
    At(DateTime<Utc>),
    /// System clock reading, range-checked on resolve.
    System(SystemTime),
    /// Text to be parsed into an instant.
    Text(String),
}

impl ExpirationDate {
    /// Resolve to a UTC instant.
    pub fn resolve(self) -> Result<DateTime<Utc>, ArgumentError> {
        match self {
            Self::At(at) => Ok(at),
            Self::System(at) => {
                system_time_to_utc(at).ok_or(ArgumentError::ExpirationOutOfRange)
            }
            Self::Text(text) => {
                parse_expiration(&text).ok_or(ArgumentError::UnparseableExpiration { input: text })
            }
        }
    }
}

impl From<DateTime<Utc>> for ExpirationDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl From<DateTime<FixedOffset>> for ExpirationDate {
    fn from(at: DateTime<FixedOffset>) -> Self {
        Self::At(at.with_timezone(&Utc))
    }
}

impl From<SystemTime> for ExpirationDate {
    fn from(at: SystemTime) -> Self {
        Self::System(at)
    }
}

/// Convert a system time, `None` when chrono cannot represent it.
fn system_time_to_utc(at: SystemTime) -> Option<DateTime<Utc>> {
    match at.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())
        }
        Err(before_epoch) => {
            let before = before_epoch.duration();
            let secs = i64::try_from(before.as_secs()).ok()?.checked_neg()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(secs, 0),
                nanos => DateTime::from_timestamp(secs.checked_sub(1)?, 1_000_000_000 - nanos),
            }
        }
    }
}

impl From<String> for ExpirationDate {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ExpirationDate {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Parse an expiration timestamp.
///
/// Accepts RFC 3339, RFC 2822, chrono's UTC display form, `%Y-%m-%d %H:%M:%S%.f %z`,
/// and naive date-times which are taken as UTC.
pub fn parse_expiration(input: &str) -> Option<DateTime<Utc>> {
    let text = input.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = DateTime::parse_from_rfc2822(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(at.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(text, format)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// Format an expiration for the persistable hash.
///
/// Sub-second digits are kept so the instant survives a round trip.
pub fn format_expiration(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Resolve a relative expiration against `now`.
pub(crate) fn expiration_after(
    now: DateTime<Utc>,
    seconds: f64,
) -> Result<DateTime<Utc>, ArgumentError> {
    let out_of_range = ArgumentError::InvalidExpiresIn { seconds };
    if !seconds.is_finite() {
        return Err(out_of_range);
    }

    let micros = (seconds * 1_000_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return Err(out_of_range);
    }

    now.checked_add_signed(Duration::microseconds(micros as i64))
        .ok_or(out_of_range)
}

/// Signed duration as fractional seconds.
pub(crate) fn duration_secs(delta: Duration) -> f64 {
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}
