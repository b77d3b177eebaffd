use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::*;

use crate::services::error::{ServiceError, ServiceResult};

/// Layout used whenever a timestamp is rendered back to clients.
pub const ISO_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive date-time layouts accepted from requests, tried in order.
///
/// `%.f` consumes an optional fractional part, so each layout with seconds
/// also covers sub-second input.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A request timestamp with second resolution (UTC, no zone attached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParsedDate(NaiveDateTime);

impl ParsedDate {
    /// Parse an ISO-8601 calendar date or date-time.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space may replace
    /// the `T`) and RFC 3339 strings carrying `Z` or a UTC offset, which are
    /// normalized to UTC. Any failure yields [`ServiceError::InvalidDate`] with
    /// the parser's diagnostic; nothing is recovered from malformed input.
    pub fn parse(text: &str) -> ServiceResult<Self> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from_datetime(dt.naive_utc()));
        }

        let mut datetime_err = None;
        for format in DATETIME_FORMATS {
            match NaiveDateTime::parse_from_str(text, format) {
                Ok(dt) => return Ok(Self::from_datetime(dt)),
                Err(e) => {
                    datetime_err.get_or_insert(e);
                }
            }
        }

        let date_err = match NaiveDate::parse_from_str(text, DATE_FORMAT) {
            Ok(date) => return Ok(Self(date.and_time(chrono::NaiveTime::MIN))),
            Err(e) => e,
        };

        // Report the diagnostic of the layout the input was closest to.
        let diagnostic = match datetime_err {
            Some(e) if text.len() > 10 => e,
            _ => date_err,
        };
        Err(ServiceError::InvalidDate(format!(
            "Invalid isoformat string: '{}' ({})",
            text, diagnostic
        )))
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Render as `YYYY-MM-DDTHH:MM:SS`.
    pub fn to_iso_string(&self) -> String {
        self.0.format(ISO_SECONDS_FORMAT).to_string()
    }

    /// Render with an arbitrary chrono format string.
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// The same instant shifted back by whole calendar months.
    ///
    /// Day-of-month is clamped to the end of the target month.
    pub fn months_earlier(&self, months: u32) -> ServiceResult<Self> {
        self.0
            .checked_sub_months(Months::new(months))
            .map(Self)
            .ok_or_else(|| {
                ServiceError::Domain(format!(
                    "Date {} is out of the supported range",
                    self.to_iso_string()
                ))
            })
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_SECONDS_FORMAT))
    }
}

impl FromStr for ParsedDate {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a request date, see [`ParsedDate::parse`].
pub fn parse_date(text: &str) -> ServiceResult<ParsedDate> {
    ParsedDate::parse(text)
}
