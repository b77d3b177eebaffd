use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::time::ParsedDate;

/// Timestamp encoding used by archived resource filenames,
/// e.g. `2023_06_28__20_14_00.json`.
pub const CANDIDATE_TIMESTAMP_FORMAT: &str = "%Y_%m_%d__%H_%M_%S";

/// Filename prefix selecting every file within one hour, e.g. `2023_06_28__20`.
pub const HOUR_BUCKET_FORMAT: &str = "%Y_%m_%d__%H";

/// An archived file together with the timestamp encoded in its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    filename: String,
    timestamp: ParsedDate,
}

impl Candidate {
    pub fn new(filename: impl Into<String>, timestamp: ParsedDate) -> Self {
        Self {
            filename: filename.into(),
            timestamp,
        }
    }

    /// Build a candidate from a filename whose stem follows
    /// [`CANDIDATE_TIMESTAMP_FORMAT`]. Returns `None` for anything else.
    pub fn from_filename(filename: impl Into<String>) -> Option<Self> {
        let filename = filename.into();
        let stem = filename
            .split_once('.')
            .map_or(filename.as_str(), |(stem, _)| stem);
        let timestamp = NaiveDateTime::parse_from_str(stem, CANDIDATE_TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(filename, ParsedDate::from_datetime(timestamp)))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn timestamp(&self) -> ParsedDate {
        self.timestamp
    }

    pub fn minute(&self) -> u32 {
        self.timestamp.minute()
    }
}

/// The hour-bucket filename prefix for `date`.
pub fn hour_bucket_prefix(date: &ParsedDate) -> String {
    date.format(HOUR_BUCKET_FORMAT)
}
