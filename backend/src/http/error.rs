//! Error response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Message shown to clients for internal errors.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred, please file an issue with the timestamp at https://github.com/Helioviewer-Project/helios";

/// Substituted when a handler produced no result.
pub const NOTHING_TO_RETURN: &str = "Nothing to return";

/// Body of every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    /// Only set for internal errors; matches the server log entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            timestamp: None,
        }
    }

    pub fn internal(timestamp: impl Into<String>) -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
            timestamp: Some(timestamp.into()),
        }
    }

    pub fn nothing_to_return() -> Self {
        Self::new(NOTHING_TO_RETURN)
    }
}

impl From<ErrorEnvelope> for Value {
    fn from(envelope: ErrorEnvelope) -> Self {
        match envelope.timestamp {
            Some(timestamp) => json!({ "error": envelope.error, "timestamp": timestamp }),
            None => json!({ "error": envelope.error }),
        }
    }
}

/// The `error` entry of a result body, if it has one.
pub fn error_entry(body: &Value) -> Option<&Value> {
    body.as_object().and_then(|map| map.get("error"))
}
