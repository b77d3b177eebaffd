use serde::{Deserialize, Serialize};

/// Where a resolved resource can be fetched, plus the timestamp it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLocation {
    /// Absolute URL of the resource
    pub path: String,
    /// Resource timestamp, `YYYY-MM-DDTHH:MM:SS`
    pub date: String,
}
