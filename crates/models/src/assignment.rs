use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An assignment recovered from text pasted out of the Canvas web UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAssignment {
    /// Trimmed, never empty
    pub title: String,
    /// Serialized as an RFC 3339 UTC timestamp
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<u32>,
}

impl ParsedAssignment {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            points: None,
        }
    }
}
