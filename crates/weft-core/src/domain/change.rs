//! Change records: the project's version log.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An immutable, versioned log entry.
///
/// Fields are private so a recorded change cannot be edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    description: String,
    version: u32,
    recorded_at: DateTime<Utc>,
}

impl Change {
    pub fn new(description: impl Into<String>, version: u32, recorded_at: DateTime<Utc>) -> Self {
        Self {
            description: description.into(),
            version,
            recorded_at,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Project version that was current when the change was recorded.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
