//! State - タスクの状態

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task.
///
/// The well-known states get their own variants; anything else (a team's own
/// vocabulary, e.g. "Terminée") is kept verbatim in `Other` and displayed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
    Other(String),
}

impl TaskStatus {
    /// Parse a status label.
    ///
    /// `not_started`, `in_progress` and `done` are recognised case-insensitively
    /// (spaces and dashes count as underscores). Every other label is `Other`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "not_started" | "notstarted" => Self::NotStarted,
            "in_progress" | "inprogress" => Self::InProgress,
            "done" => Self::Done,
            _ => Self::Other(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Done => "done",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TaskStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<&str> for TaskStatus {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}
