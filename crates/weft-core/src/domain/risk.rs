//! Risks and milestones tracked alongside the task graph.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A logged project risk.
///
/// `probability` is expected in `[0, 1]` but is not checked; `impact` is free text
/// ("Élevé", "low", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub description: String,
    pub probability: f64,
    pub impact: String,
}

impl Risk {
    pub fn new(description: impl Into<String>, probability: f64, impact: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            probability,
            impact: impact.into(),
        }
    }
}

/// A dated project milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub date: NaiveDateTime,
}

impl Milestone {
    pub fn new(name: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}
