//! Plan file specs (Project / Member / Task / Risk / Milestone).
//!
//! A plan is the declarative form of a project: the CLI reads it from JSON and
//! `ProjectBuilder` replays it through the regular project operations.
//! References between entries are by name (task owner -> member name,
//! `depends_on` -> task names) and are resolved when the project is built.
//!
//! Timestamps accept either a full `2024-01-01T09:30:00` or a bare `2024-01-01`
//! (midnight).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A whole plan file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSpec {
    pub project: ProjectSpec,

    /// Budget to set after tasks are added.
    #[serde(default)]
    pub budget: Option<f64>,

    #[serde(default)]
    pub members: Vec<MemberSpec>,

    #[serde(default)]
    pub tasks: Vec<TaskSpec>,

    #[serde(default)]
    pub risks: Vec<RiskSpec>,

    #[serde(default)]
    pub milestones: Vec<MilestoneSpec>,

    /// Change descriptions, recorded in order (each bumps the version).
    #[serde(default)]
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(deserialize_with = "timestamp")]
    pub start: NaiveDateTime,

    #[serde(deserialize_with = "timestamp")]
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(deserialize_with = "timestamp")]
    pub start: NaiveDateTime,

    #[serde(deserialize_with = "timestamp")]
    pub end: NaiveDateTime,

    /// Name of a member listed in `members`.
    pub owner: String,

    /// Status label; see `TaskStatus::from_label`.
    #[serde(default)]
    pub status: Option<String>,

    /// Names of tasks this one waits for, in priority order for tie-breaking.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSpec {
    pub description: String,
    pub probability: f64,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneSpec {
    pub name: String,

    #[serde(deserialize_with = "timestamp")]
    pub date: NaiveDateTime,
}

impl PlanSpec {
    /// Parse a plan from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Parse `YYYY-MM-DD[THH:MM:SS]` (a space is accepted in place of `T`).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid timestamp '{raw}', expected YYYY-MM-DD[THH:MM:SS]"))
}
