//! Events - ドメインイベント
//!
//! Project の変更系操作ごとに 1 つ発行される。`message()` がそのまま通知文になる。

use serde::Serialize;

/// Something that happened to a project.
///
/// Every mutating operation of `Project` raises exactly one event; the event's
/// `message()` is what team members are notified with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectEvent {
    TaskAdded { name: String },
    MemberAdded { name: String },
    BudgetSet { amount: f64 },
    RiskAdded { description: String },
    MilestoneAdded { name: String },
    /// `version` is the project version after the change was recorded.
    ChangeRecorded { description: String, version: u32 },
    TaskStatusChanged { name: String, status: String },
}

impl ProjectEvent {
    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskAdded { .. } => "task_added",
            Self::MemberAdded { .. } => "member_added",
            Self::BudgetSet { .. } => "budget_set",
            Self::RiskAdded { .. } => "risk_added",
            Self::MilestoneAdded { .. } => "milestone_added",
            Self::ChangeRecorded { .. } => "change_recorded",
            Self::TaskStatusChanged { .. } => "task_status_changed",
        }
    }

    /// Human-readable notification text.
    pub fn message(&self) -> String {
        match self {
            Self::TaskAdded { name } => format!("new task added: {name}"),
            Self::MemberAdded { name } => format!("{name} added to team"),
            Self::BudgetSet { amount } => {
                format!("project budget set to {amount:?} monetary units")
            }
            Self::RiskAdded { description } => format!("new risk added: {description}"),
            Self::MilestoneAdded { name } => format!("new milestone added: {name}"),
            Self::ChangeRecorded {
                description,
                version,
            } => format!("change recorded: {description} (version {version})"),
            Self::TaskStatusChanged { name, status } => {
                format!("task {name} status changed to {status}")
            }
        }
    }
}
