//! Errors - 計画まわりのエラー型

use thiserror::Error;

use super::ids::TaskId;

/// Errors raised by the task graph, the project aggregate and the plan builder.
///
/// Unbound notification and invalid task spans are deliberately not errors:
/// the former is a silent drop, the latter just yields a negative duration.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The predecessor edges loop back on themselves. `cycle` lists the task ids
    /// along the loop, starting and ending on the same task.
    #[error("cyclic dependency: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<TaskId> },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task '{task}' is owned by unknown member '{member}'")]
    UnknownMember { task: String, member: String },

    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("duplicate task name: {0}")]
    DuplicateTask(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across weft-core.
pub type PlanResult<T> = Result<T, PlanError>;

fn format_cycle(cycle: &[TaskId]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
