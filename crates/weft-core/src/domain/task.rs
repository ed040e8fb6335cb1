//! Task - a node of the dependency graph.
//!
//! Tasks are shared through `TaskRef` (`Arc<Task>`). A predecessor edge is a
//! handle to another task, not an index into a project's task list, so a task
//! may depend on something that was never added to the project.
//!
//! Everything except the status and the predecessor list is fixed at
//! construction. Those two live behind `RwLock`s because the handle is shared
//! by every task that depends on it.

use chrono::{NaiveDateTime, TimeDelta};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::ids::TaskId;
use super::member::Member;
use super::state::TaskStatus;

/// Shared handle to a task.
pub type TaskRef = Arc<Task>;

pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    owner: Member,
    status: RwLock<TaskStatus>,
    predecessors: RwLock<Vec<TaskRef>>,
}

impl Task {
    /// Create a task with no predecessors.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        owner: Member,
        status: impl Into<TaskStatus>,
    ) -> TaskRef {
        Self::builder(name, start, end, owner)
            .description(description)
            .status(status)
            .build()
    }

    pub fn builder(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        owner: Member,
    ) -> TaskBuilder {
        TaskBuilder {
            name: name.into(),
            description: String::new(),
            start,
            end,
            owner,
            status: TaskStatus::default(),
            predecessors: Vec::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn owner(&self) -> &Member {
        &self.owner
    }

    pub fn status(&self) -> TaskStatus {
        read(&self.status).clone()
    }

    pub fn update_status(&self, status: impl Into<TaskStatus>) {
        *write(&self.status) = status.into();
    }

    /// Snapshot of the predecessor handles, in registration order.
    pub fn predecessors(&self) -> Vec<TaskRef> {
        read(&self.predecessors).clone()
    }

    pub fn has_predecessors(&self) -> bool {
        !read(&self.predecessors).is_empty()
    }

    /// Register `predecessor` as something this task waits for.
    ///
    /// No validation: duplicates are kept and a task may even depend on itself.
    /// The critical-path resolver reports such cycles, but the handles on the
    /// loop keep each other alive until one side calls `clear_dependencies`.
    pub fn add_dependency(&self, predecessor: TaskRef) {
        write(&self.predecessors).push(predecessor);
    }

    /// Drop every predecessor edge.
    pub fn clear_dependencies(&self) {
        write(&self.predecessors).clear();
    }

    /// Whole days between start and end.
    ///
    /// Floored, down to the nanosecond: a span of -12h (or -500ms) counts as -1 day.
    /// `end < start` is not rejected.
    pub fn duration_days(&self) -> i64 {
        let span = self.end - self.start;
        let days = span.num_days();
        // num_days truncates toward zero
        if span < TimeDelta::days(days) {
            days - 1
        } else {
            days
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl std::hash::Hash for Task {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Long chains would otherwise drop recursively, one stack frame per task.
impl Drop for Task {
    fn drop(&mut self) {
        let mut pending = std::mem::take(
            self.predecessors
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        while let Some(predecessor) = pending.pop() {
            if let Ok(mut task) = Arc::try_unwrap(predecessor) {
                pending.append(
                    task.predecessors
                        .get_mut()
                        .unwrap_or_else(PoisonError::into_inner),
                );
            }
        }
    }
}

// Predecessors are printed by id only: a full recursive dump would repeat shared
// ancestors and never terminate on a cycle.
impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let predecessors: Vec<TaskId> = read(&self.predecessors).iter().map(|p| p.id).collect();
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("owner", &self.owner.name)
            .field("status", &*read(&self.status))
            .field("predecessors", &predecessors)
            .finish()
    }
}

/// Builder for [`Task`].
///
/// # Example
/// ```ignore
/// let dev = Task::builder("Développement", feb_1, jun_30, pape)
///     .status("Non démarrée")
///     .depends_on(&analysis)
///     .build();
/// ```
pub struct TaskBuilder {
    name: String,
    description: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    owner: Member,
    status: TaskStatus,
    predecessors: Vec<TaskRef>,
}

impl TaskBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: impl Into<TaskStatus>) -> Self {
        self.status = status.into();
        self
    }

    pub fn depends_on(mut self, predecessor: &TaskRef) -> Self {
        self.predecessors.push(Arc::clone(predecessor));
        self
    }

    pub fn build(self) -> TaskRef {
        Arc::new(Task {
            id: TaskId::generate(),
            name: self.name,
            description: self.description,
            start: self.start,
            end: self.end,
            owner: self.owner,
            status: RwLock::new(self.status),
            predecessors: RwLock::new(self.predecessors),
        })
    }
}

// A poisoned lock only means a writer panicked mid-assignment of a plain value;
// the data is still a valid status / edge list.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
