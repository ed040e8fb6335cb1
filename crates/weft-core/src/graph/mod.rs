//! Task graph: the project's ordered task list plus the predecessor edges each
//! task carries.
//!
//! Design:
//! - Nodes are `TaskRef` handles; edges live on the tasks themselves
//!   (`Task::add_dependency`), so the graph never has to keep a separate edge
//!   table in sync.
//! - A predecessor does not have to be listed here. It still counts for the
//!   critical path, it just cannot end it.
//! - The list is append-only.

pub mod critical_path;

use crate::domain::errors::{PlanError, PlanResult};
use crate::domain::ids::TaskId;
use crate::domain::task::TaskRef;

pub use self::critical_path::CriticalPath;

#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<TaskRef>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Its predecessors are not validated.
    pub fn add_task(&mut self, task: TaskRef) {
        self.tasks.push(task);
    }

    pub fn tasks(&self) -> &[TaskRef] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskRef> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Longest chain through the listed tasks. See [`critical_path`].
    pub fn critical_path(&self) -> PlanResult<CriticalPath> {
        critical_path::resolve(&self.tasks)
    }

    /// First cycle reachable from a listed task, or `None` for a DAG.
    ///
    /// The returned ids start and end on the same task.
    pub fn detect_cycle(&self) -> Option<Vec<TaskId>> {
        match self.critical_path() {
            Err(PlanError::CyclicDependency { cycle }) => Some(cycle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::Member;
    use crate::domain::task::Task;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn task(name: &str) -> TaskRef {
        Task::new(name, "", day(1), day(2), Member::new("Pape", "Développeur"), "not_started")
    }

    #[test]
    fn new_graph_is_empty() {
        let graph = TaskGraph::new();
        assert!(graph.is_empty());
        assert!(graph.critical_path().unwrap().is_empty());
        assert!(graph.detect_cycle().is_none());
    }

    #[test]
    fn add_task_appends_in_order() {
        let mut graph = TaskGraph::new();
        graph.add_task(task("A"));
        graph.add_task(task("B"));

        let names: Vec<&str> = graph.tasks().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn get_finds_listed_tasks_only() {
        let mut graph = TaskGraph::new();
        let a = task("A");
        graph.add_task(Arc::clone(&a));

        assert_eq!(graph.get(a.id()), Some(&a));
        assert!(graph.get(task("stray").id()).is_none());
    }

    #[test]
    fn detect_no_cycle_in_diamond() {
        let mut graph = TaskGraph::new();
        let a = task("A");
        let b = task("B");
        let c = task("C");
        for t in [&a, &b, &c] {
            graph.add_task(Arc::clone(t));
        }
        // A -> B -> C, A -> C (not a cycle)
        b.add_dependency(Arc::clone(&a));
        c.add_dependency(Arc::clone(&b));
        c.add_dependency(Arc::clone(&a));

        assert!(graph.detect_cycle().is_none());
    }

    #[test]
    fn detect_simple_cycle() {
        let mut graph = TaskGraph::new();
        let a = task("A");
        let b = task("B");
        graph.add_task(Arc::clone(&a));
        graph.add_task(Arc::clone(&b));
        a.add_dependency(Arc::clone(&b));
        b.add_dependency(Arc::clone(&a));

        let cycle = graph.detect_cycle().expect("cycle");
        assert!(cycle.len() >= 3);
        assert_eq!(cycle.first(), cycle.last());
    }
}
