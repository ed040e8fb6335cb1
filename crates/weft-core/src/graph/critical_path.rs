//! Critical path - 依存辺をたどった最長チェーン（経過日数ベース）
//!
//! 各 task について `total = duration + max(先行 task の total)` を計算し、
//! 勝った先行 task を覚えておく。ルール:
//! - 先行 task を持たない task は `total = duration`、経路は自分だけ
//! - 先行 task の中では登録順で最初のものが暫定の勝者。後のものは total が
//!   strictly greater のときだけ置き換える
//! - task 一覧全体でも、strictly greatest な total を持つ最初の task が勝つ
//!
//! # 実装詳細
//! - total は `TaskId` でメモ化する（複数の辺から届く task も 1 回だけ評価、tasks + edges に線形）
//! - 明示的なスタックによる DFS（再帰しないので長いチェーンでもスタックを食わない）
//! - 色分け: white = memo にも on_stack にもない / gray = on_stack / black = memo
//!
//! gray の task に再び到達したら辺がループしている。無限再帰の代わりに
//! `PlanError::CyclicDependency` を返す。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::{PlanError, PlanResult};
use crate::domain::ids::TaskId;
use crate::domain::task::TaskRef;

/// Result of a critical-path resolution.
#[derive(Debug, Clone, Default)]
pub struct CriticalPath {
    tasks: Vec<TaskRef>,
    total_days: i64,
}

impl CriticalPath {
    /// Tasks on the path, from the first predecessor to the final task.
    pub fn tasks(&self) -> &[TaskRef] {
        &self.tasks
    }

    /// Summed duration of the path in whole days (0 for an empty path).
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }
}

/// Compute the critical path of `tasks`.
///
/// Predecessors outside `tasks` are followed like any other task; they just
/// cannot be the end of the path.
pub fn resolve(tasks: &[TaskRef]) -> PlanResult<CriticalPath> {
    let mut resolver = Resolver::default();
    let mut winner: Option<(i64, &TaskRef)> = None;

    for task in tasks {
        let total = resolver.longest(task)?;
        match winner {
            Some((best, _)) if total <= best => {}
            _ => winner = Some((total, task)),
        }
    }

    let Some((total_days, end)) = winner else {
        return Ok(CriticalPath::default());
    };

    let path = resolver.path_to(end);
    debug!(
        tasks = tasks.len(),
        evaluated = resolver.evaluations,
        path_len = path.len(),
        total_days,
        "critical path resolved"
    );
    Ok(CriticalPath {
        tasks: path,
        total_days,
    })
}

/// Memoized longest-path state shared across all roots of one resolution.
#[derive(Default)]
pub(crate) struct Resolver {
    /// black: finished tasks
    memo: HashMap<TaskId, Longest>,
    /// gray: tasks whose frame is currently on the DFS stack
    on_stack: HashSet<TaskId>,
    /// number of tasks whose total was actually computed (memo misses)
    pub(crate) evaluations: usize,
}

struct Longest {
    total: i64,
    /// winning predecessor, `None` for a source task
    via: Option<TaskRef>,
}

struct Frame {
    task: TaskRef,
    predecessors: Vec<TaskRef>,
    next: usize,
    best: Option<(i64, TaskRef)>,
}

impl Frame {
    fn enter(task: TaskRef) -> Self {
        let predecessors = task.predecessors();
        Self {
            task,
            predecessors,
            next: 0,
            best: None,
        }
    }

    /// Strict `>`: on a tie the earlier predecessor keeps the slot.
    fn consider(&mut self, predecessor: &TaskRef, total: i64) {
        match &self.best {
            Some((best, _)) if total <= *best => {}
            _ => self.best = Some((total, Arc::clone(predecessor))),
        }
    }
}

impl Resolver {
    /// Total of the longest chain ending at `root`.
    pub(crate) fn longest(&mut self, root: &TaskRef) -> PlanResult<i64> {
        if let Some(done) = self.memo.get(&root.id()) {
            return Ok(done.total);
        }

        self.on_stack.insert(root.id());
        let mut stack = vec![Frame::enter(Arc::clone(root))];

        while let Some(frame) = stack.last_mut() {
            if let Some(predecessor) = frame.predecessors.get(frame.next).cloned() {
                frame.next += 1;

                if let Some(done) = self.memo.get(&predecessor.id()) {
                    frame.consider(&predecessor, done.total);
                    continue;
                }
                if self.on_stack.contains(&predecessor.id()) {
                    return Err(PlanError::CyclicDependency {
                        cycle: cycle_through(&stack, predecessor.id()),
                    });
                }

                self.on_stack.insert(predecessor.id());
                stack.push(Frame::enter(predecessor));
                continue;
            }

            // All predecessors are black: finish this task.
            let Some(finished) = stack.pop() else { break };
            let id = finished.task.id();
            let (total, via) = match finished.best {
                Some((pred_total, pred)) => (pred_total + finished.task.duration_days(), Some(pred)),
                None => (finished.task.duration_days(), None),
            };

            self.on_stack.remove(&id);
            self.memo.insert(id, Longest { total, via });
            self.evaluations += 1;

            if let Some(parent) = stack.last_mut() {
                parent.consider(&finished.task, total);
            }
        }

        self.memo
            .get(&root.id())
            .map(|done| done.total)
            .ok_or(PlanError::TaskNotFound(root.id()))
    }

    /// Follow the winning predecessors back from `end`.
    ///
    /// Only valid for a task already resolved; the memo is acyclic by construction.
    pub(crate) fn path_to(&self, end: &TaskRef) -> Vec<TaskRef> {
        let mut path = Vec::new();
        let mut current = Some(Arc::clone(end));
        while let Some(task) = current {
            current = self.memo.get(&task.id()).and_then(|l| l.via.clone());
            path.push(task);
        }
        path.reverse();
        path
    }
}

/// Ids from the gray task `join` down the stack to the top, closed on `join`.
fn cycle_through(stack: &[Frame], join: TaskId) -> Vec<TaskId> {
    let start = stack
        .iter()
        .position(|frame| frame.task.id() == join)
        .unwrap_or(0);
    let mut cycle: Vec<TaskId> = stack[start..].iter().map(|frame| frame.task.id()).collect();
    cycle.push(join);
    cycle
}
