//! Project - 集約ルート
//!
//! Project は「変更ログ + 通知の副作用」。変更系の操作はすべて同じ手順を踏む:
//!
//! 1. 変更を適用する / 対応するコレクションに追加する
//! 2. `ProjectEvent` を発行する（`info!` でログ）
//! 3. *現在の* メンバー全員に通知する（この呼び出しで追加されたメンバーも含む）
//!
//! # 学習ポイント
//! - 集約が状態と副作用の順序を一手に握る
//! - 未 bind は `Option<Notifier>` の `None` で表す（エラーにしない）
//! - clock を port として差し替え可能にしてテストで時刻を固定する
//!
//! `set_notification_strategy` を呼ぶまでは手順 3 は黙ってスキップされる。

use chrono::NaiveDateTime;
use tracing::info;

use super::dispatcher::Notifier;
use super::report::{self, ReportSnapshot};
use crate::domain::change::Change;
use crate::domain::errors::{PlanError, PlanResult};
use crate::domain::events::ProjectEvent;
use crate::domain::ids::TaskId;
use crate::domain::member::{Member, Team};
use crate::domain::risk::{Milestone, Risk};
use crate::domain::state::TaskStatus;
use crate::domain::task::TaskRef;
use crate::graph::{CriticalPath, TaskGraph};
use crate::ports::{Clock, NotificationStrategy, SystemClock};

/// First version of every project.
pub const INITIAL_VERSION: u32 = 1;

/// Project はタスク・チーム・リスク・マイルストーン・変更履歴を持つ集約
///
/// # 使用例
/// ```ignore
/// let mut project = Project::new("Nouveau Produit", "", start, end);
/// project.set_notification_strategy(EmailNotifier::new());
/// project.add_team_member(Member::new("Brahim", "Chef de projet"));
/// project.compute_critical_path()?;
/// println!("{}", project.generate_report());
/// ```
pub struct Project {
    name: String,
    description: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    budget: f64,
    tasks: TaskGraph,
    team: Team,
    risks: Vec<Risk>,
    milestones: Vec<Milestone>,
    version: u32,
    changes: Vec<Change>,
    critical_path: CriticalPath,
    notifier: Option<Notifier>,
    clock: Box<dyn Clock>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start,
            end,
            budget: 0.0,
            tasks: TaskGraph::new(),
            team: Team::new(),
            risks: Vec::new(),
            milestones: Vec::new(),
            version: INITIAL_VERSION,
            changes: Vec::new(),
            critical_path: CriticalPath::default(),
            notifier: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Use `clock` for change timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ----------------------------------------
    // Mutations
    // ----------------------------------------

    /// Bind (or rebind) the delivery strategy.
    pub fn set_notification_strategy(&mut self, strategy: impl NotificationStrategy + 'static) {
        match &mut self.notifier {
            Some(notifier) => notifier.bind(strategy),
            None => self.notifier = Some(Notifier::new(strategy)),
        }
    }

    pub fn add_task(&mut self, task: TaskRef) {
        let name = task.name().to_string();
        self.tasks.add_task(task);
        self.publish(ProjectEvent::TaskAdded { name });
    }

    pub fn add_team_member(&mut self, member: Member) {
        let name = member.name.clone();
        self.team.add_member(member);
        self.publish(ProjectEvent::MemberAdded { name });
    }

    pub fn set_budget(&mut self, amount: f64) {
        self.budget = amount;
        self.publish(ProjectEvent::BudgetSet { amount });
    }

    pub fn add_risk(&mut self, risk: Risk) {
        let description = risk.description.clone();
        self.risks.push(risk);
        self.publish(ProjectEvent::RiskAdded { description });
    }

    pub fn add_milestone(&mut self, milestone: Milestone) {
        let name = milestone.name.clone();
        self.milestones.push(milestone);
        self.publish(ProjectEvent::MilestoneAdded { name });
    }

    /// Record a change stamped with the current version, then bump the version.
    ///
    /// The notification announces the bumped version, so it reads one higher
    /// than the `Change` it reports on.
    pub fn record_change(&mut self, description: impl Into<String>) {
        let description = description.into();
        let change = Change::new(description.clone(), self.version, self.clock.now());
        self.changes.push(change);
        self.version += 1;
        self.publish(ProjectEvent::ChangeRecorded {
            description,
            version: self.version,
        });
    }

    /// Change the status of a listed task.
    pub fn update_task_status(&mut self, task: TaskId, status: impl Into<TaskStatus>) -> PlanResult<()> {
        let task = self.tasks.get(task).ok_or(PlanError::TaskNotFound(task))?;
        let status = status.into();
        task.update_status(status.clone());
        let name = task.name().to_string();
        self.publish(ProjectEvent::TaskStatusChanged {
            name,
            status: status.to_string(),
        });
        Ok(())
    }

    /// Recompute the critical path over the full task list and cache it.
    ///
    /// Does not notify. On error the previous cache is kept.
    pub fn compute_critical_path(&mut self) -> PlanResult<&[TaskRef]> {
        let path = self.tasks.critical_path()?;
        info!(
            project = %self.name,
            path = ?path.names(),
            total_days = path.total_days(),
            "critical path computed"
        );
        self.critical_path = path;
        Ok(self.critical_path.tasks())
    }

    fn publish(&self, event: ProjectEvent) {
        let message = event.message();
        info!(project = %self.name, event = event.kind(), "{message}");
        if let Some(notifier) = &self.notifier {
            notifier.notify(&message, self.team.members());
        }
    }

    // ----------------------------------------
    // Reads
    // ----------------------------------------

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

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn tasks(&self) -> &[TaskRef] {
        self.tasks.tasks()
    }

    pub fn members(&self) -> &[Member] {
        self.team.members()
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Cached result of the last `compute_critical_path` (empty before the first).
    pub fn critical_path(&self) -> &[TaskRef] {
        self.critical_path.tasks()
    }

    pub fn critical_path_days(&self) -> i64 {
        self.critical_path.total_days()
    }

    /// Channel of the bound strategy, `None` while unbound.
    pub fn notification_channel(&self) -> Option<&str> {
        self.notifier.as_ref().map(Notifier::channel)
    }

    /// Read-only projection for report renderers.
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot::of(self)
    }

    pub fn generate_report(&self) -> String {
        report::render(&self.snapshot())
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("budget", &self.budget)
            .field("tasks", &self.tasks.len())
            .field("members", &self.team.len())
            .field("notifier", &self.notifier)
            .finish()
    }
}
