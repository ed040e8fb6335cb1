//! ProjectBuilder - PlanSpec から Project を組み立てる
//!
//! # 学習ポイント
//! - Builder パターン（strategy / clock は任意で差し込む）
//! - 起動時検証（Fail-fast 設計）
//! - 検証が終わるまで Arc の辺を張らない（エラー経路で循環参照を残さない）
//!
//! # 検証内容
//! - task の owner は members に載っていること（`UnknownMember`）
//! - task 名は一意であること（`DuplicateTask`）
//! - `depends_on` は既知の task 名であること（`UnknownDependency`）
//! - 依存辺がループしないこと（`CyclicDependency`）
//!
//! 検証を通った plan は通常の Project 操作で再生する。順序は JSON のキー順に
//! 関係なく固定で、members → tasks → budget → risks → milestones → changes。
//! 通知と version の進み方は手で呼んだ場合と同じになる。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::project::Project;
use crate::domain::errors::{PlanError, PlanResult};
use crate::domain::member::{Member, Team};
use crate::domain::risk::{Milestone, Risk};
use crate::domain::spec::PlanSpec;
use crate::domain::state::TaskStatus;
use crate::domain::task::{Task, TaskRef};
use crate::graph::TaskGraph;
use crate::ports::{Clock, NotificationStrategy};

/// ProjectBuilder は plan を検証してから Project を構築する
///
/// # 使用例
/// ```ignore
/// let project = ProjectBuilder::from_plan(plan)
///     .with_strategy(EmailNotifier::new())
///     .build()?;
/// ```
pub struct ProjectBuilder {
    plan: PlanSpec,
    strategy: Option<Box<dyn NotificationStrategy>>,
    clock: Option<Box<dyn Clock>>,
}

impl ProjectBuilder {
    pub fn from_plan(plan: PlanSpec) -> Self {
        Self {
            plan,
            strategy: None,
            clock: None,
        }
    }

    /// 再生前に strategy を bind する（全ステップが通知される）
    pub fn with_strategy(mut self, strategy: impl NotificationStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// `with_strategy` の Box 版（`None` なら未 bind のまま）
    pub fn with_boxed_strategy(mut self, strategy: Option<Box<dyn NotificationStrategy>>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> PlanResult<Project> {
        let mut team = Team::new();
        for member in &self.plan.members {
            team.add_member(Member::new(&member.name, &member.role));
        }
        let tasks = self.create_tasks(&team)?;
        self.link_tasks(&tasks)?;

        let spec = &self.plan.project;
        let mut project = Project::new(&spec.name, &spec.description, spec.start, spec.end);
        if let Some(clock) = self.clock {
            project = project.with_clock(clock);
        }
        if let Some(strategy) = self.strategy {
            project.set_notification_strategy(strategy);
        }

        for member in team.members() {
            project.add_team_member(member.clone());
        }
        for task in tasks {
            project.add_task(task);
        }
        if let Some(budget) = self.plan.budget {
            project.set_budget(budget);
        }
        for risk in &self.plan.risks {
            project.add_risk(Risk::new(&risk.description, risk.probability, &risk.impact));
        }
        for milestone in &self.plan.milestones {
            project.add_milestone(Milestone::new(&milestone.name, milestone.date));
        }
        for change in &self.plan.changes {
            project.record_change(change);
        }

        debug!(
            project = %project.name(),
            tasks = project.tasks().len(),
            members = project.members().len(),
            version = project.version(),
            "plan loaded"
        );
        Ok(project)
    }

    /// 全 task を辺なしで作る（owner と名前の重複をここで検証）
    fn create_tasks(&self, team: &Team) -> PlanResult<Vec<TaskRef>> {
        let mut tasks: Vec<TaskRef> = Vec::with_capacity(self.plan.tasks.len());

        for spec in &self.plan.tasks {
            let owner = team
                .find(&spec.owner)
                .cloned()
                .ok_or_else(|| PlanError::UnknownMember {
                    task: spec.name.clone(),
                    member: spec.owner.clone(),
                })?;
            if tasks.iter().any(|t| t.name() == spec.name) {
                return Err(PlanError::DuplicateTask(spec.name.clone()));
            }
            let status = spec
                .status
                .as_deref()
                .map(TaskStatus::from_label)
                .unwrap_or_default();
            tasks.push(
                Task::builder(&spec.name, spec.start, spec.end, owner)
                    .description(&spec.description)
                    .status(status)
                    .build(),
            );
        }
        Ok(tasks)
    }

    /// `depends_on` を名前で解決して辺を張る
    ///
    /// # 実装詳細
    /// - 全ての名前を先に解決し、1 つでも未知なら辺を 1 本も張らずに返す
    /// - 辺を張った後にループが見つかれば全ての辺を外してから返す
    ///
    /// どちらのエラー経路でも task 同士の Arc は残らない。
    fn link_tasks(&self, tasks: &[TaskRef]) -> PlanResult<()> {
        let by_name: HashMap<&str, &TaskRef> = tasks.iter().map(|t| (t.name(), t)).collect();

        let mut edges: Vec<(&TaskRef, &TaskRef)> = Vec::new();
        for (spec, task) in self.plan.tasks.iter().zip(tasks) {
            for dependency in &spec.depends_on {
                let predecessor =
                    by_name
                        .get(dependency.as_str())
                        .copied()
                        .ok_or_else(|| PlanError::UnknownDependency {
                            task: spec.name.clone(),
                            dependency: dependency.clone(),
                        })?;
                edges.push((task, predecessor));
            }
        }

        for (task, predecessor) in edges {
            task.add_dependency(Arc::clone(predecessor));
        }

        let mut graph = TaskGraph::new();
        for task in tasks {
            graph.add_task(Arc::clone(task));
        }
        if let Some(cycle) = graph.detect_cycle() {
            for task in tasks {
                task.clear_dependencies();
            }
            return Err(PlanError::CyclicDependency { cycle });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryNotifier;

    const PLAN: &str = r#"
    {
      "project": { "name": "Nouveau Produit", "start": "2024-01-01", "end": "2024-12-31" },
      "budget": 50000.0,
      "members": [
        { "name": "Brahim", "role": "Chef de projet" },
        { "name": "Pape", "role": "Développeur" }
      ],
      "tasks": [
        { "name": "Analyse des besoins", "start": "2024-01-01", "end": "2024-01-31",
          "owner": "Brahim", "status": "Terminée" },
        { "name": "Développement", "start": "2024-02-01", "end": "2024-06-30",
          "owner": "Pape", "status": "in_progress", "depends_on": ["Analyse des besoins"] }
      ],
      "risks": [ { "description": "Retard de livraison", "probability": 0.3, "impact": "Élevé" } ],
      "milestones": [ { "name": "Phase 1 terminée", "date": "2024-01-31" } ],
      "changes": [ "Changement de la portée du projet" ]
    }"#;

    fn plan() -> PlanSpec {
        PlanSpec::from_json(PLAN).unwrap()
    }

    #[test]
    fn build_replays_the_plan() {
        let mut project = ProjectBuilder::from_plan(plan()).build().unwrap();

        assert_eq!(project.name(), "Nouveau Produit");
        assert_eq!(project.members().len(), 2);
        assert_eq!(project.tasks().len(), 2);
        assert_eq!(project.budget(), 50000.0);
        assert_eq!(project.risks().len(), 1);
        assert_eq!(project.milestones().len(), 1);
        assert_eq!(project.version(), 2);
        assert_eq!(project.tasks()[1].status(), TaskStatus::InProgress);

        let names: Vec<String> = project
            .compute_critical_path()
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Analyse des besoins", "Développement"]);
    }

    #[test]
    fn build_with_strategy_notifies_every_step() {
        let recorder = InMemoryNotifier::new();
        ProjectBuilder::from_plan(plan())
            .with_strategy(recorder.clone())
            .build()
            .unwrap();

        // members: 1 + 2, then 6 more events to 2 members each
        assert_eq!(recorder.len(), 3 + 6 * 2);
        assert_eq!(
            recorder.messages().last().map(String::as_str),
            Some("change recorded: Changement de la portée du projet (version 2)")
        );
    }

    #[test]
    fn unknown_owner_fails_fast() {
        let mut plan = plan();
        plan.tasks[0].owner = "Inconnu".to_string();

        let err = ProjectBuilder::from_plan(plan).build().unwrap_err();
        assert!(matches!(err, PlanError::UnknownMember { ref member, .. } if member == "Inconnu"));
    }

    #[test]
    fn unknown_dependency_fails_fast() {
        let mut plan = plan();
        plan.tasks[1].depends_on = vec!["Conception".to_string()];

        let err = ProjectBuilder::from_plan(plan).build().unwrap_err();
        assert!(matches!(
            err,
            PlanError::UnknownDependency { ref task, ref dependency }
                if task == "Développement" && dependency == "Conception"
        ));
    }

    #[test]
    fn duplicate_task_name_fails_fast() {
        let mut plan = plan();
        plan.tasks[1].name = "Analyse des besoins".to_string();
        plan.tasks[1].depends_on.clear();

        let err = ProjectBuilder::from_plan(plan).build().unwrap_err();
        assert!(matches!(err, PlanError::DuplicateTask(ref name) if name == "Analyse des besoins"));
    }

    #[test]
    fn cyclic_plan_fails_fast() {
        let mut plan = plan();
        plan.tasks[0].depends_on = vec!["Développement".to_string()];

        let err = ProjectBuilder::from_plan(plan).build().unwrap_err();
        assert!(matches!(err, PlanError::CyclicDependency { ref cycle } if cycle.len() == 3));
    }

    fn spec_with(tasks: &[(&str, &[&str])]) -> PlanSpec {
        let mut plan = plan();
        let template = plan.tasks[0].clone();
        plan.tasks = tasks
            .iter()
            .map(|(name, deps)| {
                let mut task = template.clone();
                task.name = name.to_string();
                task.depends_on = deps.iter().map(|d| d.to_string()).collect();
                task
            })
            .collect();
        plan
    }

    fn weak_handles(tasks: &[TaskRef]) -> Vec<std::sync::Weak<Task>> {
        tasks.iter().map(Arc::downgrade).collect()
    }

    #[test]
    fn unknown_dependency_after_a_loop_leaves_no_edges() {
        // A waits for B, B waits for A and an unknown task
        let builder = ProjectBuilder::from_plan(spec_with(&[("A", &["B"]), ("B", &["A", "X"])]));
        let mut team = Team::new();
        team.add_member(Member::new("Brahim", "Chef de projet"));
        let tasks = builder.create_tasks(&team).unwrap();
        let handles = weak_handles(&tasks);

        let err = builder.link_tasks(&tasks).unwrap_err();
        assert!(matches!(err, PlanError::UnknownDependency { ref dependency, .. } if dependency == "X"));
        assert!(tasks.iter().all(|t| !t.has_predecessors()));

        drop(tasks);
        assert!(handles.iter().all(|h| h.upgrade().is_none()));
    }

    #[test]
    fn rejected_loop_is_unlinked() {
        let builder = ProjectBuilder::from_plan(spec_with(&[("A", &["B"]), ("B", &["A"])]));
        let mut team = Team::new();
        team.add_member(Member::new("Brahim", "Chef de projet"));
        let tasks = builder.create_tasks(&team).unwrap();
        let handles = weak_handles(&tasks);

        let err = builder.link_tasks(&tasks).unwrap_err();
        assert!(matches!(err, PlanError::CyclicDependency { .. }));

        drop(tasks);
        assert!(handles.iter().all(|h| h.upgrade().is_none()));
    }

    #[test]
    fn replay_order_ignores_json_key_order() {
        let json = r#"
        {
          "changes": [ "first" ],
          "budget": 10.0,
          "members": [ { "name": "Brahim", "role": "Chef de projet" } ],
          "project": { "name": "P", "start": "2024-01-01", "end": "2024-12-31" }
        }"#;
        let recorder = InMemoryNotifier::new();
        ProjectBuilder::from_plan(PlanSpec::from_json(json).unwrap())
            .with_strategy(recorder.clone())
            .build()
            .unwrap();

        assert_eq!(
            recorder.messages(),
            vec![
                "Brahim added to team",
                "project budget set to 10.0 monetary units",
                "change recorded: first (version 2)",
            ]
        );
    }
}
