//! Report - Project の読み取り専用スナップショットとテキスト描画
//!
//! # 実装詳細
//! - `ReportSnapshot::of` で必要な値だけをコピーする（描画側は Project を触らない）
//! - `render` はスナップショットの純粋関数。変更を挟まなければ同じ文字列になる
//! - タイムスタンプは `YYYY-MM-DD HH:MM:SS`、浮動小数は `{:?}`（`50000.0`, `0.3`）

use std::fmt::Write;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::project::Project;
use crate::domain::member::Member;
use crate::domain::risk::{Milestone, Risk};
use crate::domain::task::TaskRef;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a report renderer may look at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub name: String,
    pub version: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub budget: f64,
    pub members: Vec<Member>,
    pub tasks: Vec<TaskLine>,
    pub milestones: Vec<Milestone>,
    pub risks: Vec<Risk>,
    pub critical_path: Vec<TaskLine>,
    pub critical_path_days: i64,
}

/// Flattened task as shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskLine {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub owner: String,
    pub status: String,
    pub depends_on: Vec<String>,
}

impl TaskLine {
    fn of(task: &TaskRef) -> Self {
        Self {
            name: task.name().to_string(),
            start: task.start(),
            end: task.end(),
            owner: task.owner().name.clone(),
            status: task.status().to_string(),
            depends_on: task
                .predecessors()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
        }
    }
}

impl ReportSnapshot {
    pub fn of(project: &Project) -> Self {
        Self {
            name: project.name().to_string(),
            version: project.version(),
            start: project.start(),
            end: project.end(),
            budget: project.budget(),
            members: project.members().to_vec(),
            tasks: project.tasks().iter().map(TaskLine::of).collect(),
            milestones: project.milestones().to_vec(),
            risks: project.risks().to_vec(),
            critical_path: project.critical_path().iter().map(TaskLine::of).collect(),
            critical_path_days: project.critical_path_days(),
        }
    }
}

fn ts(at: NaiveDateTime) -> impl std::fmt::Display {
    at.format(TIMESTAMP_FORMAT)
}

/// Render the plain-text activity report.
pub fn render(snapshot: &ReportSnapshot) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, snapshot);
    out
}

fn write_report(out: &mut String, s: &ReportSnapshot) -> std::fmt::Result {
    writeln!(out, "Activity report for project '{}':", s.name)?;
    writeln!(out, "Version: {}", s.version)?;
    writeln!(out, "Dates: {} to {}", ts(s.start), ts(s.end))?;
    writeln!(out, "Budget: {:?} monetary units", s.budget)?;

    writeln!(out, "Team:")?;
    for m in &s.members {
        writeln!(out, "- {} ({})", m.name, m.role)?;
    }

    writeln!(out, "Tasks:")?;
    for t in &s.tasks {
        writeln!(
            out,
            "- {} ({} to {}), Owner: {}, Status: {}",
            t.name,
            ts(t.start),
            ts(t.end),
            t.owner,
            t.status
        )?;
    }

    writeln!(out, "Milestones:")?;
    for m in &s.milestones {
        writeln!(out, "- {} ({})", m.name, ts(m.date))?;
    }

    writeln!(out, "Risks:")?;
    for r in &s.risks {
        writeln!(
            out,
            "- {} (Probability: {:?}, Impact: {})",
            r.description, r.probability, r.impact
        )?;
    }

    writeln!(out, "Critical path:")?;
    for t in &s.critical_path {
        writeln!(out, "- {} ({} to {})", t.name, ts(t.start), ts(t.end))?;
    }
    Ok(())
}
