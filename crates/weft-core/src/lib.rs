//! weft-core
//!
//! Core building blocks for weft (project planning).
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, member, task, state, risk, change, errors, events, spec）
//! - **graph**: タスクグラフ、循環検出、クリティカルパス
//! - **ports**: 抽象化レイヤー（NotificationStrategy, Clock）
//! - **impls**: 実装（Email/SMS/Push の console チャネル、InMemoryNotifier）
//! - **app**: アプリケーションロジック（Project, Notifier, ProjectBuilder, report）
//! - **config**: CLI 向けの実行時設定

pub mod app;
pub mod config;
pub mod domain;
pub mod graph;
pub mod impls;
pub mod ports;

pub use app::{Project, ProjectBuilder, ReportSnapshot};
pub use config::{ChannelKind, WeftConfig};
pub use domain::{Member, PlanError, PlanResult, PlanSpec, Task, TaskRef, TaskStatus};
