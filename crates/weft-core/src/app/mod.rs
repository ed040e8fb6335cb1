//! App - アプリケーション層
//!
//! このモジュールは、domain と ports を組み合わせて Project を組み立てます。
//!
//! # 主要コンポーネント
//! - **Project**: 集約ルート。変更のたびにチームへ通知
//! - **Notifier**: bind された strategy で全員に配る
//! - **ProjectBuilder**: `PlanSpec` を `Project` に再生する
//! - **report**: スナップショットとテキスト描画

pub mod builder;
pub mod dispatcher;
pub mod project;
pub mod report;

pub use self::builder::ProjectBuilder;
pub use self::dispatcher::Notifier;
pub use self::project::{INITIAL_VERSION, Project};
pub use self::report::{ReportSnapshot, TaskLine, render};
