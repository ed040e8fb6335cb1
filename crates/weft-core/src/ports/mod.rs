//! Ports - 外部との境界（trait による抽象化）
//!
//! # 主要な port
//! - **NotificationStrategy**: 配送チャネル（email, SMS, push, ...）
//! - **Clock**: 変更記録のタイムスタンプ用の時刻
//!
//! 実装は `impls` に置く。

pub mod notification;
pub mod clock;

pub use self::notification::NotificationStrategy;
pub use self::clock::{Clock, FixedClock, SystemClock};
