//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **EmailNotifier / SmsNotifier / PushNotifier**: console 系チャネル
//! - **InMemoryNotifier**: 配送を記録する（テスト、組み込み用）
//!
//! 実際の送信（SMTP, SMS ゲートウェイ, push サービス）は別 crate の担当。

pub mod channels;
pub mod inmem_notifier;

pub use self::channels::{EmailNotifier, PushNotifier, SmsNotifier};
pub use self::inmem_notifier::{Delivery, InMemoryNotifier};
