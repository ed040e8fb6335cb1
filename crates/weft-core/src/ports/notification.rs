//! NotificationStrategy port - メッセージを 1 人のメンバーに届ける方法
//!
//! dispatcher（`app::dispatcher::Notifier`）は strategy を 1 つだけ持ち、
//! 受信者ごとに `deliver` を 1 回呼ぶ。strategy は実行時に差し替え可能で、
//! email / SMS / push はこの trait の実装の違いにすぎない。
//!
//! # 契約
//! - `deliver` は fire-and-forget（戻り値なし、リトライなし、確認なし）
//! - 出力からメッセージと受信者の両方が分かること
//! - `&self` を使うことで object-safe（`Box<dyn _>` に置ける）

use crate::domain::member::Member;

/// NotificationStrategy は 1 通のメッセージを 1 人に届ける
///
/// # 実装
/// - `impls::channels`: EmailNotifier / SmsNotifier / PushNotifier
/// - `impls::inmem_notifier`: InMemoryNotifier（記録のみ）
pub trait NotificationStrategy: Send + Sync {
    /// Channel name, e.g. "email". Used in rendered lines and log fields.
    fn channel(&self) -> &str;

    fn deliver(&self, message: &str, recipient: &Member);
}

impl<S: NotificationStrategy + ?Sized> NotificationStrategy for Box<S> {
    fn channel(&self) -> &str {
        (**self).channel()
    }

    fn deliver(&self, message: &str, recipient: &Member) {
        (**self).deliver(message, recipient)
    }
}
