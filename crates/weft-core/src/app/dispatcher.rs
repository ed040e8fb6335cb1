//! Notifier - bind された strategy を通して 1 つのメッセージを全員に配る
//!
//! 状態は strategy だけ。`bind` は同期的に差し替える。`bind`（`&mut self`）と
//! `notify`（`&self`）は借用チェッカーで排他されるので、差し替え途中の strategy を
//! notify が見ることはない。

use tracing::trace;

use crate::domain::member::Member;
use crate::ports::NotificationStrategy;

/// Notifier は strategy を 1 つだけ保持する dispatcher
pub struct Notifier {
    strategy: Box<dyn NotificationStrategy>,
}

impl Notifier {
    pub fn new(strategy: impl NotificationStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Replace the strategy. Takes effect on the next `notify`.
    pub fn bind(&mut self, strategy: impl NotificationStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    pub fn channel(&self) -> &str {
        self.strategy.channel()
    }

    /// Deliver `message` to every recipient, in order.
    pub fn notify(&self, message: &str, recipients: &[Member]) {
        trace!(
            channel = self.strategy.channel(),
            recipients = recipients.len(),
            "fan-out"
        );
        for recipient in recipients {
            self.strategy.deliver(message, recipient);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("channel", &self.strategy.channel())
            .finish()
    }
}
