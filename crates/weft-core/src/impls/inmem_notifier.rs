//! InMemoryNotifier - 送信せずに配送を記録する
//!
//! # 学習ポイント
//! - `Arc<Mutex<_>>` を clone で共有し、strategy を Project に渡した後も中身を読める
//! - テストや組み込み用途で「誰に何が届いたか」を検証する
//!
//! # 使用例
//! ```ignore
//! let recorder = InMemoryNotifier::new();
//! project.set_notification_strategy(recorder.clone());
//! project.add_team_member(Member::new("Pape", "Développeur"));
//! assert_eq!(recorder.messages(), vec!["Pape added to team"]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::domain::member::Member;
use crate::ports::NotificationStrategy;

/// One recorded `deliver` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub channel: String,
    pub recipient: Member,
    pub message: String,
}

/// InMemoryNotifier は配送を `Vec<Delivery>` に記録する
///
/// # 実装詳細
/// - `Arc<Mutex<Vec<Delivery>>>` を clone 間で共有
/// - lock が poison されても中身はそのまま使う
#[derive(Debug, Clone)]
pub struct InMemoryNotifier {
    channel: String,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::with_channel("memory")
    }

    /// Record under a custom channel name, e.g. to tell two bound strategies apart.
    pub fn with_channel(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            deliveries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything delivered so far, in call order.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|d| d.message.clone()).collect()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.lock().iter().map(|d| d.recipient.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Delivery>> {
        self.deliveries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStrategy for InMemoryNotifier {
    fn channel(&self) -> &str {
        &self.channel
    }

    fn deliver(&self, message: &str, recipient: &Member) {
        self.lock().push(Delivery {
            channel: self.channel.clone(),
            recipient: recipient.clone(),
            message: message.to_string(),
        });
    }
}
