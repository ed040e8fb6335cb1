//! Console 系チャネル - email / SMS / push
//!
//! どれも実際の送信は行わず、1 配送につき 1 行を書き出す:
//!
//! ```text
//! Notification sent to Brahim by email: new task added: Analyse des besoins
//! ```
//!
//! # 実装詳細
//! - 書き込み先は stdout（`with_writer` で任意の `Write` に差し替え可能）
//! - 書き込み失敗は `warn!` で記録して捨てる（fire-and-forget）
//! - 3 チャネルの違いはチャネル名だけなので `console_channel!` マクロで生成

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::member::Member;
use crate::ports::NotificationStrategy;

/// Render the delivery line shared by all console channels.
pub fn render_line(channel: &str, message: &str, recipient: &Member) -> String {
    format!("Notification sent to {} by {channel}: {message}", recipient.name)
}

/// Line sink shared by the three channels.
struct LineSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl LineSink {
    fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, channel: &str, message: &str, recipient: &Member) {
        let line = render_line(channel, message, recipient);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(channel, recipient = %recipient.name, error = %e, "notification write failed");
            return;
        }
        debug!(channel, recipient = %recipient.name, "notification delivered");
    }
}

macro_rules! console_channel {
    ($(#[$doc:meta])* $name:ident, $channel:literal) => {
        $(#[$doc])*
        pub struct $name {
            sink: LineSink,
        }

        impl $name {
            /// Deliver to stdout.
            pub fn new() -> Self {
                Self {
                    sink: LineSink::stdout(),
                }
            }

            /// Deliver to any writer (a file, a buffer, ...).
            pub fn with_writer(out: impl Write + Send + 'static) -> Self {
                Self {
                    sink: LineSink::new(Box::new(out)),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl NotificationStrategy for $name {
            fn channel(&self) -> &str {
                $channel
            }

            fn deliver(&self, message: &str, recipient: &Member) {
                self.sink.emit($channel, message, recipient);
            }
        }
    };
}

console_channel!(
    /// Email-style delivery.
    EmailNotifier,
    "email"
);

console_channel!(
    /// SMS-style delivery.
    SmsNotifier,
    "SMS"
);

console_channel!(
    /// Push-notification-style delivery.
    PushNotifier,
    "push"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Cloneable in-memory writer so the test can read what the channel wrote.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn email_line_names_recipient_and_message() {
        let buffer = SharedBuffer::default();
        let email = EmailNotifier::with_writer(buffer.clone());

        email.deliver("new task added: Analyse", &Member::new("Brahim", "Chef de projet"));

        assert_eq!(
            buffer.text(),
            "Notification sent to Brahim by email: new task added: Analyse\n"
        );
    }

    #[test]
    fn each_channel_labels_its_lines() {
        let pape = Member::new("Pape", "Développeur");
        let channels: Vec<(Box<dyn NotificationStrategy>, SharedBuffer)> = {
            let (a, b, c) = (SharedBuffer::default(), SharedBuffer::default(), SharedBuffer::default());
            vec![
                (Box::new(EmailNotifier::with_writer(a.clone())) as Box<dyn NotificationStrategy>, a),
                (Box::new(SmsNotifier::with_writer(b.clone())) as Box<dyn NotificationStrategy>, b),
                (Box::new(PushNotifier::with_writer(c.clone())) as Box<dyn NotificationStrategy>, c),
            ]
        };

        for (channel, buffer) in &channels {
            channel.deliver("hello", &pape);
            assert_eq!(
                buffer.text(),
                format!("Notification sent to Pape by {}: hello\n", channel.channel())
            );
        }
        let names: Vec<&str> = channels.iter().map(|(c, _)| c.channel()).collect();
        assert_eq!(names, vec!["email", "SMS", "push"]);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let sms = SmsNotifier::with_writer(BrokenPipe);
        sms.deliver("hello", &Member::new("Pape", "Développeur"));
    }
}
