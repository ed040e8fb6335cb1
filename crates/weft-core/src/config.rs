//! Runtime configuration.
//!
//! Sources, later wins:
//! 1. defaults (`WeftConfig::default()`)
//! 2. a JSON file (`WeftConfig::from_path`), missing keys keep their default
//! 3. environment: `WEFT_NOTIFY` (channel) and `WEFT_LOG` (log filter)

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{PlanError, PlanResult};
use crate::impls::{EmailNotifier, PushNotifier, SmsNotifier};
use crate::ports::NotificationStrategy;

pub const ENV_NOTIFY: &str = "WEFT_NOTIFY";
pub const ENV_LOG: &str = "WEFT_LOG";

const DEFAULT_LOG_FILTER: &str = "weft=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeftConfig {
    /// Channel bound to projects built by the CLI.
    pub notification: ChannelKind,

    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for WeftConfig {
    fn default() -> Self {
        Self {
            notification: ChannelKind::None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl WeftConfig {
    pub fn from_json(json: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PlanResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "config loaded");
        Self::from_json(&text)
    }

    /// Override from the process environment.
    pub fn apply_env(self) -> PlanResult<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override from any key lookup (the environment, a map in tests, ...).
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> PlanResult<Self> {
        if let Some(channel) = lookup(ENV_NOTIFY) {
            self.notification = channel.parse()?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(self)
    }
}

/// Which console channel to bind.
///
/// Config files, `WEFT_NOTIFY` and `--channel` all go through `FromStr`, so the
/// same labels are accepted everywhere (case-insensitive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChannelKind {
    Email,
    Sms,
    Push,
    /// No strategy: notifications are dropped.
    #[default]
    None,
}

impl ChannelKind {
    /// Stdout-backed strategy for this channel, `None` for `ChannelKind::None`.
    pub fn strategy(self) -> Option<Box<dyn NotificationStrategy>> {
        self.strategy_with_writer(io::stdout())
    }

    /// Same channel, writing its lines to `out`.
    pub fn strategy_with_writer(
        self,
        out: impl Write + Send + 'static,
    ) -> Option<Box<dyn NotificationStrategy>> {
        match self {
            Self::Email => Some(Box::new(EmailNotifier::with_writer(out))),
            Self::Sms => Some(Box::new(SmsNotifier::with_writer(out))),
            Self::Push => Some(Box::new(PushNotifier::with_writer(out))),
            Self::None => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "push" => Ok(Self::Push),
            "none" | "" => Ok(Self::None),
            other => Err(PlanError::Config(format!(
                "unknown notification channel '{other}' (expected email, sms, push or none)"
            ))),
        }
    }
}

impl TryFrom<String> for ChannelKind {
    type Error = PlanError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl From<ChannelKind> for String {
    fn from(kind: ChannelKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = WeftConfig::default();
        assert_eq!(config.notification, ChannelKind::None);
        assert_eq!(config.log_filter, "weft=info");
        assert!(config.notification.strategy().is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WeftConfig::from_json(r#"{ "notification": "sms" }"#).unwrap();
        assert_eq!(config.notification, ChannelKind::Sms);
        assert_eq!(config.log_filter, "weft=info");
    }

    #[rstest]
    #[case(r#"{ "notification": "SMS" }"#, ChannelKind::Sms)]
    #[case(r#"{ "notification": "Email" }"#, ChannelKind::Email)]
    #[case(r#"{ "notification": "none" }"#, ChannelKind::None)]
    fn config_file_channel_is_case_insensitive(#[case] json: &str, #[case] expected: ChannelKind) {
        assert_eq!(WeftConfig::from_json(json).unwrap().notification, expected);
    }

    #[test]
    fn unknown_config_file_channel_is_rejected() {
        let err = WeftConfig::from_json(r#"{ "notification": "pigeon" }"#).unwrap_err();
        assert!(matches!(err, PlanError::Json(ref e) if e.to_string().contains("pigeon")));
    }

    #[test]
    fn config_serializes_channel_as_lowercase_label() {
        let config = WeftConfig {
            notification: ChannelKind::Sms,
            ..WeftConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["notification"], "sms");
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [(ENV_NOTIFY, "Push"), (ENV_LOG, "weft=debug")].into();
        let config = WeftConfig::from_json(r#"{ "notification": "email" }"#)
            .unwrap()
            .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.notification, ChannelKind::Push);
        assert_eq!(config.log_filter, "weft=debug");
    }

    #[test]
    fn bad_env_channel_is_a_config_error() {
        let err = WeftConfig::default()
            .apply_env_from(|key| (key == ENV_NOTIFY).then(|| "pigeon".to_string()))
            .unwrap_err();
        assert!(matches!(err, PlanError::Config(ref msg) if msg.contains("pigeon")));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WeftConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PlanError::Io(_)));
    }

    #[rstest]
    #[case("email", ChannelKind::Email, Some("email"))]
    #[case("SMS", ChannelKind::Sms, Some("SMS"))]
    #[case("push", ChannelKind::Push, Some("push"))]
    #[case("none", ChannelKind::None, None)]
    fn channel_kinds_build_their_strategy(
        #[case] raw: &str,
        #[case] kind: ChannelKind,
        #[case] channel: Option<&str>,
    ) {
        let parsed: ChannelKind = raw.parse().unwrap();
        assert_eq!(parsed, kind);
        let strategy = parsed.strategy();
        assert_eq!(strategy.as_ref().map(|s| s.channel()), channel);
    }
}
