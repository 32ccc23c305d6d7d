//! Notification request construction.
//!
//! A [`NotificationRequest`] is what the core hands to a [`super::Notifier`].
//! Platform-specific presentation settings ride along in
//! [`PlatformOptions`] and are never inspected by the timer itself.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier used when every alert reuses the same notification slot.
pub const DEFAULT_NOTIFICATION_ID: i32 = 1;

// ============================================================================
// Identifiers
// ============================================================================

/// How notification identifiers are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationIdPolicy {
    /// Every alert replaces the previous one by reusing a fixed id.
    #[default]
    Fixed,
    /// Every alert gets a fresh id and stacks in the notification tray.
    Unique,
}

/// Identifier attached to a scheduled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationId {
    Fixed(i32),
    Unique(Uuid),
}

impl NotificationId {
    /// Produces an id according to `policy`.
    #[must_use]
    pub fn assign(policy: NotificationIdPolicy, fixed_id: i32) -> Self {
        match policy {
            NotificationIdPolicy::Fixed => Self::Fixed(fixed_id),
            NotificationIdPolicy::Unique => Self::Unique(Uuid::new_v4()),
        }
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(id) => write!(f, "{id}"),
            Self::Unique(id) => write!(f, "{id}"),
        }
    }
}

// ============================================================================
// Platform options
// ============================================================================

/// Android presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidOptions {
    pub channel_id: Option<String>,
    pub priority: Option<i32>,
    pub visibility: Option<i32>,
    pub small_icon: Option<String>,
    pub icon_color: Option<String>,
}

/// iOS presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IosOptions {
    pub sound: Option<String>,
    pub badge: Option<u32>,
    pub foreground: Option<bool>,
}

/// Platform-specific settings passed through to the notifier untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformOptions {
    pub android: Option<AndroidOptions>,
    pub ios: Option<IosOptions>,
    /// Free-form data attached to the notification.
    pub extra: BTreeMap<String, String>,
}

// ============================================================================
// NotificationSettings
// ============================================================================

fn default_fixed_id() -> i32 {
    DEFAULT_NOTIFICATION_ID
}

/// Badge the alert on the app icon, show it in the foreground and attach
/// the stock extra data.
fn default_platform() -> PlatformOptions {
    PlatformOptions {
        android: None,
        ios: Some(IosOptions {
            sound: None,
            badge: Some(1),
            foreground: Some(true),
        }),
        extra: BTreeMap::from([("foo".to_string(), "bar".to_string())]),
    }
}

/// Notification settings applied to every alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub id_policy: NotificationIdPolicy,

    /// Identifier used by the `fixed` policy.
    #[serde(default = "default_fixed_id")]
    pub fixed_id: i32,

    #[serde(default)]
    pub channel: Option<String>,

    #[serde(default = "default_platform")]
    pub platform: PlatformOptions,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            id_policy: NotificationIdPolicy::default(),
            fixed_id: default_fixed_id(),
            channel: None,
            platform: default_platform(),
        }
    }
}

impl NotificationSettings {
    /// Builds a request for one alert using these settings.
    #[must_use]
    pub fn request(&self, title: &str, body: &str) -> NotificationRequest {
        NotificationRequest {
            title: title.to_string(),
            body: body.to_string(),
            id: NotificationId::assign(self.id_policy, self.fixed_id),
            channel: self.channel.clone(),
            platform: self.platform.clone(),
        }
    }
}

// ============================================================================
// NotificationRequest
// ============================================================================

/// A single local notification to schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub id: NotificationId,
    pub channel: Option<String>,
    pub platform: PlatformOptions,
}

impl NotificationRequest {
    /// Creates a request with a fixed id and no platform options.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            id: NotificationId::Fixed(DEFAULT_NOTIFICATION_ID),
            channel: None,
            platform: PlatformOptions::default(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: NotificationId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_policy_reuses_id() {
        let settings = NotificationSettings::default();

        let first = settings.request("a", "b");
        let second = settings.request("c", "d");

        assert_eq!(first.id, NotificationId::Fixed(1));
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_unique_policy_generates_fresh_ids() {
        let settings = NotificationSettings {
            id_policy: NotificationIdPolicy::Unique,
            ..NotificationSettings::default()
        };

        let first = settings.request("a", "b");
        let second = settings.request("a", "b");

        assert!(matches!(first.id, NotificationId::Unique(_)));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_request_carries_platform_options_verbatim() {
        let platform = PlatformOptions {
            android: Some(AndroidOptions {
                channel_id: Some("pomodoro".to_string()),
                priority: Some(4),
                visibility: Some(1),
                small_icon: Some("ic_stat_icon_config_sample".to_string()),
                icon_color: Some("#488AFF".to_string()),
            }),
            ios: Some(IosOptions {
                sound: Some("beep.wav".to_string()),
                badge: Some(1),
                foreground: Some(true),
            }),
            extra: BTreeMap::new(),
        };
        let settings = NotificationSettings {
            channel: Some("pomodoro".to_string()),
            platform: platform.clone(),
            ..NotificationSettings::default()
        };

        let request = settings.request("Break Over!", "Ready for another work session?");
        assert_eq!(request.title, "Break Over!");
        assert_eq!(request.channel.as_deref(), Some("pomodoro"));
        assert_eq!(request.platform, platform);
    }

    #[test]
    fn test_settings_deserialize_defaults() {
        let settings: NotificationSettings =
            serde_json::from_str(r#"{"id_policy": "unique"}"#).unwrap();

        assert_eq!(settings.id_policy, NotificationIdPolicy::Unique);
        assert_eq!(settings.fixed_id, DEFAULT_NOTIFICATION_ID);
        assert_eq!(settings.platform, default_platform());
    }

    #[test]
    fn test_default_payload_badges_in_foreground() {
        let request = NotificationSettings::default().request("Work Session Over!", "body");

        let ios = request.platform.ios.as_ref().unwrap();
        assert_eq!(ios.badge, Some(1));
        assert_eq!(ios.foreground, Some(true));
        assert!(request.platform.android.is_none());
        assert_eq!(
            request.platform.extra.get("foo").map(String::as_str),
            Some("bar")
        );
    }

    #[test]
    fn test_builder() {
        let request = NotificationRequest::new("t", "b")
            .with_id(NotificationId::Fixed(7))
            .with_channel("alerts");

        assert_eq!(request.id.to_string(), "7");
        assert_eq!(request.channel.as_deref(), Some("alerts"));
    }
}
