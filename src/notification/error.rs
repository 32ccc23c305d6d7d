//! Notification system error types.
//!
//! None of these errors are fatal to the timer. The alert dispatcher logs
//! them and the countdown carries on.

use thiserror::Error;

/// Errors that can occur while delivering a local notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// Notification permission was not granted by the user.
    #[error("notification permission not granted")]
    PermissionDenied,

    /// The platform rejected or failed to deliver the notification.
    #[error("failed to deliver notification: {0}")]
    DeliveryFailed(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "allow notifications for this app in the system settings",
            Self::DeliveryFailed(_) => "check that a notification daemon is running",
        }
    }
}
