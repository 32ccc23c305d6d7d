//! Desktop notification delivery through `notify-rust`.

use notify_rust::{Notification, Timeout};
use tracing::debug;

use super::error::NotificationError;
use super::request::{NotificationId, NotificationRequest};
use super::{Notifier, PermissionState};

/// Application name shown by the desktop notification service.
pub const DEFAULT_APP_NAME: &str = "Pomodoro Timer";

/// Delivers notifications through the desktop notification service.
///
/// Desktop sessions have no per-app permission prompt, so permission is
/// always reported as granted. Delivery runs on a blocking worker thread
/// because the underlying call may wait on the session bus.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

/// Builds the desktop notification for a request.
///
/// A fixed id is forwarded where the notification service supports
/// replacing an earlier notification; unique ids are left to the service.
fn build_notification(app_name: &str, request: &NotificationRequest) -> Notification {
    let mut notification = Notification::new();
    notification
        .appname(app_name)
        .summary(&request.title)
        .body(&request.body)
        .timeout(Timeout::Default);

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let NotificationId::Fixed(id) = request.id {
            match u32::try_from(id) {
                Ok(id) => {
                    notification.id(id);
                }
                Err(_) => debug!(id, "negative notification id, not forwarded"),
            }
        }
    }

    notification
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

impl Notifier for DesktopNotifier {
    async fn request_permission(&self) -> Result<PermissionState, NotificationError> {
        Ok(PermissionState::Granted)
    }

    async fn check_permission(&self) -> Result<PermissionState, NotificationError> {
        Ok(PermissionState::Granted)
    }

    async fn schedule(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        let notification = build_notification(&self.app_name, request);
        debug!(id = %request.id, title = %request.title, "showing desktop notification");

        tokio::task::spawn_blocking(move || {
            notification.show().map(|_| ()).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))?
        .map_err(NotificationError::DeliveryFailed)
    }
}
