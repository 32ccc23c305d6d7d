//! Phase completion alerts.
//!
//! The controller turns every [`PhaseCompletion`] into an [`Alert`] and
//! queues it. The [`AlertDispatcher`] drains that queue: it makes sure
//! notification permission is held, schedules the notification, then
//! triggers one haptic pulse. Failures are logged and never reach the
//! controller.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::haptics::{HapticFeedback, HapticSettings};
use crate::notification::{NotificationError, NotificationSettings, Notifier};
use crate::types::PhaseCompletion;

pub const WORK_FINISHED_TITLE: &str = "Work Session Over!";
pub const BREAK_FINISHED_TITLE: &str = "Break Over!";
pub const BREAK_FINISHED_BODY: &str = "Ready for another work session?";

// ============================================================================
// Alert
// ============================================================================

/// Title and body shown when a phase completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

impl Alert {
    /// Builds the alert for a completed phase.
    #[must_use]
    pub fn for_completion(completion: PhaseCompletion) -> Self {
        match completion {
            PhaseCompletion::WorkFinished { break_seconds } => Self {
                title: WORK_FINISHED_TITLE.to_string(),
                body: format!("Time for a {} break", describe_length(break_seconds)),
            },
            PhaseCompletion::BreakFinished => Self {
                title: BREAK_FINISHED_TITLE.to_string(),
                body: BREAK_FINISHED_BODY.to_string(),
            },
        }
    }
}

/// "5-minute" for whole minutes, "90-second" otherwise.
fn describe_length(seconds: u32) -> String {
    if seconds >= 60 && seconds % 60 == 0 {
        format!("{}-minute", seconds / 60)
    } else {
        format!("{seconds}-second")
    }
}

// ============================================================================
// AlertDispatcher
// ============================================================================

/// Delivers queued alerts through a [`Notifier`] and [`HapticFeedback`].
pub struct AlertDispatcher<N, H> {
    notifier: N,
    haptics: H,
    notification: NotificationSettings,
    haptic: HapticSettings,
    alerts: mpsc::UnboundedReceiver<Alert>,
}

impl<N: Notifier, H: HapticFeedback> AlertDispatcher<N, H> {
    pub fn new(
        notifier: N,
        haptics: H,
        notification: NotificationSettings,
        haptic: HapticSettings,
        alerts: mpsc::UnboundedReceiver<Alert>,
    ) -> Self {
        Self {
            notifier,
            haptics,
            notification,
            haptic,
            alerts,
        }
    }

    /// Requests permission up front, then delivers alerts in queue order
    /// until the controller drops its sender.
    pub async fn run(mut self) {
        self.prime_permission().await;

        while let Some(alert) = self.alerts.recv().await {
            let _ = self.deliver(&alert).await;
        }

        debug!("alert queue closed");
    }

    /// Asks for notification permission once at startup.
    pub async fn prime_permission(&self) {
        match self.notifier.request_permission().await {
            Ok(state) if state.is_granted() => debug!("notification permission granted"),
            Ok(state) => warn!(?state, "notification permission not granted"),
            Err(e) => warn!("failed to request notification permission: {}", e),
        }
    }

    /// Delivers one alert: notification first, then the haptic pulse.
    ///
    /// The pulse is triggered whatever the notification outcome. The returned
    /// result only describes the notification and is for diagnostics.
    pub async fn deliver(&self, alert: &Alert) -> Result<(), NotificationError> {
        let result = self.notify(alert).await;
        match &result {
            Ok(()) => info!(title = %alert.title, "notification scheduled"),
            Err(e) if e.is_permission_error() => {
                info!(title = %alert.title, "notification skipped: {} ({})", e, e.suggestion())
            }
            Err(e) => warn!(title = %alert.title, "notification not delivered: {} ({})", e, e.suggestion()),
        }

        self.pulse();
        result
    }

    fn pulse(&self) {
        if !self.haptic.enabled {
            return;
        }
        if !self.haptics.is_available() {
            debug!("haptic output unavailable, skipping pulse");
            return;
        }
        if let Err(e) = self.haptics.vibrate(self.haptic.duration_ms) {
            warn!("haptic pulse failed: {}", e);
        }
    }

    async fn notify(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.ensure_permission().await?;
        let request = self.notification.request(&alert.title, &alert.body);
        self.notifier.schedule(&request).await
    }

    async fn ensure_permission(&self) -> Result<(), NotificationError> {
        if self.notifier.check_permission().await?.is_granted() {
            return Ok(());
        }

        debug!("permission missing, requesting again");
        if self.notifier.request_permission().await?.is_granted() {
            Ok(())
        } else {
            Err(NotificationError::PermissionDenied)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
