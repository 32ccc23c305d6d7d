//! Local notification integration.
//!
//! The timer talks to the platform through the [`Notifier`] trait:
//!
//! - `check_permission` / `request_permission` query and prompt for the
//!   notification permission
//! - `schedule` hands a [`NotificationRequest`] to the platform
//!
//! Two implementations ship with the crate: [`DesktopNotifier`] for real
//! delivery and [`MockNotifier`] for tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use pomodoro_timer::notification::{DesktopNotifier, NotificationRequest, Notifier};
//!
//! # async fn demo() -> Result<(), pomodoro_timer::notification::NotificationError> {
//! let notifier = DesktopNotifier::default();
//! if notifier.check_permission().await?.is_granted() {
//!     let request = NotificationRequest::new("Break Over!", "Ready for another work session?");
//!     notifier.schedule(&request).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod desktop;
pub mod error;
mod request;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

pub use self::desktop::{DesktopNotifier, DEFAULT_APP_NAME};
pub use self::error::NotificationError;
pub use self::request::{
    AndroidOptions, IosOptions, NotificationId, NotificationIdPolicy, NotificationRequest,
    NotificationSettings, PlatformOptions, DEFAULT_NOTIFICATION_ID,
};

/// Notification permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Prompt,
}

impl PermissionState {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Schedules local notifications.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Asks the user for permission to show notifications.
    async fn request_permission(&self) -> Result<PermissionState, NotificationError>;

    /// Returns the current permission state without prompting.
    async fn check_permission(&self) -> Result<PermissionState, NotificationError>;

    /// Schedules a notification for immediate display.
    async fn schedule(&self, request: &NotificationRequest) -> Result<(), NotificationError>;
}

impl<T: Notifier> Notifier for Arc<T> {
    async fn request_permission(&self) -> Result<PermissionState, NotificationError> {
        (**self).request_permission().await
    }

    async fn check_permission(&self) -> Result<PermissionState, NotificationError> {
        (**self).check_permission().await
    }

    async fn schedule(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        (**self).schedule(request).await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock notifier for testing.
#[derive(Debug)]
pub struct MockNotifier {
    scheduled: Mutex<Vec<NotificationRequest>>,
    permission: Mutex<PermissionState>,
    grant_on_request: AtomicBool,
    should_fail: AtomicBool,
    permission_requests: AtomicUsize,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    /// Creates a mock that already holds permission.
    #[must_use]
    pub fn new() -> Self {
        Self::with_permission(PermissionState::Granted)
    }

    /// Creates a mock with the given permission state. Requesting permission
    /// grants it unless [`MockNotifier::set_grant_on_request`] says otherwise.
    #[must_use]
    pub fn with_permission(permission: PermissionState) -> Self {
        Self {
            scheduled: Mutex::new(Vec::new()),
            permission: Mutex::new(permission),
            grant_on_request: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
            permission_requests: AtomicUsize::new(0),
        }
    }

    pub fn set_grant_on_request(&self, grant: bool) {
        self.grant_on_request.store(grant, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn scheduled(&self) -> Vec<NotificationRequest> {
        lock(&self.scheduled).clone()
    }

    #[must_use]
    pub fn scheduled_titles(&self) -> Vec<String> {
        lock(&self.scheduled)
            .iter()
            .map(|request| request.title.clone())
            .collect()
    }

    #[must_use]
    pub fn schedule_count(&self) -> usize {
        lock(&self.scheduled).len()
    }

    #[must_use]
    pub fn permission_request_count(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

impl Notifier for MockNotifier {
    async fn request_permission(&self) -> Result<PermissionState, NotificationError> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        let mut permission = lock(&self.permission);
        *permission = if self.grant_on_request.load(Ordering::SeqCst) {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        Ok(*permission)
    }

    async fn check_permission(&self) -> Result<PermissionState, NotificationError> {
        Ok(*lock(&self.permission))
    }

    async fn schedule(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::DeliveryFailed("Mock failure".to_string()));
        }
        lock(&self.scheduled).push(request.clone());
        Ok(())
    }
}
