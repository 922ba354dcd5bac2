//! Completion notifications.
//!
//! This module provides:
//!
//! - `NotificationSink`: the capability to ask for permission and post an alert
//! - `Notifier`: caches the permission answer and posts the completion alert
//! - `UserNotificationSink`: native macOS implementation (`objc2-user-notifications`)
//! - `MockNotificationSink`: recording implementation for tests
//!
//! Posting is fire-and-forget. A refused permission or a failed post never
//! reaches the clock; the app simply stays silent.
//!
//! # Requirements (macOS)
//!
//! - macOS 10.14+
//! - The binary must run from a signed app bundle for the notification
//!   center to accept requests

#[cfg(target_os = "macos")]
mod center;
#[cfg(target_os = "macos")]
mod content;
pub mod error;
#[cfg(target_os = "macos")]
mod request;

use std::cell::{Cell, RefCell};

pub use self::error::NotificationError;

#[cfg(target_os = "macos")]
use self::center::NotificationCenter;
#[cfg(target_os = "macos")]
use self::content::NotificationContentBuilder;
#[cfg(target_os = "macos")]
use self::request::create_notification_request;

use crate::types::ClockConfig;

/// Callback receiving the answer to a permission request.
pub type PermissionCallback = Box<dyn FnOnce(bool) + Send + 'static>;

// ============================================================================
// NotificationSink
// ============================================================================

/// OS notification capability.
pub trait NotificationSink {
    /// Asks the user for permission to post alerts.
    ///
    /// The answer may arrive later, on any thread. Failures are reported as
    /// `false`.
    fn request_permission(&self, on_result: PermissionCallback);

    /// Posts an alert. Errors are logged and dropped.
    fn post(&self, title: &str, body: &str);
}

// ============================================================================
// CompletionMessage
// ============================================================================

/// Fixed content of the completion alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMessage {
    pub title: String,
    pub body: String,
}

impl CompletionMessage {
    /// Builds the message from the clock configuration.
    pub fn from_config(config: &ClockConfig) -> Self {
        Self {
            title: config.product_name.clone(),
            body: config.completion_message.clone(),
        }
    }
}

impl Default for CompletionMessage {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Notification adapter used by the session driver.
///
/// Permission starts out refused and is updated once the OS answers.
#[derive(Debug)]
pub struct Notifier<N> {
    sink: N,
    message: CompletionMessage,
    allowed: bool,
}

impl<N: NotificationSink> Notifier<N> {
    pub fn new(sink: N, message: CompletionMessage) -> Self {
        Self {
            sink,
            message,
            allowed: false,
        }
    }

    /// Forwards a permission request to the sink.
    pub fn request_permission(&self, on_result: PermissionCallback) {
        self.sink.request_permission(on_result);
    }

    /// Records the answer to the permission request.
    pub fn set_allowed(&mut self, allowed: bool) {
        if !allowed {
            let e = NotificationError::PermissionDenied;
            tracing::warn!(suggestion = e.suggestion(), "{e}, completion alerts are disabled");
        }
        self.allowed = allowed;
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Posts the completion alert if permission was granted.
    pub fn notify_completion(&self) {
        if !self.allowed {
            tracing::debug!("completion alert skipped: notifications not allowed");
            return;
        }
        self.sink.post(&self.message.title, &self.message.body);
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }
}

// ============================================================================
// UserNotificationSink (macOS)
// ============================================================================

/// `UNUserNotificationCenter`-backed sink.
#[cfg(target_os = "macos")]
#[derive(Debug, Default)]
pub struct UserNotificationSink;

#[cfg(target_os = "macos")]
impl UserNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "macos")]
impl NotificationSink for UserNotificationSink {
    fn request_permission(&self, on_result: PermissionCallback) {
        NotificationCenter::request_authorization(move |result| {
            let granted = match result {
                Ok(granted) => granted,
                Err(e) if e.is_permission_error() => {
                    tracing::warn!(
                        error = %e,
                        suggestion = e.suggestion(),
                        "notification authorization failed"
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!(error = %e, "notification authorization failed");
                    false
                }
            };
            on_result(granted);
        });
    }

    fn post(&self, title: &str, body: &str) {
        let content = NotificationContentBuilder::new().title(title).body(body).build();
        let request = create_notification_request(&content);

        NotificationCenter::add_notification_request(&request, |result| {
            if let Err(e) = result {
                tracing::warn!(error = %e, "failed to post completion notification");
            }
        });
    }
}

// ============================================================================
// MockNotificationSink
// ============================================================================

/// Recording sink for tests.
///
/// Permission requests are answered immediately with the configured value.
#[derive(Debug)]
pub struct MockNotificationSink {
    grant: bool,
    permission_requests: Cell<usize>,
    posted: RefCell<Vec<(String, String)>>,
}

impl Default for MockNotificationSink {
    fn default() -> Self {
        Self::granting()
    }
}

impl MockNotificationSink {
    /// A sink whose permission request is granted.
    #[must_use]
    pub fn granting() -> Self {
        Self::with_grant(true)
    }

    /// A sink whose permission request is refused.
    #[must_use]
    pub fn denying() -> Self {
        Self::with_grant(false)
    }

    fn with_grant(grant: bool) -> Self {
        Self {
            grant,
            permission_requests: Cell::new(0),
            posted: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.get()
    }

    /// Every `(title, body)` pair posted so far.
    #[must_use]
    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.borrow().clone()
    }

    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posted.borrow().len()
    }
}

impl NotificationSink for MockNotificationSink {
    fn request_permission(&self, on_result: PermissionCallback) {
        self.permission_requests.set(self.permission_requests.get() + 1);
        on_result(self.grant);
    }

    fn post(&self, title: &str, body: &str) {
        self.posted
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
    }
}
