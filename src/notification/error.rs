//! Notification system error types.
//!
//! None of these errors reach the clock. They are logged where they occur
//! and the completion alert is dropped.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to request notification authorization from the system.
    #[error("failed to request notification authorization: {0}")]
    AuthorizationFailed(String),

    /// Failed to post a notification.
    #[error("failed to post notification: {0}")]
    SendFailed(String),

    /// Notification permission was denied by the user.
    #[error("notification permission denied")]
    PermissionDenied,
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::AuthorizationFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::AuthorizationFailed(_) | Self::PermissionDenied => {
                "allow notifications for Totodoro in System Settings > Notifications"
            }
            Self::SendFailed(_) => "check that the app bundle is code-signed",
        }
    }
}
