//! UNUserNotificationCenter wrapper.
//!
//! Completion handlers run on a queue owned by the notification center, so
//! results are handed to caller-supplied callbacks instead of awaited.

use std::cell::RefCell;

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_foundation::NSError;
use objc2_user_notifications::{
    UNAuthorizationOptions, UNNotificationRequest, UNUserNotificationCenter,
};

use super::error::NotificationError;

pub struct NotificationCenter;

impl NotificationCenter {
    #[must_use]
    pub fn current() -> Retained<UNUserNotificationCenter> {
        UNUserNotificationCenter::currentNotificationCenter()
    }

    /// Requests alert, sound and badge authorization.
    pub fn request_authorization<F>(on_result: F)
    where
        F: FnOnce(Result<bool, NotificationError>) + 'static,
    {
        let options = UNAuthorizationOptions::Alert
            | UNAuthorizationOptions::Sound
            | UNAuthorizationOptions::Badge;

        let cb = RefCell::new(Some(on_result));
        let block = RcBlock::new(move |granted: Bool, error: *mut NSError| {
            if let Some(callback) = cb.borrow_mut().take() {
                let result = match unsafe { error.as_ref() } {
                    Some(err) => Err(NotificationError::AuthorizationFailed(
                        err.localizedDescription().to_string(),
                    )),
                    None => Ok(granted.as_bool()),
                };
                callback(result);
            }
        });

        Self::current().requestAuthorizationWithOptions_completionHandler(options, &block);
    }

    /// Schedules `request` for immediate delivery.
    pub fn add_notification_request<F>(request: &UNNotificationRequest, on_complete: F)
    where
        F: FnOnce(Result<(), NotificationError>) + 'static,
    {
        let cb = RefCell::new(Some(on_complete));
        let block = RcBlock::new(move |error: *mut NSError| {
            if let Some(callback) = cb.borrow_mut().take() {
                let result = match unsafe { error.as_ref() } {
                    Some(err) => Err(NotificationError::SendFailed(
                        err.localizedDescription().to_string(),
                    )),
                    None => Ok(()),
                };
                callback(result);
            }
        });

        Self::current().addNotificationRequest_withCompletionHandler(request, Some(&block));
    }
}
