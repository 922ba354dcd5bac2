//! Session driver for the Totodoro timer.
//!
//! The driver owns the session, the tick source, the notification adapter
//! and the status display. Every input goes through [`SessionDriver::dispatch`]:
//! - the state machine computes the next session and a directive
//! - the status display is re-rendered when the session changed
//! - the directive starts or cancels the tick source, or posts the alert
//!
//! All of this runs on the UI thread; the driver holds no locks.

use std::num::NonZeroU32;

use crate::clock::{ClockInput, Directive, Session};
use crate::menubar::title::{format_label, ClockLabel};
use crate::notification::{CompletionMessage, NotificationSink, Notifier, PermissionCallback};
use crate::types::{ClockConfig, ClockStatus, ConfigError};

// ============================================================================
// Capabilities
// ============================================================================

/// Periodic tick capability.
///
/// Only one tick source may be active. `stop` must be synchronous and
/// idempotent: once it returns, no further tick is delivered.
pub trait TickSource {
    /// Begins delivering ticks.
    fn start(&mut self);
    /// Cancels delivery. A no-op when nothing is active.
    fn stop(&mut self);
    /// Returns true while ticks are being delivered.
    fn is_active(&self) -> bool;
}

/// Render sink for the status bar title.
pub trait StatusDisplay {
    fn render(&mut self, label: &ClockLabel);
}

// ============================================================================
// SessionDriver
// ============================================================================

/// Drives a [`Session`] with a tick source, a notifier and a display.
pub struct SessionDriver<T, N, D> {
    session: Session,
    ticker: T,
    notifier: Notifier<N>,
    display: D,
}

impl<T, N, D> SessionDriver<T, N, D>
where
    T: TickSource,
    N: NotificationSink,
    D: StatusDisplay,
{
    /// Creates a driver with an idle session.
    ///
    /// Nothing is rendered until [`render`](Self::render) or the first input.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(
        config: &ClockConfig,
        ticker: T,
        sink: N,
        display: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let duration =
            NonZeroU32::new(config.default_duration_seconds).ok_or(ConfigError::ZeroDuration)?;

        Ok(Self {
            session: Session::new(duration),
            ticker,
            notifier: Notifier::new(sink, CompletionMessage::from_config(config)),
            display,
        })
    }

    /// Applies `input` and performs the resulting side effect.
    pub fn dispatch(&mut self, input: ClockInput) -> Directive {
        let before = self.session;
        let directive = self.session.apply(input);

        if self.session != before {
            tracing::debug!(
                input = %input,
                from = %before.status(),
                to = %self.session.status(),
                remaining = self.session.remaining_seconds(),
                "clock transition"
            );
            self.render();
        }

        self.perform(directive);

        directive
    }

    /// Primary click: start, pause or resume.
    pub fn primary_activate(&mut self) -> Directive {
        self.dispatch(ClockInput::PrimaryActivate)
    }

    /// One tick of the tick source.
    pub fn tick(&mut self) -> Directive {
        self.dispatch(ClockInput::Tick)
    }

    /// "Clear" from the context menu.
    pub fn clear(&mut self) -> Directive {
        self.dispatch(ClockInput::Clear)
    }

    fn perform(&mut self, directive: Directive) {
        match directive {
            Directive::StartTicking => {
                // At most one tick source may be active.
                if self.ticker.is_active() {
                    tracing::warn!("tick source already active, start ignored");
                } else {
                    self.ticker.start();
                }
            }
            Directive::NotifyCompletion => {
                tracing::info!("focus session completed");
                self.notifier.notify_completion();
            }
            Directive::None | Directive::StopTicking => {}
        }

        if directive.stops_ticking() {
            self.ticker.stop();
        }
    }

    /// Renders the current remaining time to the status display.
    pub fn render(&mut self) {
        let label = format_label(self.session.remaining_seconds());
        self.display.render(&label);
    }

    /// Asks the notification adapter for permission; see
    /// [`set_notifications_allowed`](Self::set_notifications_allowed).
    pub fn request_notification_permission(&self, on_result: PermissionCallback) {
        self.notifier.request_permission(on_result);
    }

    /// Records the answer to the permission request.
    pub fn set_notifications_allowed(&mut self, allowed: bool) {
        self.notifier.set_allowed(allowed);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> ClockStatus {
        self.session.status()
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn notifier(&self) -> &Notifier<N> {
        &self.notifier
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

impl<T, N, D> std::fmt::Debug for SessionDriver<T, N, D>
where
    T: TickSource,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDriver")
            .field("session", &self.session)
            .field("ticking", &self.ticker.is_active())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Test doubles
// ============================================================================

/// Tick source that only records calls. Ticks are fed by hand.
#[derive(Debug, Default)]
pub struct MockTickSource {
    active: bool,
    starts: usize,
    stops: usize,
}

impl MockTickSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starts(&self) -> usize {
        self.starts
    }

    #[must_use]
    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl TickSource for MockTickSource {
    fn start(&mut self) {
        self.starts += 1;
        self.active = true;
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Display that records every rendered label.
#[derive(Debug, Default)]
pub struct MockStatusDisplay {
    rendered: Vec<ClockLabel>,
}

impl MockStatusDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text of every render, oldest first.
    #[must_use]
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.iter().map(|l| l.text().to_string()).collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.rendered.last().map(ClockLabel::text)
    }
}

impl StatusDisplay for MockStatusDisplay {
    fn render(&mut self, label: &ClockLabel) {
        self.rendered.push(label.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::MockNotificationSink;

    type TestDriver = SessionDriver<MockTickSource, MockNotificationSink, MockStatusDisplay>;

    fn create_driver(duration: u32) -> TestDriver {
        let config = ClockConfig::default().with_default_duration_seconds(duration);
        let mut driver = SessionDriver::new(
            &config,
            MockTickSource::new(),
            MockNotificationSink::granting(),
            MockStatusDisplay::new(),
        )
        .unwrap();
        driver.set_notifications_allowed(true);
        driver
    }

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;
        use std::time::Duration;

        #[test]
        fn test_zero_duration_is_rejected() {
            let config = ClockConfig::default().with_default_duration_seconds(0);
            let result = SessionDriver::new(
                &config,
                MockTickSource::new(),
                MockNotificationSink::granting(),
                MockStatusDisplay::new(),
            );
            assert_eq!(result.unwrap_err(), ConfigError::ZeroDuration);
        }

        #[test]
        fn test_zero_tick_interval_is_rejected() {
            let config = ClockConfig::default().with_tick_interval(Duration::ZERO);
            let result = SessionDriver::new(
                &config,
                MockTickSource::new(),
                MockNotificationSink::granting(),
                MockStatusDisplay::new(),
            );
            assert_eq!(result.unwrap_err(), ConfigError::ZeroTickInterval);
        }

        #[test]
        fn test_one_second_session_never_runs_at_zero() {
            let mut driver = create_driver(1);

            driver.primary_activate();
            assert_eq!(driver.status(), ClockStatus::Running);
            assert_eq!(driver.session().remaining_seconds(), 1);

            driver.tick();
            assert_eq!(driver.status(), ClockStatus::Idle);
            assert!(!driver.ticker().is_active());
        }
    }

    // ------------------------------------------------------------------------
    // Start / Pause / Resume Tests
    // ------------------------------------------------------------------------

    mod activation_tests {
        use super::*;

        #[test]
        fn test_new_driver_is_stopped() {
            let driver = create_driver(1200);
            assert_eq!(driver.status(), ClockStatus::Idle);
            assert!(!driver.ticker().is_active());
            assert!(driver.display().rendered().is_empty());
        }

        #[test]
        fn test_start_renders_full_duration_and_ticks() {
            let mut driver = create_driver(1200);

            assert_eq!(driver.primary_activate(), Directive::StartTicking);
            assert_eq!(driver.status(), ClockStatus::Running);
            assert!(driver.ticker().is_active());
            assert_eq!(driver.display().last(), Some("20:00"));
        }

        #[test]
        fn test_pause_stops_ticking_and_keeps_time() {
            let mut driver = create_driver(1200);
            driver.primary_activate();
            driver.tick();

            assert_eq!(driver.primary_activate(), Directive::StopTicking);
            assert_eq!(driver.status(), ClockStatus::Paused);
            assert_eq!(driver.session().remaining_seconds(), 1199);
            assert!(!driver.ticker().is_active());
        }

        #[test]
        fn test_resume_restarts_ticking() {
            let mut driver = create_driver(1200);
            driver.primary_activate();
            driver.primary_activate();

            assert_eq!(driver.primary_activate(), Directive::StartTicking);
            assert!(driver.ticker().is_active());
            assert_eq!(driver.ticker().starts(), 2);
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_renders_new_time() {
            let mut driver = create_driver(61);
            driver.primary_activate();
            driver.tick();

            assert_eq!(driver.display().rendered(), vec!["01:01", "01:00"]);
        }

        #[test]
        fn test_tick_while_idle_does_nothing() {
            let mut driver = create_driver(10);

            assert_eq!(driver.tick(), Directive::None);
            assert!(driver.display().rendered().is_empty());
            assert_eq!(driver.ticker().starts(), 0);
            assert_eq!(driver.ticker().stops(), 0);
        }

        #[test]
        fn test_tick_while_paused_does_nothing() {
            let mut driver = create_driver(10);
            driver.primary_activate();
            driver.primary_activate();
            let renders = driver.display().rendered().len();

            assert_eq!(driver.tick(), Directive::None);
            assert_eq!(driver.session().remaining_seconds(), 10);
            assert_eq!(driver.display().rendered().len(), renders);
        }
    }

    // ------------------------------------------------------------------------
    // Completion Tests
    // ------------------------------------------------------------------------

    mod completion_tests {
        use super::*;

        #[test]
        fn test_completion_notifies_once_and_stops() {
            let mut driver = create_driver(2);
            driver.primary_activate();
            driver.tick();

            assert_eq!(driver.tick(), Directive::NotifyCompletion);
            assert_eq!(driver.status(), ClockStatus::Idle);
            assert_eq!(driver.session().remaining_seconds(), 0);
            assert!(!driver.ticker().is_active());
            assert_eq!(driver.display().last(), Some("00:00"));
            assert_eq!(driver.notifier().sink().post_count(), 1);

            // A straggling tick neither notifies again nor renders.
            assert_eq!(driver.tick(), Directive::None);
            assert_eq!(driver.notifier().sink().post_count(), 1);
        }

        #[test]
        fn test_completion_without_permission_is_silent() {
            let mut driver = create_driver(1);
            driver.set_notifications_allowed(false);
            driver.primary_activate();

            assert_eq!(driver.tick(), Directive::NotifyCompletion);
            assert_eq!(driver.notifier().sink().post_count(), 0);
            assert!(!driver.ticker().is_active());
        }
    }

    // ------------------------------------------------------------------------
    // Effect Ordering Tests
    // ------------------------------------------------------------------------

    mod ordering_tests {
        use super::*;
        use std::cell::RefCell;
        use std::rc::Rc;

        type Journal = Rc<RefCell<Vec<String>>>;

        struct JournalTicker {
            journal: Journal,
            active: bool,
        }

        impl TickSource for JournalTicker {
            fn start(&mut self) {
                self.journal.borrow_mut().push("start".into());
                self.active = true;
            }

            fn stop(&mut self) {
                self.journal.borrow_mut().push("stop".into());
                self.active = false;
            }

            fn is_active(&self) -> bool {
                self.active
            }
        }

        struct JournalSink(Journal);

        impl NotificationSink for JournalSink {
            fn request_permission(&self, on_result: PermissionCallback) {
                on_result(true);
            }

            fn post(&self, _title: &str, _body: &str) {
                self.0.borrow_mut().push("post".into());
            }
        }

        struct JournalDisplay(Journal);

        impl StatusDisplay for JournalDisplay {
            fn render(&mut self, label: &ClockLabel) {
                self.0.borrow_mut().push(format!("render {label}"));
            }
        }

        fn journaled_driver(
            duration: u32,
        ) -> (SessionDriver<JournalTicker, JournalSink, JournalDisplay>, Journal) {
            let journal = Journal::default();
            let config = ClockConfig::default().with_default_duration_seconds(duration);
            let mut driver = SessionDriver::new(
                &config,
                JournalTicker {
                    journal: Rc::clone(&journal),
                    active: false,
                },
                JournalSink(Rc::clone(&journal)),
                JournalDisplay(Rc::clone(&journal)),
            )
            .unwrap();
            driver.set_notifications_allowed(true);
            (driver, journal)
        }

        #[test]
        fn test_start_renders_before_ticking() {
            let (mut driver, journal) = journaled_driver(90);
            driver.primary_activate();
            assert_eq!(*journal.borrow(), vec!["render 01:30", "start"]);
        }

        #[test]
        fn test_completion_renders_then_posts_then_stops() {
            let (mut driver, journal) = journaled_driver(1);
            driver.primary_activate();
            journal.borrow_mut().clear();

            driver.tick();
            assert_eq!(*journal.borrow(), vec!["render 00:00", "post", "stop"]);
        }
    }

    // ------------------------------------------------------------------------
    // Clear Tests
    // ------------------------------------------------------------------------

    mod clear_tests {
        use super::*;

        #[test]
        fn test_clear_while_running() {
            let mut driver = create_driver(1200);
            driver.primary_activate();

            assert_eq!(driver.clear(), Directive::StopTicking);
            assert_eq!(driver.status(), ClockStatus::Idle);
            assert!(!driver.ticker().is_active());
            assert_eq!(driver.display().last(), Some("00:00"));
        }

        #[test]
        fn test_clear_twice_stops_twice_without_error() {
            let mut driver = create_driver(1200);
            driver.primary_activate();
            driver.clear();
            driver.clear();

            assert_eq!(driver.ticker().stops(), 2);
            assert!(!driver.ticker().is_active());
            assert_eq!(driver.status(), ClockStatus::Idle);
        }

        #[test]
        fn test_clear_when_idle_does_not_render() {
            let mut driver = create_driver(1200);
            driver.clear();
            assert!(driver.display().rendered().is_empty());
        }
    }

    // ------------------------------------------------------------------------
    // Misc Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_shows_current_time() {
        let mut driver = create_driver(1200);
        driver.render();
        assert_eq!(driver.display().last(), Some("00:00"));
    }

    #[test]
    fn test_permission_request_is_forwarded() {
        let driver = create_driver(1200);
        driver.request_notification_permission(Box::new(|_| {}));
        assert_eq!(driver.notifier().sink().permission_requests(), 1);
    }

    #[test]
    fn test_debug() {
        let driver = create_driver(1200);
        let debug = format!("{:?}", driver);
        assert!(debug.contains("SessionDriver"));
        assert!(debug.contains("ticking"));
    }
}
