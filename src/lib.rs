//! Totodoro Timer Library
//!
//! A menu bar countdown clock for focus sessions. It includes:
//! - Clock state machine (Idle / Running / Paused) and its session driver
//! - Tokio-backed one-second tick source
//! - Menu bar title formatting, click routing and context menu
//! - Completion notifications (native on macOS)
//! - The macOS application shell (macOS only)

pub mod clock;
pub mod menubar;
pub mod notification;
pub mod types;

// macOS-specific application shell
#[cfg(target_os = "macos")]
pub mod app;

// Re-export commonly used types for convenience
pub use types::{ClockConfig, ClockStatus, ConfigError};

pub use clock::{
    ClockInput, Directive, IntervalTicker, MockStatusDisplay, MockTickSource, Session,
    SessionDriver, StatusDisplay, TickSource, Transition,
};

pub use menubar::{
    format_duration, format_label, ClockLabel, EventHandler, MenuAction, MenuBuilder, MenuConfig,
    MenuItemConfig, MenuItemId, PointerButton, StatusBarAction,
};

pub use notification::{
    CompletionMessage, MockNotificationSink, NotificationError, NotificationSink, Notifier,
};

#[cfg(target_os = "macos")]
pub use notification::UserNotificationSink;
