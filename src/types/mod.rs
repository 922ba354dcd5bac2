//! Core data types for the Totodoro timer.
//!
//! This module defines:
//! - The clock status shown in the menu bar
//! - The compiled-in clock configuration with validation

use std::fmt;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Default session length: 20 minutes.
pub const DEFAULT_DURATION_SECONDS: u32 = 20 * 60;

/// Interval between two ticks of a running session.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Product name used as the notification title and tray tooltip.
pub const PRODUCT_NAME: &str = "Totodoro!";

/// Body of the notification posted when a session completes.
pub const COMPLETION_MESSAGE: &str = "You've finished a cycle of focus";

// ============================================================================
// ClockStatus
// ============================================================================

/// Represents the current status of the countdown clock.
///
/// A freshly created clock is always `Idle`; there is no "unknown" status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClockStatus {
    /// No session in progress
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Session suspended, remaining time preserved
    Paused,
}

impl ClockStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockStatus::Idle => "idle",
            ClockStatus::Running => "running",
            ClockStatus::Paused => "paused",
        }
    }
}

impl fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors reported by [`ClockConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The session length must be at least one second.
    #[error("default session duration must be positive")]
    ZeroDuration,

    /// The tick interval must be non-zero.
    #[error("tick interval must be positive")]
    ZeroTickInterval,
}

// ============================================================================
// ClockConfig
// ============================================================================

/// Configuration for the countdown clock.
///
/// There is no configuration file; the defaults are the product.
/// The builder methods exist so tests can run short sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    /// Length of a new session in seconds
    pub default_duration_seconds: u32,
    /// Period of the tick source
    pub tick_interval: Duration,
    /// Notification title / tooltip
    pub product_name: String,
    /// Notification body on completion
    pub completion_message: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            product_name: PRODUCT_NAME.to_string(),
            completion_message: COMPLETION_MESSAGE.to_string(),
        }
    }
}

impl ClockConfig {
    /// Returns a configuration with the specified session length.
    pub fn with_default_duration_seconds(mut self, seconds: u32) -> Self {
        self.default_duration_seconds = seconds;
        self
    }

    /// Returns a configuration with the specified tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_duration_seconds == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
