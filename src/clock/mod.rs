//! Countdown clock for the Totodoro timer.
//!
//! This module contains:
//! - `Session`: the clock state machine (Idle / Running / Paused)
//! - `driver`: applies directives to a tick source, renders, notifies
//! - `ticker`: tokio-backed tick source
//!
//! The state machine is pure. Every transition returns a [`Directive`]
//! telling the driver which side effect to perform, so the whole table can
//! be tested without timers or OS services.

pub mod driver;
pub mod ticker;

pub use driver::{MockStatusDisplay, MockTickSource, SessionDriver, StatusDisplay, TickSource};
pub use ticker::{IntervalTicker, TickCallback};

use std::fmt;
use std::num::NonZeroU32;

use crate::types::{ClockStatus, DEFAULT_DURATION_SECONDS};

// ============================================================================
// ClockInput
// ============================================================================

/// Inputs that drive the clock state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockInput {
    /// Primary click on the status bar control (start / pause / resume)
    PrimaryActivate,
    /// One period of the tick source elapsed
    Tick,
    /// "Clear" chosen from the context menu
    Clear,
}

impl fmt::Display for ClockInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockInput::PrimaryActivate => write!(f, "primary_activate"),
            ClockInput::Tick => write!(f, "tick"),
            ClockInput::Clear => write!(f, "clear"),
        }
    }
}

// ============================================================================
// Directive
// ============================================================================

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Nothing to do
    #[default]
    None,
    /// Begin delivering ticks
    StartTicking,
    /// Cancel the tick source
    StopTicking,
    /// Countdown reached zero: cancel the tick source and post the alert
    NotifyCompletion,
}

impl Directive {
    /// Returns true if the tick source must be cancelled.
    pub fn stops_ticking(&self) -> bool {
        matches!(self, Directive::StopTicking | Directive::NotifyCompletion)
    }
}

// ============================================================================
// Session
// ============================================================================

/// State of the current countdown.
///
/// Invariants upheld by [`Session::transition`]:
/// - `remaining_seconds == 0` implies `status != Running`
/// - `remaining_seconds` only decreases while `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    status: ClockStatus,
    remaining_seconds: u32,
    default_duration: NonZeroU32,
}

/// Result of a pure transition: the next session and its side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Session after the input was applied
    pub session: Session,
    /// Side effect the driver must perform
    pub directive: Directive,
}

const DEFAULT_DURATION: NonZeroU32 = match NonZeroU32::new(DEFAULT_DURATION_SECONDS) {
    Some(duration) => duration,
    None => panic!("default session duration must be positive"),
};

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Session {
    /// Creates an idle session with nothing on the clock.
    ///
    /// The duration is non-zero so a started session always has time left.
    pub fn new(default_duration: NonZeroU32) -> Self {
        Self {
            status: ClockStatus::Idle,
            remaining_seconds: 0,
            default_duration,
        }
    }

    pub fn status(&self) -> ClockStatus {
        self.status
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn default_duration_seconds(&self) -> u32 {
        self.default_duration.get()
    }

    /// Computes the session that results from `input`, without mutating `self`.
    pub fn transition(&self, input: ClockInput) -> Transition {
        let mut next = *self;

        let directive = match (self.status, input) {
            (ClockStatus::Idle, ClockInput::PrimaryActivate) => {
                next.status = ClockStatus::Running;
                next.remaining_seconds = self.default_duration.get();
                Directive::StartTicking
            }
            (ClockStatus::Running, ClockInput::PrimaryActivate) => {
                next.status = ClockStatus::Paused;
                Directive::StopTicking
            }
            (ClockStatus::Paused, ClockInput::PrimaryActivate) => {
                next.status = ClockStatus::Running;
                Directive::StartTicking
            }
            (ClockStatus::Running, ClockInput::Tick) => {
                // Decrement first, then check: 1 -> 0 completes on this tick.
                next.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                if next.remaining_seconds == 0 {
                    next.status = ClockStatus::Idle;
                    Directive::NotifyCompletion
                } else {
                    Directive::None
                }
            }
            (ClockStatus::Idle | ClockStatus::Paused, ClockInput::Tick) => Directive::None,
            (_, ClockInput::Clear) => {
                next.status = ClockStatus::Idle;
                next.remaining_seconds = 0;
                Directive::StopTicking
            }
        };

        Transition {
            session: next,
            directive,
        }
    }

    /// Applies `input` in place and returns the resulting directive.
    pub fn apply(&mut self, input: ClockInput) -> Directive {
        let Transition { session, directive } = self.transition(input);
        *self = session;
        directive
    }
}

// ============================================================================
// Tests
// ============================================================================
