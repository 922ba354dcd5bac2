//! Title text for the menu bar clock.
//!
//! This module handles:
//! - Formatting a second count as zero-padded `MM:SS`
//! - Producing a label whose glyphs all share one advance width, so the
//!   status item does not jitter as digits change
//!
//! The text generation logic is platform-independent and fully testable.

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// First code point of MATHEMATICAL MONOSPACE DIGIT ZERO .. NINE.
const MONOSPACE_DIGIT_ZERO: u32 = 0x1D7F6;

// ============================================================================
// Formatting
// ============================================================================

/// Formats a duration as `MM:SS`.
///
/// Both fields are padded to at least two digits. Durations of 100 minutes
/// or more simply grow the minute field.
///
/// # Examples
///
/// ```
/// use totodoro::menubar::title::format_duration;
///
/// assert_eq!(format_duration(0), "00:00");
/// assert_eq!(format_duration(1200), "20:00");
/// assert_eq!(format_duration(6000), "100:00");
/// ```
pub fn format_duration(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds - minutes * 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Formats a duration as a monospace status bar label.
pub fn format_label(total_seconds: u32) -> ClockLabel {
    ClockLabel {
        text: format_duration(total_seconds),
    }
}

// ============================================================================
// ClockLabel
// ============================================================================

/// A `MM:SS` label that must be rendered in a fixed-width face.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClockLabel {
    text: String,
}

impl ClockLabel {
    /// The plain `MM:SS` text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The label with every ASCII digit replaced by its monospace form.
    ///
    /// Status bar titles are plain strings, so the fixed-width style is
    /// carried in the characters themselves.
    pub fn monospace_title(&self) -> String {
        self.text.chars().map(to_monospace).collect()
    }
}

impl fmt::Display for ClockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn to_monospace(c: char) -> char {
    match c.to_digit(10) {
        Some(digit) => char::from_u32(MONOSPACE_DIGIT_ZERO + digit).unwrap_or(c),
        None => c,
    }
}

// ============================================================================
// Tests
// ============================================================================
