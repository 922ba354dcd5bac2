//! Event handling for menu bar interactions.
//!
//! This module handles:
//! - Routing clicks on the status item (primary / secondary)
//! - Mapping context menu clicks to actions
//!
//! The event types and routing are platform-independent.
//! Translating raw tray-icon events into these types is done in `app.rs`.

use std::fmt;

use crate::clock::ClockInput;

// ============================================================================
// PointerButton
// ============================================================================

/// Button released over the status item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left click
    Primary,
    /// Right click
    Secondary,
    /// Any other button
    Other,
}

// ============================================================================
// StatusBarAction
// ============================================================================

/// What a click on the status item should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarAction {
    /// Feed an input to the clock
    Clock(ClockInput),
    /// Present the context menu (bypasses the clock)
    ShowMenu,
    /// Nothing to do
    Ignore,
}

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Reset the clock to idle
    Clear,
    /// Terminate the process
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Clear => write!(f, "clear"),
            MenuAction::Quit => write!(f, "quit"),
        }
    }
}

// ============================================================================
// MenuItemId
// ============================================================================

/// Identifiers for context menu items.
///
/// On macOS these are resolved from tray-icon menu ids by
/// `TrayStatusItem::item_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    Clear,
    Quit,
    /// Unknown or unhandled menu item
    Unknown,
}

impl MenuItemId {
    /// Converts a menu item ID to the corresponding action.
    pub fn to_action(&self) -> Option<MenuAction> {
        match self {
            MenuItemId::Clear => Some(MenuAction::Clear),
            MenuItemId::Quit => Some(MenuAction::Quit),
            MenuItemId::Unknown => None,
        }
    }
}

// ============================================================================
// EventHandler
// ============================================================================

/// Turns raw status bar input into actions.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Routes a click on the status item.
    ///
    /// Primary clicks drive the clock; secondary clicks open the menu.
    pub fn handle_click(&self, button: PointerButton) -> StatusBarAction {
        match button {
            PointerButton::Primary => StatusBarAction::Clock(ClockInput::PrimaryActivate),
            PointerButton::Secondary => StatusBarAction::ShowMenu,
            PointerButton::Other => {
                tracing::trace!("ignoring click from unhandled button");
                StatusBarAction::Ignore
            }
        }
    }

    /// Processes a menu item click and returns the corresponding action.
    pub fn handle_menu(&self, item_id: MenuItemId) -> Option<MenuAction> {
        let action = item_id.to_action();

        match action {
            Some(ref action) => tracing::info!(action = %action, "menu action received"),
            None => tracing::debug!("ignoring unknown menu item"),
        }

        action
    }
}

// ============================================================================
// Tests
// ============================================================================
