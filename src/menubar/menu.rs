//! Context menu description for the status item.
//!
//! The menu is fixed: `Clear`, a separator, `Quit`. This module describes it
//! independently of tray-icon so the layout can be tested anywhere; the
//! native menu is built from [`MenuConfig`] in `menubar/mod.rs`.

use crate::menubar::event::MenuItemId;

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Which action the item triggers
    pub id: MenuItemId,
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
    /// Keyboard shortcut, in tray-icon accelerator syntax
    pub accelerator: Option<String>,
}

impl MenuItemConfig {
    /// Creates a new enabled menu item without a shortcut.
    pub fn new(id: MenuItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            enabled: true,
            accelerator: None,
        }
    }

    /// Attaches a keyboard shortcut.
    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete context menu configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Resets the clock
    pub clear: MenuItemConfig,
    /// Terminates the process
    pub quit: MenuItemConfig,
}

impl MenuConfig {
    /// Items in display order; a separator goes between them.
    pub fn items(&self) -> [&MenuItemConfig; 2] {
        [&self.clear, &self.quit]
    }
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds the context menu configuration.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self) -> MenuConfig {
        MenuConfig {
            clear: MenuItemConfig::new(MenuItemId::Clear, "Clear"),
            quit: MenuItemConfig::new(MenuItemId::Quit, "Quit").with_accelerator("CmdOrCtrl+Q"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
