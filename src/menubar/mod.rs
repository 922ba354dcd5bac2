//! Menu bar UI module for the Totodoro timer.
//!
//! This module provides:
//! - The clock title shown in the menu bar (e.g., "20:00" in monospace digits)
//! - Click routing: left click drives the clock, right click opens the menu
//! - The context menu with `Clear` and `Quit`
//!
//! # Architecture
//!
//! - `title.rs`: Title text generation (platform-independent, fully testable)
//! - `menu.rs`: Menu configuration (platform-independent, fully testable)
//! - `event.rs`: Event types and routing (platform-independent, fully testable)
//! - `mod.rs`: `TrayStatusItem`, the tray-icon backed status item (macOS only)

pub mod event;
pub mod menu;
pub mod title;

pub use event::{EventHandler, MenuAction, MenuItemId, PointerButton, StatusBarAction};
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};
pub use title::{format_duration, format_label, ClockLabel};

#[cfg(target_os = "macos")]
pub use self::tray::TrayStatusItem;

#[cfg(target_os = "macos")]
mod tray {
    use anyhow::Context;
    use tray_icon::menu::accelerator::Accelerator;
    use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
    use tray_icon::{TrayIcon, TrayIconBuilder};

    use super::event::MenuItemId;
    use super::menu::{MenuConfig, MenuItemConfig};
    use super::title::ClockLabel;
    use crate::clock::StatusDisplay;

    // ========================================================================
    // TrayStatusItem
    // ========================================================================

    /// Status item backed by tray-icon.
    ///
    /// Must be created on the main thread once the event loop is running.
    pub struct TrayStatusItem {
        tray_icon: TrayIcon,
        clear_id: Option<MenuId>,
        quit_id: Option<MenuId>,
    }

    impl TrayStatusItem {
        /// Creates the status item showing `initial`.
        ///
        /// The context menu is attached separately by
        /// [`attach_menu`](Self::attach_menu).
        pub fn new(initial: &ClockLabel, tooltip: &str) -> anyhow::Result<Self> {
            let tray_icon = TrayIconBuilder::new()
                .with_title(initial.monospace_title())
                .with_tooltip(tooltip)
                .with_menu_on_left_click(false)
                .build()
                .context("failed to create status bar item")?;

            tracing::info!("status bar item created");

            Ok(Self {
                tray_icon,
                clear_id: None,
                quit_id: None,
            })
        }

        /// Builds the native context menu and attaches it.
        ///
        /// Secondary clicks then open it natively.
        pub fn attach_menu(&mut self, config: &MenuConfig) -> anyhow::Result<()> {
            let menu = Menu::new();

            for (index, item_config) in config.items().into_iter().enumerate() {
                if index > 0 {
                    menu.append(&PredefinedMenuItem::separator())
                        .context("failed to add separator")?;
                }

                let item = native_item(item_config)?;
                menu.append(&item)
                    .with_context(|| format!("failed to add {} item", item_config.text))?;

                let id = Some(item.id().clone());
                match item_config.id {
                    MenuItemId::Clear => self.clear_id = id,
                    MenuItemId::Quit => self.quit_id = id,
                    MenuItemId::Unknown => {}
                }
            }

            self.tray_icon.set_menu(Some(Box::new(menu)));

            Ok(())
        }

        /// Resolves a tray-icon menu id to one of our items.
        pub fn item_id(&self, id: &MenuId) -> MenuItemId {
            if self.clear_id.as_ref() == Some(id) {
                MenuItemId::Clear
            } else if self.quit_id.as_ref() == Some(id) {
                MenuItemId::Quit
            } else {
                MenuItemId::Unknown
            }
        }
    }

    impl StatusDisplay for TrayStatusItem {
        fn render(&mut self, label: &ClockLabel) {
            tracing::trace!(title = %label, "menu bar title updated");
            self.tray_icon.set_title(Some(label.monospace_title()));
        }
    }

    impl std::fmt::Debug for TrayStatusItem {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TrayStatusItem")
                .field("menu_attached", &self.clear_id.is_some())
                .finish_non_exhaustive()
        }
    }

    fn native_item(config: &MenuItemConfig) -> anyhow::Result<MenuItem> {
        let accelerator = config
            .accelerator
            .as_deref()
            .map(str::parse::<Accelerator>)
            .transpose()
            .with_context(|| format!("invalid shortcut for {}", config.text))?;

        Ok(MenuItem::new(&config.text, config.enabled, accelerator))
    }
}
