//! macOS application shell.
//!
//! Hosts the status item on a tao event loop running on the main thread.
//! Everything that touches the session happens in the loop's handler:
//! - tray clicks and menu clicks arrive as [`AppEvent::Tray`] / [`AppEvent::Menu`]
//! - ticks from the tokio runtime arrive as [`AppEvent::Tick`]
//! - the permission answer arrives as [`AppEvent::PermissionResolved`]
//!
//! Startup order: status item, context menu, notification permission.

use anyhow::Context;
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::platform::macos::{ActivationPolicy, EventLoopExtMacOS};
use tokio::runtime::Handle;
use tray_icon::menu::MenuEvent;
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent};

use crate::clock::{IntervalTicker, SessionDriver};
use crate::menubar::{
    format_label, EventHandler, MenuAction, MenuBuilder, PointerButton, StatusBarAction,
    TrayStatusItem,
};
use crate::notification::UserNotificationSink;
use crate::types::ClockConfig;

// ============================================================================
// AppEvent
// ============================================================================

/// Events delivered to the main-thread event loop.
#[derive(Debug)]
pub enum AppEvent {
    Tray(TrayIconEvent),
    Menu(MenuEvent),
    /// One period elapsed for the tick source started under `epoch`
    Tick { epoch: u64 },
    PermissionResolved(bool),
}

type Driver = SessionDriver<IntervalTicker, UserNotificationSink, TrayStatusItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

// ============================================================================
// App
// ============================================================================

struct App {
    driver: Driver,
    handler: EventHandler,
}

impl App {
    fn start(
        config: &ClockConfig,
        runtime: Handle,
        proxy: EventLoopProxy<AppEvent>,
    ) -> anyhow::Result<Self> {
        let mut status_item = TrayStatusItem::new(&format_label(0), &config.product_name)?;
        status_item.attach_menu(&MenuBuilder::new().build())?;

        let tick_proxy = proxy.clone();
        let ticker = IntervalTicker::new(runtime, config.tick_interval, move |epoch| {
            if tick_proxy.send_event(AppEvent::Tick { epoch }).is_err() {
                tracing::trace!(epoch, "event loop closed, tick dropped");
            }
        });

        let mut driver =
            SessionDriver::new(config, ticker, UserNotificationSink::new(), status_item)
                .context("invalid clock configuration")?;
        driver.render();

        driver.request_notification_permission(Box::new(move |granted| {
            if proxy.send_event(AppEvent::PermissionResolved(granted)).is_err() {
                tracing::trace!("event loop closed, permission answer dropped");
            }
        }));

        Ok(Self {
            driver,
            handler: EventHandler::new(),
        })
    }

    fn handle(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Tray(event) => {
                let Some(button) = pointer_button(&event) else {
                    return Flow::Continue;
                };
                match self.handler.handle_click(button) {
                    StatusBarAction::Clock(input) => {
                        self.driver.dispatch(input);
                    }
                    // tray-icon opens the attached menu on right click.
                    StatusBarAction::ShowMenu => tracing::trace!("context menu opened"),
                    StatusBarAction::Ignore => {}
                }
            }
            AppEvent::Menu(event) => {
                let item = self.driver.display().item_id(&event.id);
                match self.handler.handle_menu(item) {
                    Some(MenuAction::Clear) => {
                        self.driver.clear();
                    }
                    Some(MenuAction::Quit) => return Flow::Quit,
                    None => {}
                }
            }
            AppEvent::Tick { epoch } => {
                if self.driver.ticker().accepts(epoch) {
                    self.driver.tick();
                } else {
                    tracing::trace!(
                        epoch,
                        current = self.driver.ticker().epoch(),
                        "stale tick dropped"
                    );
                }
            }
            AppEvent::PermissionResolved(granted) => {
                tracing::info!(granted, "notification permission resolved");
                self.driver.set_notifications_allowed(granted);
            }
        }
        Flow::Continue
    }
}

/// Maps a tray event to the button that was released, if any.
fn pointer_button(event: &TrayIconEvent) -> Option<PointerButton> {
    match event {
        TrayIconEvent::Click {
            button,
            button_state: MouseButtonState::Up,
            ..
        } => Some(match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }),
        _ => None,
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Runs the menu bar app until the user chooses Quit.
///
/// Must be called from the main thread. Never returns on success.
pub fn run(config: ClockConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("totodoro-ticker")
        .enable_time()
        .build()
        .context("failed to start tick runtime")?;

    let mut event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    event_loop.set_activation_policy(ActivationPolicy::Accessory);
    let proxy = event_loop.create_proxy();

    let tray_proxy = proxy.clone();
    TrayIconEvent::set_event_handler(Some(move |event| {
        if tray_proxy.send_event(AppEvent::Tray(event)).is_err() {
            tracing::trace!("event loop closed, tray event dropped");
        }
    }));

    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event| {
        if menu_proxy.send_event(AppEvent::Menu(event)).is_err() {
            tracing::trace!("event loop closed, menu event dropped");
        }
    }));

    let mut app: Option<App> = None;

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                match App::start(&config, runtime.handle().clone(), proxy.clone()) {
                    Ok(started) => {
                        tracing::info!(
                            duration_seconds = config.default_duration_seconds,
                            "totodoro started"
                        );
                        app = Some(started);
                    }
                    Err(e) => {
                        tracing::error!("startup failed: {e:#}");
                        *control_flow = ControlFlow::ExitWithCode(1);
                    }
                }
            }
            Event::UserEvent(event) => {
                if let Some(app) = app.as_mut() {
                    if app.handle(event) == Flow::Quit {
                        tracing::info!("quit requested");
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            _ => {}
        }
    })
}
