//! Totodoro - a menu bar focus timer
//!
//! Left click the clock to start a 20 minute session, click again to pause
//! or resume. Right click for Clear and Quit. A notification is posted when
//! the countdown reaches zero.

use anyhow::{Context, Result};

use totodoro::ClockConfig;

/// Main entry point
fn main() {
    // Initialize logging
    init_tracing();

    if let Err(e) = run() {
        eprintln!("totodoro: {e:#}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Validates the built-in configuration and starts the menu bar app.
fn run() -> Result<()> {
    let config = ClockConfig::default();
    config.validate().context("invalid clock configuration")?;

    start(config)
}

#[cfg(target_os = "macos")]
fn start(config: ClockConfig) -> Result<()> {
    totodoro::app::run(config)
}

#[cfg(not(target_os = "macos"))]
fn start(_config: ClockConfig) -> Result<()> {
    anyhow::bail!("the menu bar app is only supported on macOS")
}

// ============================================================================
// Tests
// ============================================================================
