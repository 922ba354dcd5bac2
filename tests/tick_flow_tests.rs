//! Integration tests for the real tick source driving a session.
//!
//! Time is virtual (`start_paused`), so a 5 second session runs instantly.
//! Ticks travel through a channel the way they travel through the event loop
//! in the app, and are filtered by epoch before reaching the driver.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::Instant;

use totodoro::{
    ClockConfig, ClockStatus, IntervalTicker, MockNotificationSink, MockStatusDisplay,
    SessionDriver, TickSource,
};

type TickDriver = SessionDriver<IntervalTicker, MockNotificationSink, MockStatusDisplay>;

fn create_driver(duration: u32) -> (TickDriver, mpsc::UnboundedReceiver<u64>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let config = ClockConfig::default().with_default_duration_seconds(duration);
    let ticker = IntervalTicker::new(Handle::current(), config.tick_interval, move |epoch| {
        let _ = tx.send(epoch);
    });
    let mut driver = SessionDriver::new(
        &config,
        ticker,
        MockNotificationSink::granting(),
        MockStatusDisplay::new(),
    )
    .expect("valid clock configuration");
    driver.set_notifications_allowed(true);
    (driver, rx)
}

/// Delivers ticks until the tick source stops.
async fn pump(driver: &mut TickDriver, rx: &mut mpsc::UnboundedReceiver<u64>) {
    while driver.ticker().is_active() {
        let Some(epoch) = rx.recv().await else { break };
        if driver.ticker().accepts(epoch) {
            driver.tick();
        }
    }
}

#[tokio::test(start_paused = true)]
async fn session_completes_after_its_duration() {
    let (mut driver, mut rx) = create_driver(5);
    let started = Instant::now();

    driver.primary_activate();
    pump(&mut driver, &mut rx).await;

    assert!(started.elapsed() >= Duration::from_secs(5));
    assert!(started.elapsed() < Duration::from_secs(6));
    assert_eq!(driver.status(), ClockStatus::Idle);
    assert_eq!(driver.session().remaining_seconds(), 0);
    assert_eq!(driver.notifier().sink().post_count(), 1);
    assert_eq!(
        driver.display().rendered(),
        vec!["00:05", "00:04", "00:03", "00:02", "00:01", "00:00"]
    );
}

#[tokio::test(start_paused = true)]
async fn pause_holds_time_while_clock_advances() {
    let (mut driver, mut rx) = create_driver(5);

    driver.primary_activate();
    let epoch = rx.recv().await.unwrap();
    assert!(driver.ticker().accepts(epoch));
    driver.tick();
    driver.primary_activate(); // pause

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(driver.status(), ClockStatus::Paused);
    assert_eq!(driver.session().remaining_seconds(), 4);
    assert!(rx.try_recv().is_err());

    driver.primary_activate(); // resume
    pump(&mut driver, &mut rx).await;
    assert_eq!(driver.notifier().sink().post_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_tick_after_resume_is_rejected() {
    let (mut driver, mut rx) = create_driver(10);

    driver.primary_activate();
    let first_epoch = rx.recv().await.unwrap();

    // Pause before handling the queued tick, then resume.
    driver.primary_activate();
    driver.primary_activate();

    assert!(!driver.ticker().accepts(first_epoch));
    assert_eq!(driver.session().remaining_seconds(), 10);
}

#[tokio::test(start_paused = true)]
async fn clear_stops_delivery() {
    let (mut driver, mut rx) = create_driver(60);

    driver.primary_activate();
    rx.recv().await.unwrap();
    driver.clear();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
    assert!(!driver.ticker().is_active());
    assert_eq!(driver.display().last(), Some("00:00"));
}
