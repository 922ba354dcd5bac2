//! Tokio-backed tick source.
//!
//! Each `start` spawns one task on the given runtime that calls `on_tick`
//! once per period with the epoch it was started under. `stop` aborts the
//! task. A tick already queued in the host's event loop when `stop` ran
//! carries an old epoch and is rejected by [`IntervalTicker::accepts`].

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::clock::driver::TickSource;

/// Callback invoked from the runtime with the epoch of the tick.
pub type TickCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Repeating tick source built on `tokio::time::interval`.
pub struct IntervalTicker {
    runtime: Handle,
    period: Duration,
    on_tick: TickCallback,
    task: Option<JoinHandle<()>>,
    epoch: u64,
}

impl IntervalTicker {
    /// Creates a stopped ticker.
    pub fn new<F>(runtime: Handle, period: Duration, on_tick: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        Self {
            runtime,
            period,
            on_tick: Arc::new(on_tick),
            task: None,
            epoch: 0,
        }
    }

    /// Epoch of the most recent `start`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns true if a tick reported with `epoch` belongs to the active run.
    pub fn accepts(&self, epoch: u64) -> bool {
        self.task.is_some() && epoch == self.epoch
    }
}

impl TickSource for IntervalTicker {
    fn start(&mut self) {
        if self.task.is_some() {
            tracing::warn!(epoch = self.epoch, "tick source already running");
            return;
        }

        self.epoch += 1;
        let epoch = self.epoch;
        let period = self.period;
        let on_tick = Arc::clone(&self.on_tick);

        self.task = Some(self.runtime.spawn(async move {
            // First tick one full period after start, not immediately.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                on_tick(epoch);
            }
        }));

        tracing::trace!(epoch, "tick source started");
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::trace!(epoch = self.epoch, "tick source stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for IntervalTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalTicker")
            .field("period", &self.period)
            .field("epoch", &self.epoch)
            .field("active", &self.task.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
