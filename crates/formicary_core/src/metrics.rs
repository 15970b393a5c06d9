//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and counters for monitoring a running colony.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Per-tick counts produced by [`crate::Colony::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub markers_deposited: usize,
    pub markers_evicted: usize,
    pub food_collected: usize,
    pub food_delivered: usize,
    pub food_removed: usize,
}

/// Totals accumulated by [`Metrics`], in a serialisable form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSummary {
    pub ticks: u64,
    pub food_collected: u64,
    pub food_delivered: u64,
    pub markers_deposited: u64,
    pub markers_evicted: u64,
    pub wall_time_ms: u64,
}

/// Running totals for a simulation.
///
/// Counters are atomic so a shared reference can be read from another thread
/// while the driver keeps recording.
pub struct Metrics {
    tick_count: AtomicU64,
    food_collected: AtomicU64,
    food_delivered: AtomicU64,
    markers_deposited: AtomicU64,
    markers_evicted: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `log_interval` ticks
    /// (never, when 0).
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            food_collected: AtomicU64::new(0),
            food_delivered: AtomicU64::new(0),
            markers_deposited: AtomicU64::new(0),
            markers_evicted: AtomicU64::new(0),
            log_interval,
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(
        &self,
        report: &TickReport,
        duration: Duration,
        markers: usize,
        food: usize,
    ) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.food_collected
            .fetch_add(report.food_collected as u64, Ordering::Relaxed);
        self.food_delivered
            .fetch_add(report.food_delivered as u64, Ordering::Relaxed);
        self.markers_deposited
            .fetch_add(report.markers_deposited as u64, Ordering::Relaxed);
        self.markers_evicted
            .fetch_add(report.markers_evicted as u64, Ordering::Relaxed);

        if self.log_interval > 0 && tick % self.log_interval == 0 {
            tracing::info!(
                tick,
                markers,
                food,
                collected = self.food_collected(),
                delivered = self.food_delivered(),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_collected(&self) -> u64 {
        self.food_collected.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_delivered(&self) -> u64 {
        self.food_delivered.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn markers_deposited(&self) -> u64 {
        self.markers_deposited.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn markers_evicted(&self) -> u64 {
        self.markers_evicted.load(Ordering::Relaxed)
    }

    /// Gets elapsed wall time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[must_use]
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            ticks: self.tick_count(),
            food_collected: self.food_collected(),
            food_delivered: self.food_delivered(),
            markers_deposited: self.markers_deposited(),
            markers_evicted: self.markers_evicted(),
            wall_time_ms: self.elapsed().as_millis() as u64,
        }
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` wins over `default_level` when set. Calling this twice is harmless.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}
