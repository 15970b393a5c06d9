//! Headless driver: load a configuration, run a fixed number of ticks and
//! report what the colony achieved.

use crate::model::config::AppConfig;
use crate::model::metrics::MetricsSummary;
use crate::model::{Colony, Phase};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RunError {
    #[error("Time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
    #[error("Tick count must be positive")]
    NoTicks,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub ticks: u64,
    /// Seconds simulated per tick.
    pub dt: f32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 3600,
            dt: 1.0 / 60.0,
        }
    }
}

impl RunOptions {
    pub fn validate(&self) -> std::result::Result<(), RunError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(RunError::InvalidTimeStep(self.dt));
        }
        if self.ticks == 0 {
            return Err(RunError::NoTicks);
        }
        Ok(())
    }
}

/// End-of-run report printed by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub simulated_seconds: f32,
    pub ants: usize,
    pub returning_home: usize,
    pub markers: usize,
    pub live_food: usize,
    pub metrics: MetricsSummary,
}

impl RunSummary {
    pub fn collect(colony: &Colony) -> Self {
        let world = colony.world();
        Self {
            seed: colony.seed(),
            ticks: world.tick(),
            simulated_seconds: world.elapsed(),
            ants: colony.ants().len(),
            returning_home: colony
                .ants()
                .iter()
                .filter(|a| a.phase() == Phase::ReturningHome)
                .count(),
            markers: world.marker_count(),
            live_food: world.live_food_count(),
            metrics: colony.metrics().summary(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to encode run summary")
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed:            {}", self.seed)?;
        writeln!(
            f,
            "ticks:           {} ({:.1}s simulated, {}ms wall)",
            self.ticks, self.simulated_seconds, self.metrics.wall_time_ms
        )?;
        writeln!(
            f,
            "ants:            {} ({} carrying food)",
            self.ants, self.returning_home
        )?;
        writeln!(f, "food collected:  {}", self.metrics.food_collected)?;
        writeln!(f, "food delivered:  {}", self.metrics.food_delivered)?;
        writeln!(f, "food remaining:  {}", self.live_food)?;
        write!(
            f,
            "markers:         {} live, {} deposited, {} evicted",
            self.markers, self.metrics.markers_deposited, self.metrics.markers_evicted
        )
    }
}

/// Loads the configuration at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Runs `options.ticks` ticks and summarises the result.
pub fn run(colony: &mut Colony, options: RunOptions) -> Result<RunSummary> {
    options.validate()?;
    tracing::info!(
        ticks = options.ticks,
        dt = options.dt,
        parallel = colony.config().parallel,
        "Starting headless run"
    );

    colony.run(options.ticks, options.dt);

    let summary = RunSummary::collect(colony);
    tracing::info!(
        collected = summary.metrics.food_collected,
        delivered = summary.metrics.food_delivered,
        markers = summary.markers,
        "Headless run finished"
    );
    Ok(summary)
}
