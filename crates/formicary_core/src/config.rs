//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures that map onto `config.toml`. Every section
//! implements `Default`, and every field may be omitted from the file.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command-line flags of the driver binary (override both)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! seed = 42
//! parallel = true
//!
//! [world]
//! width = 1920.0
//! height = 1080.0
//!
//! [ants]
//! count = 1024
//! speed = 50.0
//!
//! [colony]
//! position = { x = 960.0, y = 540.0 }
//! ```

use crate::error::{ensure, Result};
use formicary_data::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

/// World geometry, grid layout and marker bookkeeping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Cell size of the marker grid; should be at least the ants' sensing radius.
    pub marker_cell_size: f32,
    /// Cell size of the food grid; should be at least the largest food radius.
    pub food_cell_size: f32,
    /// Fraction of intensity a marker keeps after one second.
    pub marker_decay_rate: f32,
    /// Markers weaker than this are evicted during `World::step`.
    pub marker_eviction_threshold: f32,
    pub max_marker_intensity: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            marker_cell_size: 40.0,
            food_cell_size: 20.0,
            marker_decay_rate: 0.95,
            marker_eviction_threshold: 0.01,
            max_marker_intensity: 100.0,
        }
    }
}

/// Per-ant behaviour parameters. Copied into every ant at construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AntConfig {
    pub count: usize,
    /// World units per second.
    pub speed: f32,
    pub max_reserve: f32,
    /// Seconds between re-heading decisions.
    pub heading_update_period: f32,
    /// Seconds between marker deposits.
    pub marker_period: f32,
    pub sensing_radius: f32,
    pub colony_radius: f32,
    /// Share of the reserve turned into marker intensity on each deposit.
    pub deposit_fraction: f32,
    /// Multiplier applied to the reserve after each deposit.
    pub reserve_decay: f32,
    /// Half-width of the random heading perturbation, in radians.
    pub wander_angle: f32,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            count: 1024,
            speed: 50.0,
            max_reserve: 2000.0,
            heading_update_period: 0.25,
            marker_period: 0.25,
            sensing_radius: 40.0,
            colony_radius: 20.0,
            deposit_fraction: 0.02,
            reserve_decay: 0.98,
            wander_angle: 0.15 * PI,
        }
    }
}

/// Initial food layout: `clusters` discs of `per_cluster` items each.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FoodConfig {
    pub clusters: usize,
    pub per_cluster: usize,
    pub cluster_radius: f32,
    /// Consumption radius of each food item.
    pub radius: f32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            clusters: 4,
            per_cluster: 200,
            cluster_radius: 60.0,
            radius: 10.0,
        }
    }
}

/// Where ants start and return to.
///
/// With no `position`, every ant spawns at a random point that becomes its own
/// colony anchor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ColonyConfig {
    pub position: Option<Vec2>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// RNG seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    /// Update ants on the rayon pool.
    pub parallel: bool,
    /// Size of the rayon pool; rayon's default when absent.
    pub threads: Option<usize>,
    /// Ticks between summary log lines; 0 disables them.
    pub log_interval: u64,
    pub world: WorldConfig,
    pub ants: AntConfig,
    pub food: FoodConfig,
    pub colony: ColonyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: true,
            threads: None,
            log_interval: 600,
            world: WorldConfig::default(),
            ants: AntConfig::default(),
            food: FoodConfig::default(),
            colony: ColonyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads and validates a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates all configuration parameters.
    ///
    /// Returns the first violated rule as [`crate::SimError::Config`].
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        ensure(
            w.width.is_finite() && w.width > 0.0,
            "World width must be positive",
        )?;
        ensure(
            w.height.is_finite() && w.height > 0.0,
            "World height must be positive",
        )?;
        ensure(
            w.marker_cell_size > 0.0 && w.food_cell_size > 0.0,
            "Grid cell sizes must be positive",
        )?;
        ensure(
            w.marker_decay_rate > 0.0 && w.marker_decay_rate <= 1.0,
            "Marker decay rate must be in (0, 1]",
        )?;
        ensure(
            w.marker_eviction_threshold >= 0.0,
            "Marker eviction threshold must be non-negative",
        )?;
        ensure(
            w.max_marker_intensity > 0.0,
            "Max marker intensity must be positive",
        )?;

        let a = &self.ants;
        ensure(a.speed >= 0.0, "Ant speed must be non-negative")?;
        ensure(a.max_reserve > 0.0, "Max reserve must be positive")?;
        ensure(
            a.heading_update_period > 0.0,
            "Heading update period must be positive",
        )?;
        ensure(a.marker_period > 0.0, "Marker period must be positive")?;
        ensure(a.sensing_radius > 0.0, "Sensing radius must be positive")?;
        ensure(a.colony_radius > 0.0, "Colony radius must be positive")?;
        ensure(
            a.deposit_fraction > 0.0 && a.deposit_fraction <= 1.0,
            "Deposit fraction must be in (0, 1]",
        )?;
        ensure(
            a.reserve_decay > 0.0 && a.reserve_decay <= 1.0,
            "Reserve decay must be in (0, 1]",
        )?;
        ensure(
            (0.0..=PI).contains(&a.wander_angle),
            "Wander angle must be in [0, PI]",
        )?;
        ensure(
            w.marker_cell_size >= a.sensing_radius,
            format!(
                "Marker cell size ({}) must be at least the sensing radius ({})",
                w.marker_cell_size, a.sensing_radius
            ),
        )?;

        let f = &self.food;
        ensure(f.radius > 0.0, "Food radius must be positive")?;
        ensure(
            f.cluster_radius >= 0.0,
            "Food cluster radius must be non-negative",
        )?;
        ensure(
            w.food_cell_size >= f.radius,
            format!(
                "Food cell size ({}) must be at least the food radius ({})",
                w.food_cell_size, f.radius
            ),
        )?;

        if let Some(pos) = self.colony.position {
            ensure(
                pos.is_finite()
                    && (0.0..w.width).contains(&pos.x)
                    && (0.0..w.height).contains(&pos.y),
                "Colony position must lie inside the world",
            )?;
        }

        if let Some(threads) = self.threads {
            ensure(threads > 0, "Thread count must be positive")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn test_default_config_is_valid() {
        AppConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            seed = 7

            [ants]
            count = 12

            [colony]
            position = { x = 100.0, y = 200.0 }
            "#,
        )
        .expect("parse partial config");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ants.count, 12);
        assert_eq!(config.ants.max_reserve, 2000.0);
        assert_eq!(config.world.width, 1920.0);
        assert_eq!(config.colony.position, Some(Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn test_rejects_cell_smaller_than_sensing_radius() {
        let mut config = AppConfig::default();
        config.world.marker_cell_size = 10.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sensing radius"));
    }

    #[test]
    fn test_rejects_colony_outside_world() {
        let mut config = AppConfig::default();
        config.colony.position = Some(Vec2::new(5000.0, 10.0));
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[ants]\ncount = \"many\"").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = AppConfig::default();
        config.seed = Some(99);
        let text = config.to_toml_string().expect("encode");
        let back = AppConfig::from_toml_str(&text).expect("decode");
        assert_eq!(back, config);
    }
}
