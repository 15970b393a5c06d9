//! # Formicary Core
//!
//! The simulation engine for Formicary, a scent-trail foraging model.
//!
//! This crate contains the deterministic simulation logic:
//! - A wrap-around spatial grid for neighbour queries
//! - The world: scent markers with decay and eviction, claimable food
//! - Ants: a two-phase foraging state machine steered by nearby markers
//! - The colony driver, running ticks sequentially or on rayon
//! - Configuration, metrics collection and structured logging
//!
//! ## Architecture
//!
//! A tick runs in three stages:
//! - **World bookkeeping**: `World::step` decays markers and drops consumed food
//! - **Agent updates**: every ant reads the same `&World` and returns its deposit
//! - **Merge**: deposits are inserted after all ants have finished
//!
//! Food is the only state ants share while updating; each item carries an
//! atomic flag so that exactly one ant can claim it.
//!
//! ## Example
//!
//! ```
//! use formicary_core::{AppConfig, Colony};
//!
//! let mut config = AppConfig::default();
//! config.seed = Some(42);
//! config.ants.count = 64;
//!
//! let mut colony = Colony::new(config).expect("default config is valid");
//! colony.run(30, 1.0 / 60.0);
//! assert_eq!(colony.world().tick(), 30);
//! ```

/// Foraging agents and their per-tick state machine
pub mod ant;
/// Simulation driver owning ants and world
pub mod colony;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for configuration loading
pub mod error;
/// Claimable food items
pub mod food;
/// Performance metrics collection and logging
pub mod metrics;
/// Serializable views of the simulation for renderers
pub mod snapshot;
/// Uniform wrap-around grid for O(1) proximity queries
pub mod spatial_grid;
/// Marker and food grids on a torus
pub mod world;

pub use ant::{Ant, AntOutput, Transition};
pub use colony::Colony;
pub use config::{AntConfig, AppConfig, ColonyConfig, FoodConfig, WorldConfig};
pub use error::{Result, SimError};
pub use food::Food;
pub use metrics::{init_logging, Metrics, MetricsSummary, TickReport};
pub use snapshot::{AntSnapshot, FoodSnapshot, WorldSnapshot};
pub use spatial_grid::{Located, SpatialGrid};
pub use world::{StepReport, World};
pub use formicary_data::{Marker, MarkerKind, Phase, Vec2};
