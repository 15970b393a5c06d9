//! Simulation driver: owns the ants and the world and runs whole ticks.

use crate::ant::{Ant, AntOutput, Transition};
use crate::config::AppConfig;
use crate::error::Result;
use crate::food::Food;
use crate::metrics::{Metrics, TickReport};
use crate::snapshot::WorldSnapshot;
use crate::world::World;
use formicary_data::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub struct Colony {
    config: AppConfig,
    seed: u64,
    world: World,
    ants: Vec<Ant>,
    metrics: Metrics,
}

impl Colony {
    /// Builds a populated colony from a validated configuration.
    ///
    /// Food is scattered in `food.clusters` uniform discs. Ants start at
    /// `colony.position` when set; otherwise each ant starts at its own random
    /// point, which also becomes its anchor.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut world = World::new(config.world.clone());
        let food = &config.food;
        for _ in 0..food.clusters {
            let center = random_point(&mut rng, &world);
            for _ in 0..food.per_cluster {
                let angle = rng.gen_range(0.0..TAU);
                let dist = food.cluster_radius * rng.gen::<f32>().sqrt();
                world.add_food(Food::new(center + Vec2::from_angle(angle) * dist, food.radius));
            }
        }

        let ants = (0..config.ants.count)
            .map(|i| {
                let position = config
                    .colony
                    .position
                    .unwrap_or_else(|| random_point(&mut rng, &world));
                let heading = rng.gen_range(0.0..TAU);
                Ant::new(i as u32, position, heading, config.ants, seed)
            })
            .collect::<Vec<_>>();

        tracing::info!(
            seed,
            ants = ants.len(),
            food = world.live_food_count(),
            width = world.width(),
            height = world.height(),
            "Colony initialised"
        );

        Ok(Self::from_parts(config, seed, world, ants))
    }

    /// Assembles a colony from pre-built parts without validation or spawning.
    pub fn from_parts(config: AppConfig, seed: u64, world: World, ants: Vec<Ant>) -> Self {
        let metrics = Metrics::new(config.log_interval);
        Self {
            config,
            seed,
            world,
            ants,
            metrics,
        }
    }

    /// Runs one tick: world bookkeeping, every ant against the same world,
    /// then the buffered deposits.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let start = Instant::now();
        let step = self.world.step(dt);

        let outputs = update_ants(&mut self.ants, &self.world, dt, self.config.parallel);

        let mut report = TickReport {
            tick: self.world.tick(),
            markers_evicted: step.markers_evicted,
            food_removed: step.food_removed,
            ..TickReport::default()
        };
        for output in &outputs {
            match output.transition {
                Some(Transition::FoundFood { .. }) => report.food_collected += 1,
                Some(Transition::ReachedColony) => report.food_delivered += 1,
                None => {}
            }
        }
        report.markers_deposited = self
            .world
            .apply_deposits(outputs.iter().filter_map(|o| o.deposit));

        self.metrics.record_tick(
            &report,
            start.elapsed(),
            self.world.marker_count(),
            self.world.live_food_count(),
        );
        report
    }

    /// Runs `ticks` ticks of `dt` seconds each.
    pub fn run(&mut self, ticks: u64, dt: f32) {
        for _ in 0..ticks {
            self.tick(dt);
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Seed the colony was built from; logged so a run can be replayed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world, &self.ants)
    }
}

/// Updates every ant against `world` and returns their outputs in ant order.
///
/// With `parallel` set the ants run on the rayon pool; contested food then goes
/// to whichever ant claims it first.
#[cfg(feature = "parallel")]
pub fn update_ants(ants: &mut [Ant], world: &World, dt: f32, parallel: bool) -> Vec<AntOutput> {
    if parallel {
        ants.par_iter_mut()
            .map(|ant| ant.update(dt, world))
            .collect()
    } else {
        update_sequential(ants, world, dt)
    }
}

/// Updates every ant against `world` and returns their outputs in ant order.
#[cfg(not(feature = "parallel"))]
pub fn update_ants(ants: &mut [Ant], world: &World, dt: f32, _parallel: bool) -> Vec<AntOutput> {
    update_sequential(ants, world, dt)
}

fn update_sequential(ants: &mut [Ant], world: &World, dt: f32) -> Vec<AntOutput> {
    ants.iter_mut().map(|ant| ant.update(dt, world)).collect()
}

fn random_point(rng: &mut ChaCha8Rng, world: &World) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..world.width()),
        rng.gen_range(0.0..world.height()),
    )
}
