//! Foraging agents and their per-tick state machine.
//!
//! An ant alternates between two phases:
//!
//! - `SeekingFood`: follows `ToFood` markers and lays `ToHome` markers. Coming
//!   within a live food item's radius claims it and flips the ant home.
//! - `ReturningHome`: follows `ToHome` markers and lays `ToFood` markers.
//!   Reaching its colony anchor flips it back out.
//!
//! Every flip turns the ant around and refills its reserve, so freshly laid
//! trails are strong near their source and fade with distance from it.

use crate::config::AntConfig;
use crate::world::World;
use formicary_data::{Marker, Phase, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::PI;

/// Phase change that happened during one [`Ant::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Claimed the food item at `food` and turned for home.
    FoundFood { food: Vec2 },
    /// Arrived at the colony anchor and set out again.
    ReachedColony,
}

/// What an ant hands back to the driver after an update.
///
/// Deposits are buffered here instead of being written into the world so that
/// every ant of a tick senses the same marker set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AntOutput {
    pub deposit: Option<Marker>,
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone)]
pub struct Ant {
    id: u32,
    position: Vec2,
    heading: f32,
    phase: Phase,
    reserve: f32,
    colony_anchor: Vec2,
    heading_timer: f32,
    marker_timer: f32,
    target_marker: Option<Vec2>,
    params: AntConfig,
    rng: ChaCha8Rng,
}

impl Ant {
    /// Creates an ant seeking food with a full reserve, anchored where it stands.
    ///
    /// The ant's RNG is derived from `(seed, id)`, so a population built from
    /// one seed replays identically. The heading timer starts at a random
    /// phase to stagger re-heading across the population.
    pub fn new(id: u32, position: Vec2, heading: f32, params: AntConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(ant_seed(seed, id));
        let heading_timer = if params.heading_update_period > 0.0 {
            rng.gen_range(0.0..params.heading_update_period)
        } else {
            0.0
        };
        Self {
            id,
            position,
            heading,
            phase: Phase::SeekingFood,
            reserve: params.max_reserve,
            colony_anchor: position,
            heading_timer,
            marker_timer: 0.0,
            target_marker: None,
            params,
            rng,
        }
    }

    #[must_use]
    pub fn with_colony(mut self, anchor: Vec2) -> Self {
        self.colony_anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Overrides the reserve, clamped into `[0, max_reserve]`.
    #[must_use]
    pub fn with_reserve(mut self, reserve: f32) -> Self {
        self.reserve = clamp_reserve(reserve, self.params.max_reserve);
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading in radians. Not normalised; it accumulates turns.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reserve(&self) -> f32 {
        self.reserve
    }

    pub fn colony_anchor(&self) -> Vec2 {
        self.colony_anchor
    }

    pub fn params(&self) -> &AntConfig {
        &self.params
    }

    /// Position of the strongest marker that drove the last re-heading.
    pub fn target_marker_position(&self) -> Option<Vec2> {
        self.target_marker
    }

    /// The marker behind [`target_marker_position`](Self::target_marker_position),
    /// or `None` once the world has evicted it.
    pub fn target_marker<'w>(&self, world: &'w World) -> Option<&'w Marker> {
        self.target_marker.and_then(|pos| world.marker_at(pos))
    }

    /// Advances the ant by `dt` seconds against a read-only world.
    ///
    /// Order within a tick: timers, movement, food/colony check, re-heading,
    /// deposit. Non-finite or negative `dt` counts as zero.
    pub fn update(&mut self, dt: f32, world: &World) -> AntOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.heading_timer += dt;
        self.marker_timer += dt;

        self.advance(dt, world);

        let transition = match self.phase {
            Phase::SeekingFood => self.try_collect_food(world),
            Phase::ReturningHome => self.try_reach_colony(world),
        };
        if let Some(transition) = transition {
            self.turn_around();
            tracing::trace!(
                ant = self.id,
                ?transition,
                phase = ?self.phase,
                "Phase transition"
            );
        }

        if self.heading_timer >= self.params.heading_update_period {
            self.reheading(world);
            self.heading_timer = 0.0;
        }

        let deposit = if self.marker_timer >= self.params.marker_period {
            self.marker_timer = 0.0;
            Some(self.deposit(world))
        } else {
            None
        };

        AntOutput {
            deposit,
            transition,
        }
    }

    fn advance(&mut self, dt: f32, world: &World) {
        let next = self.position + Vec2::from_angle(self.heading) * (self.params.speed * dt);
        if next.is_finite() {
            self.position = world.wrap(next);
        }
    }

    fn try_collect_food(&self, world: &World) -> Option<Transition> {
        let position = self.position;
        world
            .get_food_near(position)
            .find(|food| {
                food.is_alive()
                    && world.offset(position, food.position()).length() < food.radius()
                    && food.try_claim()
            })
            .map(|food| Transition::FoundFood {
                food: food.position(),
            })
    }

    fn try_reach_colony(&self, world: &World) -> Option<Transition> {
        (world.distance(self.position, self.colony_anchor) < self.params.colony_radius)
            .then_some(Transition::ReachedColony)
    }

    fn turn_around(&mut self) {
        self.phase = self.phase.flipped();
        self.heading += PI;
        self.reserve = self.params.max_reserve;
        // The next trail starts one full period after the flip.
        self.marker_timer = 0.0;
    }

    /// Steers towards the intensity-weighted centroid of the sensed markers
    /// ahead of the ant, then adds a random wander.
    fn reheading(&mut self, world: &World) {
        let kind = self.phase.sensed_marker();
        let forward = Vec2::from_angle(self.heading);
        let radius = self.params.sensing_radius;

        let mut weighted = Vec2::ZERO;
        let mut total = 0.0_f32;
        let mut strongest: Option<(f32, Vec2)> = None;

        for marker in world.get_markers_within(self.position, radius) {
            if marker.kind != kind {
                continue;
            }
            let offset = world.offset(self.position, marker.position);
            if offset.length() >= radius || offset.dot(forward) <= 0.0 {
                continue;
            }
            weighted += offset * marker.intensity;
            total += marker.intensity;
            if strongest.map_or(true, |(best, _)| marker.intensity > best) {
                strongest = Some((marker.intensity, marker.position));
            }
        }

        self.target_marker = strongest.map(|(_, pos)| pos);
        if total > 0.0 {
            let centroid = weighted / total;
            if centroid.length_squared() > 0.0 {
                self.heading = centroid.angle();
            }
        }

        let wander = self.params.wander_angle;
        if wander > 0.0 {
            self.heading += self.rng.gen_range(-wander..=wander);
        }
    }

    fn deposit(&mut self, world: &World) -> Marker {
        let intensity =
            (self.reserve * self.params.deposit_fraction).min(world.config().max_marker_intensity);
        self.reserve = clamp_reserve(
            self.reserve * self.params.reserve_decay,
            self.params.max_reserve,
        );
        Marker::new(self.position, self.phase.deposited_marker(), intensity)
    }
}

#[inline]
fn clamp_reserve(reserve: f32, max: f32) -> f32 {
    if reserve.is_nan() {
        0.0
    } else {
        reserve.clamp(0.0, max)
    }
}

fn ant_seed(seed: u64, id: u32) -> u64 {
    seed ^ u64::from(id).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
