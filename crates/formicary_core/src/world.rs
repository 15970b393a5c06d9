//! The shared environment: marker and food grids on a wrap-around plane.

use crate::config::WorldConfig;
use crate::food::Food;
use crate::spatial_grid::SpatialGrid;
use formicary_data::{Marker, Vec2};

/// Bookkeeping results of one [`World::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub markers_evicted: usize,
    pub food_removed: usize,
}

/// Owns the marker and food grids. Ants are owned elsewhere and only borrow
/// the world for the duration of their update.
///
/// The world is a torus: positions wrap at `width`/`height` and distances are
/// measured along the shortest wrapped displacement (see [`World::offset`]).
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    markers: SpatialGrid<Marker>,
    food: SpatialGrid<Food>,
    max_food_radius: f32,
    tick: u64,
    elapsed: f32,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let markers = SpatialGrid::new(config.marker_cell_size, config.width, config.height);
        let food = SpatialGrid::new(config.food_cell_size, config.width, config.height);
        Self {
            config,
            markers,
            food,
            max_food_radius: 0.0,
            tick: 0,
            elapsed: 0.0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Number of completed [`step`](Self::step) calls.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds advanced through [`step`](Self::step).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn markers(&self) -> &SpatialGrid<Marker> {
        &self.markers
    }

    pub fn food(&self) -> &SpatialGrid<Food> {
        &self.food
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn live_food_count(&self) -> usize {
        self.food.iter().filter(|f| f.is_alive()).count()
    }

    /// Wraps a position onto the torus, into `[0, width) x [0, height)`.
    #[inline]
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            wrap_coord(position.x, self.config.width),
            wrap_coord(position.y, self.config.height),
        )
    }

    /// Shortest displacement from `from` to `to` on the torus.
    #[inline]
    pub fn offset(&self, from: Vec2, to: Vec2) -> Vec2 {
        let d = to - from;
        Vec2::new(
            d.x - self.config.width * (d.x / self.config.width).round(),
            d.y - self.config.height * (d.y / self.config.height).round(),
        )
    }

    #[inline]
    pub fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        self.offset(a, b).length()
    }

    /// Markers in the cell containing `point` and its neighbours.
    pub fn get_markers_near(&self, point: Vec2) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.query_near(point, self.config.marker_cell_size)
    }

    /// Markers in every cell overlapping the square of half-width `radius`.
    pub fn get_markers_within(
        &self,
        point: Vec2,
        radius: f32,
    ) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.query_near(point, radius)
    }

    /// Food whose consumption disc may contain `point`, dead items included.
    pub fn get_food_near(&self, point: Vec2) -> impl Iterator<Item = &Food> + '_ {
        self.food
            .query_near(point, self.config.food_cell_size.max(self.max_food_radius))
    }

    /// Re-resolves a marker by its exact position; `None` once it was evicted.
    pub fn marker_at(&self, position: Vec2) -> Option<&Marker> {
        self.markers
            .query_near(position, 0.0)
            .find(|m| m.position == position)
    }

    /// Adds a marker straight into the grid.
    ///
    /// The position is wrapped and the intensity capped at
    /// `max_marker_intensity`. Non-finite or non-positive deposits are ignored.
    pub fn deposit_marker(&mut self, marker: Marker) -> bool {
        if !marker.position.is_finite() || marker.intensity.is_nan() || marker.intensity <= 0.0 {
            return false;
        }
        let marker = Marker {
            position: self.wrap(marker.position),
            intensity: marker.intensity.min(self.config.max_marker_intensity),
            ..marker
        };
        self.markers.insert(marker)
    }

    /// Merges a batch of deposits collected from ant updates. Returns how many
    /// were stored.
    pub fn apply_deposits<I>(&mut self, deposits: I) -> usize
    where
        I: IntoIterator<Item = Marker>,
    {
        deposits
            .into_iter()
            .filter(|m| self.deposit_marker(*m))
            .count()
    }

    /// Places a food item. Consumed food and non-finite positions are ignored.
    pub fn add_food(&mut self, food: Food) -> bool {
        if !food.is_alive() || !food.position().is_finite() {
            return false;
        }
        let radius = food.radius();
        let food = Food::new(self.wrap(food.position()), radius);
        let stored = self.food.insert(food);
        if stored {
            self.max_food_radius = self.max_food_radius.max(radius);
        }
        stored
    }

    /// Advances marker and food bookkeeping by `dt` seconds.
    ///
    /// Every marker keeps `marker_decay_rate^dt` of its intensity; markers that
    /// fall below `marker_eviction_threshold` are evicted, and consumed food is
    /// dropped from the food grid. Non-finite or negative `dt` counts as zero.
    pub fn step(&mut self, dt: f32) -> StepReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let factor = self.config.marker_decay_rate.powf(dt);
        let threshold = self.config.marker_eviction_threshold;

        let markers_evicted = self.markers.retain_mut(|m| {
            m.intensity *= factor;
            m.intensity >= threshold
        });
        let food_removed = self.food.retain_mut(|f| f.is_alive());

        self.tick += 1;
        self.elapsed += dt;

        if markers_evicted > 0 || food_removed > 0 {
            tracing::debug!(
                tick = self.tick,
                markers_evicted,
                food_removed,
                markers = self.markers.len(),
                "World bookkeeping"
            );
        }

        StepReport {
            markers_evicted,
            food_removed,
        }
    }
}

#[inline]
fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formicary_data::MarkerKind;

    fn world() -> World {
        World::new(WorldConfig::default())
    }

    #[test]
    fn test_wrap_is_toroidal() {
        let w = world();
        assert_eq!(w.wrap(Vec2::new(1925.0, -5.0)), Vec2::new(5.0, 1075.0));
        assert_eq!(w.wrap(Vec2::new(1920.0, 1080.0)), Vec2::ZERO);
        let tiny = w.wrap(Vec2::new(-1e-9, -1e-9));
        assert!(tiny.x < 1920.0 && tiny.y < 1080.0);
    }

    #[test]
    fn test_offset_takes_short_way_round() {
        let w = world();
        let d = w.offset(Vec2::new(1910.0, 10.0), Vec2::new(10.0, 1070.0));
        assert!((d.x - 20.0).abs() < 1e-3);
        assert!((d.y + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_deposit_caps_intensity_and_wraps() {
        let mut w = world();
        assert!(w.deposit_marker(Marker::new(
            Vec2::new(-10.0, 50.0),
            MarkerKind::ToFood,
            500.0
        )));
        let m = w.markers().iter().next().copied().expect("stored marker");
        assert_eq!(m.position, Vec2::new(1910.0, 50.0));
        assert_eq!(m.intensity, 100.0);
    }

    #[test]
    fn test_deposit_rejects_degenerate_markers() {
        let mut w = world();
        assert!(!w.deposit_marker(Marker::new(Vec2::new(f32::NAN, 1.0), MarkerKind::ToFood, 1.0)));
        assert!(!w.deposit_marker(Marker::new(Vec2::new(1.0, 1.0), MarkerKind::ToFood, 0.0)));
        assert_eq!(w.marker_count(), 0);
    }

    #[test]
    fn test_step_decays_and_evicts() {
        let mut w = world();
        w.deposit_marker(Marker::new(Vec2::new(100.0, 100.0), MarkerKind::ToHome, 10.0));
        w.deposit_marker(Marker::new(Vec2::new(200.0, 100.0), MarkerKind::ToHome, 0.0105));

        let report = w.step(1.0);
        assert_eq!(report.markers_evicted, 1);
        assert_eq!(w.marker_count(), 1);
        let m = w.marker_at(Vec2::new(100.0, 100.0)).expect("strong marker survives");
        assert!((m.intensity - 9.5).abs() < 1e-4);
        assert_eq!(w.tick(), 1);
    }

    #[test]
    fn test_step_drops_consumed_food() {
        let mut w = world();
        w.add_food(Food::new(Vec2::new(50.0, 50.0), 10.0));
        w.add_food(Food::new(Vec2::new(500.0, 50.0), 10.0));
        assert!(w.get_food_near(Vec2::new(52.0, 50.0)).any(|f| f.try_claim()));
        assert_eq!(w.live_food_count(), 1);

        let report = w.step(0.1);
        assert_eq!(report.food_removed, 1);
        assert_eq!(w.food().len(), 1);
    }

    #[test]
    fn test_marker_at_forgets_evicted_markers() {
        let mut w = world();
        let pos = Vec2::new(300.0, 300.0);
        w.deposit_marker(Marker::new(pos, MarkerKind::ToFood, 0.02));
        assert!(w.marker_at(pos).is_some());
        w.step(100.0);
        assert!(w.marker_at(pos).is_none());
    }

    #[test]
    fn test_apply_deposits_counts_stored() {
        let mut w = world();
        let stored = w.apply_deposits([
            Marker::new(Vec2::new(1.0, 1.0), MarkerKind::ToFood, 1.0),
            Marker::new(Vec2::new(f32::INFINITY, 1.0), MarkerKind::ToFood, 1.0),
            Marker::new(Vec2::new(2.0, 2.0), MarkerKind::ToHome, 1.0),
        ]);
        assert_eq!(stored, 2);
        assert_eq!(w.get_markers_near(Vec2::new(1.5, 1.5)).count(), 2);
    }
}
