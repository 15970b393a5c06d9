//! Food resources and their one-shot claim flag.

use crate::spatial_grid::Located;
use formicary_data::Vec2;
use std::sync::atomic::{AtomicBool, Ordering};

/// A food item. It is consumed by the first ant to claim it.
///
/// `alive` is atomic so that ants updated in parallel against a shared
/// `&World` can race for the same item: exactly one `try_claim` succeeds.
#[derive(Debug)]
pub struct Food {
    position: Vec2,
    radius: f32,
    alive: AtomicBool,
}

impl Food {
    #[must_use]
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            alive: AtomicBool::new(true),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Marks the food consumed. Returns `true` only for the caller that flipped
    /// it from alive to dead.
    #[inline]
    pub fn try_claim(&self) -> bool {
        self.alive
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Clone for Food {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            radius: self.radius,
            alive: AtomicBool::new(self.is_alive()),
        }
    }
}

impl Located for Food {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }
}
