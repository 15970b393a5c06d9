use crate::Vec2;
use serde::{Deserialize, Serialize};

/// What a marker points towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// "Food is this way": laid by ants carrying food home.
    ToFood,
    /// "The colony is this way": laid by ants out foraging.
    ToHome,
}

impl MarkerKind {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            MarkerKind::ToFood => MarkerKind::ToHome,
            MarkerKind::ToHome => MarkerKind::ToFood,
        }
    }
}

/// An ant's current goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    SeekingFood,
    ReturningHome,
}

impl Phase {
    /// Marker kind an ant in this phase follows.
    #[must_use]
    pub fn sensed_marker(self) -> MarkerKind {
        match self {
            Phase::SeekingFood => MarkerKind::ToFood,
            Phase::ReturningHome => MarkerKind::ToHome,
        }
    }

    /// Marker kind an ant in this phase leaves behind: the way back to where it came from.
    #[must_use]
    pub fn deposited_marker(self) -> MarkerKind {
        self.sensed_marker().opposite()
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Phase::SeekingFood => Phase::ReturningHome,
            Phase::ReturningHome => Phase::SeekingFood,
        }
    }
}

/// A scent deposit. Markers never move; only their intensity changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Vec2,
    pub kind: MarkerKind,
    pub intensity: f32,
}

impl Marker {
    #[must_use]
    pub fn new(position: Vec2, kind: MarkerKind, intensity: f32) -> Self {
        Self {
            position,
            kind,
            intensity,
        }
    }
}
