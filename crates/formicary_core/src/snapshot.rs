use crate::ant::Ant;
use crate::world::World;
use formicary_data::{Marker, Phase};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AntSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub phase: Phase,
    pub reserve: f32,
}

impl From<&Ant> for AntSnapshot {
    fn from(ant: &Ant) -> Self {
        let position = ant.position();
        Self {
            id: ant.id(),
            x: position.x,
            y: position.y,
            heading: ant.heading(),
            phase: ant.phase(),
            reserve: ant.reserve(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FoodSnapshot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Read-only copy of everything a renderer draws for one tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed: f32,
    pub width: f32,
    pub height: f32,
    pub ants: Vec<AntSnapshot>,
    pub markers: Vec<Marker>,
    pub food: Vec<FoodSnapshot>,
}

impl WorldSnapshot {
    /// Captures the world and the given ants. Consumed food is left out.
    pub fn capture(world: &World, ants: &[Ant]) -> Self {
        Self {
            tick: world.tick(),
            elapsed: world.elapsed(),
            width: world.width(),
            height: world.height(),
            ants: ants.iter().map(AntSnapshot::from).collect(),
            markers: world.markers().iter().copied().collect(),
            food: world
                .food()
                .iter()
                .filter(|f| f.is_alive())
                .map(|f| FoodSnapshot {
                    x: f.position().x,
                    y: f.position().y,
                    radius: f.radius(),
                })
                .collect(),
        }
    }
}
