use formicary_lib::model::ant::Ant;
use formicary_lib::model::config::{AntConfig, WorldConfig};
use formicary_lib::model::food::Food;
use formicary_lib::model::{Phase, Vec2, World};

pub const SEED: u64 = 0xA17;

/// Default 1920x1080 world with nothing in it.
#[allow(dead_code)]
pub fn empty_world() -> World {
    World::new(WorldConfig::default())
}

#[allow(dead_code)]
pub fn world_with_food(items: &[(f32, f32, f32)]) -> World {
    let mut world = empty_world();
    for &(x, y, radius) in items {
        assert!(world.add_food(Food::new(Vec2::new(x, y), radius)));
    }
    world
}

#[allow(dead_code)]
pub fn seeking_ant(id: u32, x: f32, y: f32, heading: f32) -> Ant {
    Ant::new(id, Vec2::new(x, y), heading, AntConfig::default(), SEED)
}

#[allow(dead_code)]
pub fn returning_ant(id: u32, position: Vec2, anchor: Vec2, heading: f32) -> Ant {
    Ant::new(id, position, heading, AntConfig::default(), SEED)
        .with_colony(anchor)
        .with_phase(Phase::ReturningHome)
        .with_reserve(100.0)
}
