mod common;

use common::{returning_ant, seeking_ant, world_with_food};
use formicary_lib::model::ant::Transition;
use formicary_lib::model::colony::update_ants;
use formicary_lib::model::{Phase, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

#[test]
fn test_ant_finds_food_and_turns_home() {
    let world = world_with_food(&[(1000.0, 500.0, 10.0)]);
    let mut ant = seeking_ant(0, 1000.0, 520.0, -FRAC_PI_2);

    let out = ant.update(0.5, &world);

    assert!((ant.position().x - 1000.0).abs() < 1e-3);
    assert!((ant.position().y - 495.0).abs() < 1e-3);
    assert_eq!(ant.phase(), Phase::ReturningHome);
    assert_eq!(ant.reserve(), 2000.0);
    assert_eq!(world.live_food_count(), 0, "Food should be consumed");
    assert_eq!(
        out.transition,
        Some(Transition::FoundFood {
            food: Vec2::new(1000.0, 500.0)
        })
    );
    assert!(out.deposit.is_none(), "Trail restarts after the flip");
}

#[test]
fn test_ant_returns_to_colony() {
    let world = world_with_food(&[]);
    let anchor = Vec2::new(600.0, 600.0);
    let mut ant = returning_ant(1, Vec2::new(619.0, 600.0), anchor, FRAC_PI_2);

    let out = ant.update(0.0, &world);

    assert_eq!(out.transition, Some(Transition::ReachedColony));
    assert_eq!(ant.phase(), Phase::SeekingFood);
    assert_eq!(ant.reserve(), 2000.0);
}

#[test]
fn test_ant_outside_colony_radius_keeps_returning() {
    let world = world_with_food(&[]);
    let anchor = Vec2::new(600.0, 600.0);
    let mut ant = returning_ant(1, Vec2::new(621.0, 600.0), anchor, FRAC_PI_2);

    assert!(ant.update(0.0, &world).transition.is_none());
    assert_eq!(ant.phase(), Phase::ReturningHome);
}

#[test]
fn test_colony_check_wraps_around_the_edge() {
    let world = world_with_food(&[]);
    let anchor = Vec2::new(5.0, 540.0);
    let mut ant = returning_ant(2, Vec2::new(1910.0, 540.0), anchor, FRAC_PI_2);

    ant.update(0.0, &world);
    assert_eq!(ant.phase(), Phase::SeekingFood);
}

fn crowd_around(center: Vec2, n: u32) -> Vec<formicary_lib::model::ant::Ant> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32;
            let p = center + Vec2::from_angle(angle) * 5.0;
            seeking_ant(i, p.x, p.y, angle)
        })
        .collect()
}

#[test]
fn test_single_claim_sequential() {
    let world = world_with_food(&[(500.0, 500.0, 10.0)]);
    let mut ants = crowd_around(Vec2::new(500.0, 500.0), 16);

    let outputs = update_ants(&mut ants, &world, 0.0, false);

    let claims = outputs.iter().filter(|o| o.transition.is_some()).count();
    assert_eq!(claims, 1);
    assert_eq!(
        ants.iter()
            .filter(|a| a.phase() == Phase::ReturningHome)
            .count(),
        1
    );
    // Sequential order: the first ant wins.
    assert_eq!(ants[0].phase(), Phase::ReturningHome);
    assert_eq!(world.live_food_count(), 0);
}

#[test]
fn test_single_claim_parallel() {
    for _ in 0..20 {
        let world = world_with_food(&[(500.0, 500.0, 10.0)]);
        let mut ants = crowd_around(Vec2::new(500.0, 500.0), 64);

        update_ants(&mut ants, &world, 0.0, true);

        let returning = ants
            .iter()
            .filter(|a| a.phase() == Phase::ReturningHome)
            .count();
        assert_eq!(returning, 1, "Exactly one ant may claim the food");
        assert_eq!(world.live_food_count(), 0);
    }
}

#[test]
fn test_ant_claims_at_most_one_food_per_tick() {
    let world = world_with_food(&[(495.0, 500.0, 10.0), (505.0, 500.0, 10.0)]);
    let mut ant = seeking_ant(0, 500.0, 500.0, 0.0);

    ant.update(0.0, &world);

    assert_eq!(ant.phase(), Phase::ReturningHome);
    assert_eq!(world.live_food_count(), 1);
}

#[test]
fn test_consumed_food_is_ignored() {
    let world = world_with_food(&[(500.0, 500.0, 10.0)]);
    let mut first = seeking_ant(0, 503.0, 500.0, 0.0);
    let mut second = seeking_ant(1, 497.0, 500.0, 0.0);

    first.update(0.0, &world);
    let out = second.update(0.0, &world);

    assert_eq!(first.phase(), Phase::ReturningHome);
    assert!(out.transition.is_none());
    assert_eq!(second.phase(), Phase::SeekingFood);
}

#[test]
fn test_food_outside_radius_is_not_claimed() {
    let world = world_with_food(&[(500.0, 500.0, 10.0)]);
    let mut ant = seeking_ant(0, 511.0, 500.0, 0.0);

    ant.update(0.0, &world);

    assert_eq!(ant.phase(), Phase::SeekingFood);
    assert_eq!(world.live_food_count(), 1);
}
