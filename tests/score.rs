use bevy_ecs::system::RunSystemOnce;
use pretty_assertions::assert_eq;
use redline::{
    systems::{score_system, tally_passed, GameSession, Obstacles},
    variant::Variant,
};
use speculoos::prelude::*;

mod common;

#[test]
fn obstacle_counts_once_its_trailing_edge_is_behind_the_actor() {
    let mut obstacles = Obstacles::default();
    // Trailing edges at 99 and 100 for an 80px obstacle
    obstacles.spawn(19.0, 150.0);
    obstacles.spawn(20.0, 150.0);

    let gained = tally_passed(&mut obstacles, 100.0, 80.0);

    assert_eq!(gained, 1);
    let passed: Vec<bool> = obstacles.iter().map(|o| o.passed).collect();
    assert_eq!(passed, vec![true, false]);
}

#[test]
fn passed_obstacles_never_score_twice() {
    let mut obstacles = Obstacles::default();
    obstacles.spawn(0.0, 150.0);

    let first = tally_passed(&mut obstacles, 100.0, 80.0);
    let second = tally_passed(&mut obstacles, 100.0, 80.0);
    obstacles.advance(50.0, -1_000.0);
    let third = tally_passed(&mut obstacles, 100.0, 80.0);

    assert_eq!((first, second, third), (1, 0, 0));
}

#[test]
fn several_obstacles_can_be_passed_in_one_frame() {
    let mut obstacles = Obstacles::default();
    obstacles.spawn(-60.0, 150.0);
    obstacles.spawn(-10.0, 150.0);
    obstacles.spawn(200.0, 150.0);

    assert_eq!(tally_passed(&mut obstacles, 100.0, 60.0), 2);
}

#[test]
fn score_system_adds_to_the_session() {
    let config = Variant::DkFly.config();
    let mut world = common::create_test_world(config);
    {
        let mut session = world.resource_mut::<GameSession>();
        session.begin();
        session.tick_countdown(3.0);
        session.score = 4;
    }
    world.resource_mut::<Obstacles>().spawn(10.0, 150.0);

    world
        .run_system_once(score_system)
        .expect("System should run successfully");
    world
        .run_system_once(score_system)
        .expect("System should run successfully");

    assert_eq!(world.resource::<GameSession>().score, 5);
    assert_that(&world.resource::<Obstacles>().iter().all(|o| o.passed)).is_true();
}

#[test]
fn score_system_ignores_obstacles_still_ahead() {
    let mut world = common::create_test_world(Variant::FunFly.config());
    world.resource_mut::<Obstacles>().spawn(300.0, 150.0);

    world
        .run_system_once(score_system)
        .expect("System should run successfully");

    assert_eq!(world.resource::<GameSession>().score, 0);
}
