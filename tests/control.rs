use bevy_ecs::{event::Events, system::RunSystemOnce};
use pretty_assertions::assert_eq;
use redline::{
    events::{GameCommand, GameEvent},
    systems::{control_system, Actor, GameSession, GameStage, GlobalState, InputIntent, Obstacles, Particles},
    variant::Variant,
};
use speculoos::prelude::*;

mod common;

fn run_control(world: &mut bevy_ecs::world::World) {
    world
        .run_system_once(control_system)
        .expect("System should run successfully");
    // Each one-off system starts reading from the oldest buffered event
    world.resource_mut::<Events<GameEvent>>().clear();
}

#[test]
fn begin_resets_the_round() {
    let mut world = common::create_test_world(Variant::FunFly.config());
    {
        let mut actor = world.resource_mut::<Actor>();
        actor.y = 12.0;
        actor.velocity = 9.0;
    }
    world.resource_mut::<Obstacles>().spawn(200.0, 150.0);

    common::send_command(&mut world, GameCommand::Begin);
    run_control(&mut world);

    assert_eq!(world.resource::<GameSession>().stage, GameStage::Countdown);
    let actor = *world.resource::<Actor>();
    assert_eq!(actor.y, common::TEST_HEIGHT as f32 / 2.0);
    assert_eq!(actor.velocity, 0.0);
    assert_that(&world.resource::<Obstacles>().is_empty()).is_true();
    assert_that(&world.resource::<Particles>().0.is_empty()).is_true();
}

#[test]
fn begin_keeps_a_hold_that_is_still_down() {
    let mut world = common::create_test_world(Variant::FunFly.config());
    world.resource_mut::<InputIntent>().holding = true;

    common::send_command(&mut world, GameCommand::Begin);
    run_control(&mut world);

    assert_eq!(world.resource::<GameSession>().stage, GameStage::Countdown);
    assert_that(&world.resource::<InputIntent>().holding).is_true();
}

#[test]
fn begin_mid_round_leaves_everything_alone() {
    let mut world = common::create_test_world(Variant::DkFly.config());
    {
        let mut session = world.resource_mut::<GameSession>();
        session.begin();
        session.tick_countdown(3.0);
        session.score = 3;
    }
    world.resource_mut::<Obstacles>().spawn(200.0, 150.0);

    common::send_command(&mut world, GameCommand::Begin);
    run_control(&mut world);

    let session = world.resource::<GameSession>();
    assert_eq!(session.stage, GameStage::Playing);
    assert_eq!(session.score, 3);
    assert_eq!(world.resource::<Obstacles>().len(), 1);
}

#[test]
fn press_jumps_only_while_playing() {
    let mut world = common::create_test_world(Variant::DkFly.config());

    common::send_command(&mut world, GameCommand::Press);
    run_control(&mut world);
    assert_eq!(world.resource::<Actor>().velocity, 0.0);

    {
        let mut session = world.resource_mut::<GameSession>();
        session.begin();
        session.tick_countdown(3.0);
    }
    common::send_command(&mut world, GameCommand::Press);
    run_control(&mut world);
    assert_eq!(world.resource::<Actor>().velocity, -7.0);
}

#[test]
fn press_and_release_set_the_hold_in_any_stage() {
    let mut world = common::create_test_world(Variant::FunFly.config());

    common::send_command(&mut world, GameCommand::Press);
    run_control(&mut world);
    assert_that(&world.resource::<InputIntent>().holding).is_true();
    // Thrust variants never jump
    assert_eq!(world.resource::<Actor>().velocity, 0.0);

    common::send_command(&mut world, GameCommand::Release);
    run_control(&mut world);
    assert_that(&world.resource::<InputIntent>().holding).is_false();
}

#[test]
fn mute_toggles() {
    let mut world = common::create_test_world(Variant::AmitabFly.config());

    common::send_command(&mut world, GameCommand::ToggleMute);
    run_control(&mut world);
    assert_that(&world.resource::<GameSession>().muted).is_true();

    common::send_command(&mut world, GameCommand::ToggleMute);
    run_control(&mut world);
    assert_that(&world.resource::<GameSession>().muted).is_false();
}

#[test]
fn exit_sets_the_exit_flag() {
    let mut world = common::create_test_world(Variant::FunFly.config());

    common::send_command(&mut world, GameCommand::Exit);
    run_control(&mut world);

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}
