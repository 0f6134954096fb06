use bevy_ecs::{event::Events, system::RunSystemOnce};
use pretty_assertions::assert_eq;
use redline::{
    events::GameCommand,
    systems::{
        audio_system, desired_track, reconcile_track, AudioEvent, AudioResource, GameSession, GameStage, TrackState,
    },
    variant::Variant,
};
use speculoos::prelude::*;

mod common;

use common::{Call, RecordingBackend};

fn run_audio(world: &mut bevy_ecs::world::World) {
    world
        .run_system_once(audio_system::<RecordingBackend>)
        .expect("System should run successfully");
}

fn playing_session(world: &mut bevy_ecs::world::World) {
    let mut session = world.resource_mut::<GameSession>();
    session.begin();
    session.tick_countdown(3.0);
}

#[test]
fn track_plays_only_while_a_round_is_live_and_unmuted() {
    assert_eq!(
        desired_track(TrackState::Stopped, GameStage::Playing, false),
        TrackState::Playing
    );
    assert_eq!(
        desired_track(TrackState::Playing, GameStage::Playing, true),
        TrackState::Paused
    );
    assert_eq!(
        desired_track(TrackState::Playing, GameStage::GameOver, false),
        TrackState::Paused
    );
    assert_eq!(
        desired_track(TrackState::Paused, GameStage::Countdown, false),
        TrackState::Paused
    );
}

#[test]
fn title_screen_rewinds_the_track() {
    assert_eq!(desired_track(TrackState::Playing, GameStage::Start, false), TrackState::Stopped);
    assert_eq!(desired_track(TrackState::Paused, GameStage::Start, false), TrackState::Stopped);
}

#[test]
fn a_track_that_never_started_stays_stopped() {
    assert_eq!(
        desired_track(TrackState::Stopped, GameStage::GameOver, false),
        TrackState::Stopped
    );
    assert_eq!(desired_track(TrackState::Stopped, GameStage::Playing, true), TrackState::Stopped);
}

#[test]
fn reconcile_issues_one_call_per_transition() {
    let mut backend = RecordingBackend::new();

    let state = reconcile_track(&mut backend, TrackState::Stopped, TrackState::Playing);
    let state = reconcile_track(&mut backend, state, TrackState::Paused);
    let state = reconcile_track(&mut backend, state, TrackState::Playing);
    let state = reconcile_track(&mut backend, state, TrackState::Stopped);

    assert_eq!(state, TrackState::Stopped);
    assert_eq!(backend.calls(), vec![Call::Start, Call::Pause, Call::Resume, Call::Halt]);
}

#[test]
fn reconcile_without_a_loaded_track_stays_stopped() {
    let mut backend = RecordingBackend::without_music();

    let state = reconcile_track(&mut backend, TrackState::Stopped, TrackState::Playing);

    assert_eq!(state, TrackState::Stopped);
    assert_that(&backend.calls()).is_empty();
}

#[test]
fn reconcile_to_the_current_state_does_nothing() {
    let mut backend = RecordingBackend::new();

    for state in [TrackState::Stopped, TrackState::Playing, TrackState::Paused] {
        assert_eq!(reconcile_track(&mut backend, state, state), state);
    }
    assert_that(&backend.calls()).is_empty();
}

#[test]
fn muting_mid_round_pauses_and_unmuting_resumes() {
    let mut world = common::create_test_world(Variant::FunFly.config());
    let backend = common::insert_recording_backend(&mut world);
    playing_session(&mut world);

    run_audio(&mut world);
    world.resource_mut::<GameSession>().muted = true;
    run_audio(&mut world);
    world.resource_mut::<GameSession>().muted = false;
    run_audio(&mut world);

    assert_eq!(backend.calls(), vec![Call::Start, Call::Pause, Call::Resume]);
    assert_eq!(*world.resource::<TrackState>(), TrackState::Playing);
}

#[test]
fn crash_plays_the_effect_and_pauses_the_track() {
    let mut world = common::create_test_world(Variant::DkFly.config());
    let backend = common::insert_recording_backend(&mut world);
    playing_session(&mut world);
    run_audio(&mut world);

    world.resource_mut::<GameSession>().end();
    world.resource_mut::<Events<AudioEvent>>().send(AudioEvent::Crash);
    run_audio(&mut world);

    assert_eq!(backend.calls(), vec![Call::Start, Call::Effect, Call::Pause]);
}

#[test]
fn crash_effect_is_skipped_while_muted() {
    let mut world = common::create_test_world(Variant::DkFly.config());
    let backend = common::insert_recording_backend(&mut world);
    playing_session(&mut world);
    world.resource_mut::<GameSession>().muted = true;

    world.resource_mut::<GameSession>().end();
    world.resource_mut::<Events<AudioEvent>>().send(AudioEvent::Crash);
    run_audio(&mut world);

    assert_that(&backend.calls()).is_empty();
    assert_eq!(*world.resource::<TrackState>(), TrackState::Stopped);
}

#[test]
fn late_loading_track_starts_on_a_later_frame() {
    let mut world = common::create_test_world(Variant::AmitabFly.config());
    world.insert_non_send_resource(AudioResource(RecordingBackend::without_music()));
    playing_session(&mut world);

    run_audio(&mut world);
    assert_eq!(*world.resource::<TrackState>(), TrackState::Stopped);

    let backend = RecordingBackend::new();
    world.insert_non_send_resource(AudioResource(backend.clone()));
    run_audio(&mut world);

    assert_eq!(backend.calls(), vec![Call::Start]);
    assert_eq!(*world.resource::<TrackState>(), TrackState::Playing);
}

#[test]
fn headless_game_mutes_and_unmutes_through_commands() {
    let (mut game, backend) = common::headless_game(Variant::FunFly);
    common::start_round(&mut game);

    game.send(GameCommand::ToggleMute);
    game.tick(1.0 / 60.0);
    game.send(GameCommand::ToggleMute);
    game.tick(1.0 / 60.0);

    assert_eq!(backend.calls(), vec![Call::Start, Call::Pause, Call::Resume]);
}
