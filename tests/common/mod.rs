#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::{event::Events, world::World};
use rand::{rngs::SmallRng, SeedableRng};
use redline::{
    audio::AudioBackend,
    error::GameError,
    events::{GameCommand, GameEvent},
    game::Game,
    systems::{
        Actor, AudioEvent, AudioResource, BackgroundScroll, Clock, DeltaTime, GameRng, GameSession, GlobalState,
        InputIntent, Obstacles, Particles, TrackState, Viewport,
    },
    variant::{Variant, VariantConfig},
};

pub const TEST_WIDTH: u32 = 480;
pub const TEST_HEIGHT: u32 = 800;
pub const TEST_SEED: u64 = 0x5EED;

/// One call made on a [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Start,
    Pause,
    Resume,
    Halt,
    Effect,
    StopAll,
}

/// Audio backend that remembers every call, shared with the test through an `Rc`.
#[derive(Clone)]
pub struct RecordingBackend {
    pub calls: Rc<RefCell<Vec<Call>>>,
    /// Whether a background track is "loaded"; without one, starting fails.
    pub has_music: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            has_music: true,
        }
    }

    pub fn without_music() -> Self {
        Self {
            has_music: false,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl AudioBackend for RecordingBackend {
    fn start_music(&mut self) -> bool {
        if self.has_music {
            self.record(Call::Start);
        }
        self.has_music
    }

    fn pause_music(&mut self) {
        self.record(Call::Pause);
    }

    fn resume_music(&mut self) {
        self.record(Call::Resume);
    }

    fn halt_music(&mut self) {
        self.record(Call::Halt);
    }

    fn play_effect(&mut self) {
        self.record(Call::Effect);
    }

    fn stop_all(&mut self) {
        self.record(Call::StopAll);
    }
}

pub fn test_viewport() -> Viewport {
    Viewport::new(TEST_WIDTH, TEST_HEIGHT)
}

pub fn test_rng() -> SmallRng {
    SmallRng::seed_from_u64(TEST_SEED)
}

/// A bare world holding every simulation resource for `config`, for running single systems.
pub fn create_test_world(config: VariantConfig) -> World {
    let mut world = World::new();
    let viewport = test_viewport();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(Actor::spawn(&config, &viewport));
    world.insert_resource(config);
    world.insert_resource(viewport);
    world.insert_resource(GameSession::default());
    world.insert_resource(InputIntent::default());
    world.insert_resource(Obstacles::default());
    world.insert_resource(Particles::default());
    world.insert_resource(BackgroundScroll::default());
    world.insert_resource(GameRng(test_rng()));
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(Clock::default());
    world.insert_resource(DeltaTime { seconds: 1.0 / 60.0 });
    world.insert_resource(TrackState::default());

    world
}

/// Adds a recording audio backend to a world built by [`create_test_world`].
pub fn insert_recording_backend(world: &mut World) -> RecordingBackend {
    let backend = RecordingBackend::new();
    world.insert_non_send_resource(AudioResource(backend.clone()));
    backend
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

pub fn send_command(world: &mut World, command: GameCommand) {
    send_game_event(world, GameEvent::Command(command));
}

/// A headless game for `variant` with a recording backend.
pub fn headless_game(variant: Variant) -> (Game, RecordingBackend) {
    let backend = RecordingBackend::new();
    let game = Game::headless(variant.config(), test_viewport(), backend.clone(), test_rng());
    (game, backend)
}

/// Ticks until the countdown has finished and the first simulated frame is due.
pub fn start_round(game: &mut Game) {
    game.send(GameCommand::Begin);
    game.tick(1.0 / 60.0);
    for _ in 0..3 {
        game.tick(1.0);
    }
}

pub fn session(game: &Game) -> &GameSession {
    game.world.resource::<GameSession>()
}
