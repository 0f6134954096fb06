//! This module owns a mounted game: its ECS world, the frame schedule and the unmount contract.

use std::path::PathBuf;

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use sdl2::event::EventType;
use sdl2::render::{BlendMode, Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use tracing::{debug, info, trace};

use crate::asset::AssetLoader;
use crate::audio::{Audio, AudioBackend};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::platform;
use crate::systems::{
    self, asset_poll_system, audio_system, collision_system, control_system, countdown_system, error_log_system,
    handle_fullscreen_command, hud_render_system, input_system, is_playing, particle_system, physics_system,
    present_system, resize_system, scene_render_system, score_system, scroll_obstacle_system, spawn_obstacle_system,
    Actor, AudioEvent, AudioResource, BackgroundScroll, Bindings, Clock, DeltaTime, GameRng, GameSession, GlobalState,
    InputIntent, Obstacles, Particles, TextureFactory, Textures, TrackState, Viewport, WindowFocus,
};
use crate::variant::VariantConfig;

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// One simulated frame; skipped entirely unless a round is live
    Update,
    /// Gameplay systems that respond to the frame's outcome
    Respond,
}

/// System set for all rendering systems to ensure they run around gameplay logic
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    /// Asset installation and surface resizing, before anything reads the viewport
    Prepare,
    Draw,
    Present,
}

/// The callback handed over by whoever mounted the game.
///
/// It is called at most once, no matter how many times [`ExitHook::fire`] is invoked.
pub struct ExitHook(Option<Box<dyn FnOnce()>>);

impl ExitHook {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(callback)))
    }

    /// Invokes the callback if it has not been invoked yet. Returns whether it ran.
    pub fn fire(&mut self) -> bool {
        match self.0.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.is_none()
    }
}

impl std::fmt::Debug for ExitHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExitHook").field(&if self.is_spent() { "spent" } else { "armed" }).finish()
    }
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// All engine state lives in the `World` as resources, and the `Schedule` runs one
/// frame per [`Game::tick`]. SDL2 objects are stored as `NonSend` resources so they
/// never leave the main thread.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    /// Silences the audio backend, whichever concrete type it is.
    stop_audio: fn(&mut World),
    shut_down: bool,
}

impl Game {
    /// Mounts a game in an SDL2 window.
    ///
    /// Assets for the variant start loading in the background immediately; the game is
    /// playable before they arrive.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if the drawing surface cannot be queried.
    pub fn new(
        config: VariantConfig,
        mut canvas: Canvas<Window>,
        texture_creator: TextureCreator<WindowContext>,
        mut event_pump: EventPump,
        asset_root: PathBuf,
    ) -> GameResult<Game> {
        info!(variant = %config.variant, "Starting game initialization");

        debug!("Disabling unnecessary SDL events");
        Self::disable_sdl_events(&mut event_pump);

        let (width, height) = canvas.output_size().map_err(GameError::Sdl)?;
        canvas.set_blend_mode(BlendMode::Blend);
        let viewport = Viewport::new(width, height);

        debug!("Initializing audio subsystem");
        let audio = Audio::new(config.volumes);
        if audio.is_disabled() {
            debug!("Audio is disabled, the game will run silently");
        }

        let loader = AssetLoader::spawn(asset_root, config.variant, config.assets);

        let mut game = Self::with_backend(config, viewport, audio, platform::rng());

        debug!("Inserting windowing resources");
        let world = &mut game.world;
        world.insert_resource(Bindings::default());
        world.insert_non_send_resource(event_pump);
        world.insert_non_send_resource(canvas);
        world.insert_non_send_resource(TextureFactory(texture_creator));
        world.insert_non_send_resource(Textures::default());
        world.insert_non_send_resource(loader);

        debug!("Configuring windowing systems");
        Self::configure_windowed(&mut game.schedule);

        info!(width, height, "Game initialization completed successfully");
        Ok(game)
    }

    /// Builds a game without a window: no input polling, no drawing, no asset loading.
    ///
    /// Commands are fed with [`Game::send`]. Everything else behaves as in a windowed game.
    pub fn headless<B: AudioBackend + 'static>(
        config: VariantConfig,
        viewport: Viewport,
        backend: B,
        rng: SmallRng,
    ) -> Game {
        Self::with_backend(config, viewport, backend, rng)
    }

    fn with_backend<B: AudioBackend + 'static>(
        config: VariantConfig,
        viewport: Viewport,
        backend: B,
        rng: SmallRng,
    ) -> Game {
        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, config, viewport, rng);
        world.insert_non_send_resource(AudioResource(backend));
        Self::configure_simulation::<B>(&mut schedule);

        Game {
            world,
            schedule,
            stop_audio: stop_audio::<B>,
            shut_down: false,
        }
    }

    fn disable_sdl_events(event_pump: &mut EventPump) {
        for event_type in [
            EventType::JoyAxisMotion,
            EventType::JoyBallMotion,
            EventType::JoyHatMotion,
            EventType::JoyButtonDown,
            EventType::JoyButtonUp,
            EventType::ControllerAxisMotion,
            EventType::ControllerButtonDown,
            EventType::ControllerButtonUp,
            EventType::DollarGesture,
            EventType::DollarRecord,
            EventType::MultiGesture,
            EventType::ClipboardUpdate,
            EventType::DropFile,
            EventType::DropText,
            EventType::TextInput,
            EventType::TextEditing,
            EventType::MouseWheel,
        ] {
            event_pump.disable_event(event_type);
        }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    fn insert_resources(world: &mut World, config: VariantConfig, viewport: Viewport, rng: SmallRng) {
        world.insert_resource(Actor::spawn(&config, &viewport));
        world.insert_resource(config);
        world.insert_resource(viewport);
        world.insert_resource(GameSession::default());
        world.insert_resource(InputIntent::default());
        world.insert_resource(Obstacles::default());
        world.insert_resource(Particles::default());
        world.insert_resource(BackgroundScroll::default());
        world.insert_resource(GameRng(rng));
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(WindowFocus(true));
        world.insert_resource(Clock::default());
        world.insert_resource(DeltaTime { seconds: 0.0 });
        world.insert_resource(TrackState::default());
    }

    fn configure_simulation<B: AudioBackend + 'static>(schedule: &mut Schedule) {
        let particles_enabled = |config: Res<VariantConfig>| config.has_particles();

        schedule
            .add_systems((
                control_system.in_set(GameplaySet::Input),
                (
                    systems::advance_frame_system,
                    physics_system,
                    particle_system.run_if(particles_enabled),
                    spawn_obstacle_system,
                    scroll_obstacle_system,
                    score_system,
                    collision_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (countdown_system, audio_system::<B>).chain().in_set(GameplaySet::Respond),
                error_log_system.in_set(RenderSet::Present),
            ))
            .configure_sets(
                (
                    RenderSet::Prepare,
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(is_playing),
                    GameplaySet::Respond,
                    RenderSet::Draw,
                    RenderSet::Present,
                )
                    .chain(),
            );
    }

    fn configure_windowed(schedule: &mut Schedule) {
        schedule.add_systems((
            (asset_poll_system, resize_system).chain().in_set(RenderSet::Prepare),
            (input_system, handle_fullscreen_command)
                .chain()
                .before(control_system)
                .in_set(GameplaySet::Input),
            (scene_render_system, hud_render_system).chain().in_set(RenderSet::Draw),
            present_system.before(error_log_system).in_set(RenderSet::Present),
        ));
    }

    /// Queues a command for the next frame, as if it came from the player.
    pub fn send(&mut self, command: GameCommand) {
        self.world.resource_mut::<Events<GameEvent>>().send(command.into());
    }

    /// Executes one frame by running every scheduled system.
    ///
    /// # Returns
    ///
    /// `true` if the player asked to leave, `false` to keep going.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt });
        self.world.resource_mut::<Clock>().elapsed += dt;

        self.schedule.run(&mut self.world);

        // Nothing drives the event double-buffers for us, so swap them once per frame
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    /// Stops all audio. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        (self.stop_audio)(&mut self.world);
        info!("Game shut down");
    }

    /// Releases everything the game owns, then hands control back through `hook`.
    ///
    /// Returns whether the hook ran; it never runs twice.
    pub fn unmount(mut self, hook: &mut ExitHook) -> bool {
        self.shutdown();
        drop(self);
        trace!("Game resources released");
        hook.fire()
    }
}

fn stop_audio<B: AudioBackend + 'static>(world: &mut World) {
    if let Some(mut audio) = world.get_non_send_resource_mut::<AudioResource<B>>() {
        audio.0.stop_all();
    }
    if let Some(mut track) = world.get_resource_mut::<TrackState>() {
        *track = TrackState::Stopped;
    }
}
