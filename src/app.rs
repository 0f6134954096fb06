use std::time::{Duration, Instant};

use sdl2::image::{InitFlag, Sdl2ImageContext};
use sdl2::video::FullscreenType;
use sdl2::{AudioSubsystem, Sdl};
use tracing::{debug, info, trace, warn};

use crate::asset;
use crate::constants::{LOOP_TIME, WINDOW_SIZE, WINDOW_TITLE};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::{ExitHook, Game};
use crate::platform;
use crate::systems::WindowFocus;
use crate::variant::Variant;

/// How the host wants the window to appear.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub fullscreen: bool,
}

/// Main application wrapper that manages SDL initialization, the window, and the frame loop.
///
/// The app is the mount point: it owns one game and the exit callback of whoever mounted it.
pub struct App {
    game: Option<Game>,
    on_exit: ExitHook,
    last_tick: Instant,
    // Keep SDL alive for the app lifetime so subsystems (audio) are not shut down
    _image_context: Sdl2ImageContext,
    _audio_subsystem: AudioSubsystem,
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL subsystems, creates the game window, and mounts `variant` in it.
    ///
    /// `on_exit` runs once, after the game has released its resources, when the player
    /// leaves voluntarily. It never runs on game over.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(variant: Variant, options: AppOptions, on_exit: impl FnOnce() + 'static) -> GameResult<Self> {
        info!(%variant, "Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let audio_subsystem = sdl_context.audio().map_err(GameError::Sdl)?;
        let image_context = sdl2::image::init(InitFlag::PNG | InitFlag::JPG).map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        trace!(width = WINDOW_SIZE.x, height = WINDOW_SIZE.y, "Creating game window");
        let mut window = video_subsystem
            .window(&format!("{} - {}", WINDOW_TITLE, variant.title()), WINDOW_SIZE.x, WINDOW_SIZE.y)
            .resizable()
            .allow_highdpi()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        if options.fullscreen {
            if let Err(e) = window.set_fullscreen(FullscreenType::Desktop) {
                warn!(error = %e, "Could not start in fullscreen, continuing windowed");
            }
        }

        trace!("Creating hardware-accelerated canvas");
        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        trace!("Creating texture factory");
        let texture_creator = canvas.texture_creator();

        let game = Game::new(variant.config(), canvas, texture_creator, event_pump, asset::asset_root())?;

        info!("Application initialization completed successfully");
        Ok(App {
            game: Some(game),
            on_exit: ExitHook::new(on_exit),
            last_tick: Instant::now(),
            _image_context: image_context,
            _audio_subsystem: audio_subsystem,
            _sdl_context: sdl_context,
        })
    }

    /// Executes a single frame of the game loop with consistent timing.
    ///
    /// When the player asks to leave, the game is unmounted and the exit callback fires
    /// before this returns.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` once it has been unmounted.
    pub fn run(&mut self) -> bool {
        let Some(game) = self.game.as_mut() else {
            return false;
        };

        let start = Instant::now();
        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        // Advance the frame counter shown in log lines
        formatter::advance_frame();

        if game.tick(dt) {
            self.unmount();
            return false;
        }

        let focused = game.world.get_resource::<WindowFocus>().map_or(true, |focus| focus.0);

        // Sleep if we still have time left
        let time = LOOP_TIME.saturating_sub(start.elapsed());
        if time != Duration::ZERO {
            platform::sleep(time, focused);
        }

        true
    }

    fn unmount(&mut self) {
        if let Some(game) = self.game.take() {
            info!("Unmounting game");
            game.unmount(&mut self.on_exit);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // An app dropped without the player leaving releases the game but keeps the callback silent
        if let Some(mut game) = self.game.take() {
            game.shutdown();
        }
    }
}
