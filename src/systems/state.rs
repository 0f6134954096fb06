use bevy_ecs::{
    event::EventReader,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use sdl2::render::Canvas;
use sdl2::video::{FullscreenType, Window};
use strum_macros::Display;
use tracing::{debug, info};

use crate::constants::countdown;
use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{BackgroundScroll, DeltaTime};
use crate::variant::VariantConfig;

/// The high-level phase of a mounted game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStage {
    /// Title screen; the actor idles and nothing is simulated.
    Start,
    /// Real-time countdown before the first simulated frame.
    Countdown,
    Playing,
    /// The actor crashed; the last frame stays on screen under the results panel.
    GameOver,
}

/// Everything about the current session that outlives a single round.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameSession {
    pub stage: GameStage,
    /// Simulated frames in the current round.
    pub frame_count: u64,
    pub score: u32,
    /// Best score since mount. Never decreases and is never persisted.
    pub high_score: u32,
    pub muted: bool,
    /// Value shown on the countdown overlay.
    pub countdown: u8,
    countdown_elapsed: f32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            stage: GameStage::Start,
            frame_count: 0,
            score: 0,
            high_score: 0,
            muted: false,
            countdown: countdown::START,
            countdown_elapsed: 0.0,
        }
    }
}

impl GameSession {
    pub fn is_playing(&self) -> bool {
        self.stage == GameStage::Playing
    }

    /// Whether "begin" is meaningful right now (title screen or after a crash).
    pub fn can_begin(&self) -> bool {
        matches!(self.stage, GameStage::Start | GameStage::GameOver)
    }

    /// Enters the countdown, clearing the round counters.
    ///
    /// Returns `false` and changes nothing if a round is already underway.
    pub fn begin(&mut self) -> bool {
        if !self.can_begin() {
            return false;
        }

        self.stage = GameStage::Countdown;
        self.countdown = countdown::START;
        self.countdown_elapsed = 0.0;
        self.score = 0;
        self.frame_count = 0;
        true
    }

    /// Feeds real time into the countdown, one step per elapsed second.
    ///
    /// Returns `true` on the call that moves the session into [`GameStage::Playing`].
    pub fn tick_countdown(&mut self, seconds: f32) -> bool {
        if self.stage != GameStage::Countdown {
            return false;
        }

        self.countdown_elapsed += seconds;
        while self.countdown_elapsed >= countdown::STEP_SECONDS && self.countdown > 0 {
            self.countdown_elapsed -= countdown::STEP_SECONDS;
            self.countdown -= 1;
        }

        if self.countdown == 0 {
            self.stage = GameStage::Playing;
            self.countdown_elapsed = 0.0;
            return true;
        }
        false
    }

    /// Ends the round after a crash and folds the score into the high score.
    ///
    /// Returns `false` if no round was being played.
    pub fn end(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.stage = GameStage::GameOver;
        self.high_score = self.high_score.max(self.score);
        true
    }
}

/// Run condition for systems that only simulate while a round is live.
pub fn is_playing(session: Res<GameSession>) -> bool {
    session.is_playing()
}

pub fn countdown_system(time: Res<DeltaTime>, mut session: ResMut<GameSession>) {
    let before = session.countdown;
    if session.tick_countdown(time.seconds) {
        info!("Countdown finished, round started");
    } else if session.countdown != before {
        debug!(remaining = session.countdown, "Countdown step");
    }
}

/// Counts the simulated frame and scrolls the background. First system of every simulated frame.
pub fn advance_frame_system(
    config: Res<VariantConfig>,
    mut session: ResMut<GameSession>,
    mut scroll: ResMut<BackgroundScroll>,
) {
    session.frame_count += 1;
    scroll.0 += config.background_scroll;
}

pub fn handle_fullscreen_command(mut events: EventReader<GameEvent>, mut canvas: NonSendMut<Canvas<Window>>) {
    for event in events.read() {
        if let GameEvent::Command(GameCommand::ToggleFullscreen) = event {
            let window = canvas.window_mut();
            let target = match window.fullscreen_state() {
                FullscreenType::Off => FullscreenType::Desktop,
                _ => FullscreenType::Off,
            };

            if let Err(e) = window.set_fullscreen(target) {
                tracing::warn!(error = ?e, "Failed to toggle fullscreen");
            } else {
                info!(fullscreen = target != FullscreenType::Off, "Toggled fullscreen");
            }
        }
    }
}
