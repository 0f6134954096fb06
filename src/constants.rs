//! This module contains the engine-wide constants that do not vary between games.

use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Initial window size, in pixels. The window is resizable; everything reads the live viewport.
pub const WINDOW_SIZE: UVec2 = UVec2::new(480, 800);

pub const WINDOW_TITLE: &str = "RedLine Galaxy";

/// Countdown timing between "begin" and the first simulated frame.
pub mod countdown {
    /// The value shown when the countdown starts.
    pub const START: u8 = 3;
    /// Real time per countdown step, in seconds.
    pub const STEP_SECONDS: f32 = 1.0;
}

/// Layout of the on-screen controls and HUD.
pub mod ui {
    /// Baseline of the score readout while playing.
    pub const SCORE_Y: i32 = 100;
    /// Side length of the square mute and exit buttons.
    pub const CORNER_BUTTON_SIZE: u32 = 44;
    /// Distance between the corner buttons and the window edges.
    pub const CORNER_BUTTON_MARGIN: i32 = 16;
    pub const ACTION_BUTTON_SIZE: (u32, u32) = (280, 56);
    pub const PANEL_SIZE: (u32, u32) = (340, 320);
    /// Amplitude of the idle hover, in pixels.
    pub const IDLE_BOB_AMPLITUDE: f32 = 15.0;
    /// Milliseconds per radian of the idle hover.
    pub const IDLE_BOB_PERIOD_MS: f32 = 300.0;
}
