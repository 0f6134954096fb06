use sdl2::{pixels::Color, rect::Rect, render::Canvas, video::Window};

use glam::Vec2;

use crate::constants::ui::SCORE_Y;
use crate::systems::components::Viewport;
use crate::systems::draw;
use crate::systems::render::Palette;

const SCORE_SCALE: f32 = 6.0;
const COUNTDOWN_SCALE: f32 = 14.0;
/// Offset of the drop shadow behind large digits.
const SHADOW_OFFSET: f32 = 3.0;

/// Large digits with a drop shadow, centered on `center`.
fn shadowed_digits(
    canvas: &mut Canvas<Window>,
    text: &str,
    center: Vec2,
    scale: f32,
    color: Color,
    shadow: Color,
) -> Result<(), String> {
    draw::text_centered(canvas, text, center + Vec2::splat(SHADOW_OFFSET), scale, shadow)?;
    draw::text_centered(canvas, text, center, scale, color)
}

/// The running score at the top center of the screen.
pub fn draw_score(canvas: &mut Canvas<Window>, palette: &Palette, viewport: &Viewport, score: u32) -> Result<(), String> {
    let center = Vec2::new(viewport.width as f32 / 2.0, SCORE_Y as f32);
    shadowed_digits(
        canvas,
        &score.to_string(),
        center,
        SCORE_SCALE,
        palette.text,
        draw::with_alpha(palette.accent, 0.6),
    )
}

/// Veils the whole screen and shows the remaining countdown value in the middle.
pub fn draw_countdown(
    canvas: &mut Canvas<Window>,
    palette: &Palette,
    viewport: &Viewport,
    remaining: u8,
) -> Result<(), String> {
    let screen = Rect::new(0, 0, viewport.width.max(1), viewport.height.max(1));
    draw::fill_rect(canvas, screen, draw::rgba(0, 0, 0, palette.countdown_veil))?;

    let text = remaining.to_string();
    let scale = draw::fit_scale(&text, viewport.width as f32, COUNTDOWN_SCALE);
    shadowed_digits(
        canvas,
        &text,
        viewport.center(),
        scale,
        palette.countdown_text,
        draw::with_alpha(palette.accent, 0.5),
    )
}
