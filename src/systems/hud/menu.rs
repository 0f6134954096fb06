use bevy_ecs::{
    event::EventWriter,
    system::{NonSendMut, Res},
};
use glam::Vec2;
use sdl2::{gfx::primitives::DrawRenderer, pixels::Color, rect::Rect, render::Canvas, video::Window};

use crate::error::{GameError, TextureError};
use crate::systems::{
    components::Viewport,
    draw,
    hud::{draw_countdown, draw_score},
    layout::Layout,
    render::Palette,
    state::{GameSession, GameStage},
};
use crate::variant::VariantConfig;

const PANEL_RADIUS: i16 = 16;
const BUTTON_RADIUS: i16 = 10;
const TITLE_SCALE: f32 = 4.0;
const HEADING_SCALE: f32 = 3.0;
const RESULT_SCALE: f32 = 6.0;
const BUTTON_TEXT_SCALE: f32 = 2.0;
/// Horizontal breathing room inside the panel for text.
const PANEL_PADDING: f32 = 24.0;

fn rounded_panel(canvas: &mut Canvas<Window>, rect: Rect, radius: i16, fill: Color, border: Color) -> Result<(), String> {
    let (x1, y1) = (rect.left() as i16, rect.top() as i16);
    let (x2, y2) = ((rect.right() - 1) as i16, (rect.bottom() - 1) as i16);
    canvas.rounded_box(x1, y1, x2, y2, radius, fill)?;
    canvas.rounded_rectangle(x1, y1, x2, y2, radius, border)
}

/// A line of text shrunk as needed to fit inside the panel.
fn panel_text(
    canvas: &mut Canvas<Window>,
    panel: Rect,
    text: &str,
    y: f32,
    preferred: f32,
    color: Color,
) -> Result<(), String> {
    let scale = draw::fit_scale(text, panel.width() as f32 - 2.0 * PANEL_PADDING, preferred);
    draw::text_centered(canvas, text, Vec2::new(panel.center().x() as f32, y), scale, color)
}

fn action_button(canvas: &mut Canvas<Window>, palette: &Palette, rect: Rect, label: &str) -> Result<(), String> {
    rounded_panel(canvas, rect, BUTTON_RADIUS, palette.accent, palette.accent)?;
    let center = rect.center();
    let scale = draw::fit_scale(label, rect.width() as f32 - 16.0, BUTTON_TEXT_SCALE);
    draw::text_centered(
        canvas,
        label,
        Vec2::new(center.x() as f32, center.y() as f32),
        scale,
        Color::BLACK,
    )
}

fn title_panel(
    canvas: &mut Canvas<Window>,
    config: &VariantConfig,
    palette: &Palette,
    layout: &Layout,
    high_score: u32,
) -> Result<(), String> {
    let panel = layout.panel;
    let top = panel.top() as f32;
    rounded_panel(canvas, panel, PANEL_RADIUS, palette.panel, palette.accent)?;

    panel_text(canvas, panel, config.copy.title, top + 60.0, TITLE_SCALE, palette.accent)?;
    panel_text(canvas, panel, config.copy.tagline, top + 110.0, 1.0, palette.text)?;
    if high_score > 0 {
        let best = format!("{}: {}", config.copy.high_score_label, high_score);
        panel_text(canvas, panel, &best, top + 150.0, 2.0, palette.text)?;
    }

    action_button(canvas, palette, layout.action, config.copy.begin)
}

fn results_panel(
    canvas: &mut Canvas<Window>,
    config: &VariantConfig,
    palette: &Palette,
    layout: &Layout,
    session: &GameSession,
) -> Result<(), String> {
    let panel = layout.panel;
    let top = panel.top() as f32;
    rounded_panel(canvas, panel, PANEL_RADIUS, palette.panel, palette.accent)?;

    panel_text(canvas, panel, config.copy.game_over, top + 50.0, HEADING_SCALE, palette.accent)?;
    panel_text(canvas, panel, &session.score.to_string(), top + 115.0, RESULT_SCALE, palette.text)?;
    let best = format!("{}: {}", config.copy.high_score_label, session.high_score);
    panel_text(canvas, panel, &best, top + 175.0, 2.0, palette.text)?;

    action_button(canvas, palette, layout.action, config.copy.retry)
}

/// Speaker glyph, crossed out while muted.
fn mute_button(canvas: &mut Canvas<Window>, palette: &Palette, rect: Rect, muted: bool) -> Result<(), String> {
    rounded_panel(canvas, rect, BUTTON_RADIUS, draw::rgba(0, 0, 0, 0.5), palette.accent)?;

    let c = Vec2::new(rect.center().x() as f32, rect.center().y() as f32);
    let speaker = [
        c + Vec2::new(-10.0, -4.0),
        c + Vec2::new(-4.0, -4.0),
        c + Vec2::new(3.0, -10.0),
        c + Vec2::new(3.0, 10.0),
        c + Vec2::new(-4.0, 4.0),
        c + Vec2::new(-10.0, 4.0),
    ];
    draw::rotated_polygon(canvas, Vec2::ZERO, 0.0, &speaker, palette.text)?;

    if muted {
        let (x, y) = (c.x as i16, c.y as i16);
        canvas.thick_line(x + 6, y - 6, x + 12, y + 6, 2, palette.accent)?;
        canvas.thick_line(x + 6, y + 6, x + 12, y - 6, 2, palette.accent)
    } else {
        let (x, y) = (c.x as i16, c.y as i16);
        canvas.arc(x + 3, y, 7, -45, 45, palette.text)?;
        canvas.arc(x + 3, y, 11, -45, 45, palette.text)
    }
}

fn exit_button(canvas: &mut Canvas<Window>, palette: &Palette, rect: Rect) -> Result<(), String> {
    rounded_panel(canvas, rect, BUTTON_RADIUS, draw::rgba(0, 0, 0, 0.5), palette.accent)?;

    let (x, y) = (rect.center().x() as i16, rect.center().y() as i16);
    canvas.thick_line(x - 8, y - 8, x + 8, y + 8, 3, palette.text)?;
    canvas.thick_line(x - 8, y + 8, x + 8, y - 8, 3, palette.text)
}

/// Draws the overlays for the current stage, then the always-present corner buttons.
pub fn hud_render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    config: Res<VariantConfig>,
    session: Res<GameSession>,
    viewport: Res<Viewport>,
    mut errors: EventWriter<GameError>,
) {
    let canvas = &mut *canvas;
    let palette = Palette::for_variant(config.variant);
    let layout = Layout::new(&viewport);

    let mut frame = || -> Result<(), String> {
        match session.stage {
            GameStage::Start => title_panel(canvas, &config, &palette, &layout, session.high_score)?,
            GameStage::Countdown => draw_countdown(canvas, &palette, &viewport, session.countdown)?,
            GameStage::Playing => draw_score(canvas, &palette, &viewport, session.score)?,
            GameStage::GameOver => results_panel(canvas, &config, &palette, &layout, &session)?,
        }

        mute_button(canvas, &palette, layout.mute, session.muted)?;
        exit_button(canvas, &palette, layout.exit)
    };

    if let Err(e) = frame() {
        errors.write(TextureError::RenderFailed(format!("Failed to render HUD: {}", e)).into());
    }
}
