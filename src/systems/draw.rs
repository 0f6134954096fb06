//! Immediate-mode drawing helpers on top of the SDL2 renderer and SDL2_gfx.
//!
//! Every helper returns SDL's `String` error so callers can bail out of a frame with `?`.

use glam::Vec2;
use sdl2::{
    gfx::primitives::DrawRenderer,
    pixels::Color,
    rect::Rect,
    render::Canvas,
    video::Window,
};

/// Glyph size of the built-in SDL2_gfx font.
pub const GLYPH_SIZE: u32 = 8;

/// Segments used when approximating an ellipse with a polygon.
const ELLIPSE_SEGMENTS: usize = 24;

/// A color stop at `offset` in `[0, 1]`.
pub type Stop = (f32, Color);

pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Color {
    Color::RGBA(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    rgba(color.r, color.g, color.b, alpha * color.a as f32 / 255.0)
}

pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::RGBA(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b), mix(from.a, to.a))
}

/// Samples a multi-stop gradient. Stops must be sorted by offset.
pub fn sample_gradient(stops: &[Stop], t: f32) -> Color {
    let Some(&(first_offset, first)) = stops.first() else {
        return Color::BLACK;
    };
    if t <= first_offset {
        return first;
    }

    for pair in stops.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        if t <= end {
            let span = (end - start).max(f32::EPSILON);
            return lerp_color(from, to, (t - start) / span);
        }
    }

    stops.last().map(|&(_, color)| color).unwrap_or(first)
}

pub fn fill_rect(canvas: &mut Canvas<Window>, rect: Rect, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    canvas.fill_rect(rect)
}

/// Outlines `rect` with a border `width` pixels thick, drawn inwards.
pub fn stroke_rect(canvas: &mut Canvas<Window>, rect: Rect, width: u32, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    for inset in 0..width.min(rect.width() / 2).min(rect.height() / 2) {
        let i = inset as i32;
        let ring = Rect::new(
            rect.x() + i,
            rect.y() + i,
            rect.width() - 2 * inset,
            rect.height() - 2 * inset,
        );
        canvas.draw_rect(ring)?;
    }
    Ok(())
}

/// Fills `rect` with a gradient running top to bottom.
pub fn vertical_gradient(canvas: &mut Canvas<Window>, rect: Rect, stops: &[Stop]) -> Result<(), String> {
    let height = rect.height().max(1) as f32;
    for row in 0..rect.height() {
        canvas.set_draw_color(sample_gradient(stops, row as f32 / height));
        let y = rect.y() + row as i32;
        canvas.draw_line((rect.x(), y), (rect.right() - 1, y))?;
    }
    Ok(())
}

/// Fills `rect` with a gradient running left to right.
pub fn horizontal_gradient(canvas: &mut Canvas<Window>, rect: Rect, stops: &[Stop]) -> Result<(), String> {
    let width = rect.width().max(1) as f32;
    for column in 0..rect.width() {
        canvas.set_draw_color(sample_gradient(stops, column as f32 / width));
        let x = rect.x() + column as i32;
        canvas.draw_line((x, rect.y()), (x, rect.bottom() - 1))?;
    }
    Ok(())
}

/// Fills a polygon given in local coordinates, rotated by `rotation` radians about `origin`.
pub fn rotated_polygon(
    canvas: &mut Canvas<Window>,
    origin: Vec2,
    rotation: f32,
    points: &[Vec2],
    color: Color,
) -> Result<(), String> {
    let turn = Vec2::from_angle(rotation);
    let (xs, ys): (Vec<i16>, Vec<i16>) = points
        .iter()
        .map(|&point| {
            let world = origin + turn.rotate(point);
            (world.x.round() as i16, world.y.round() as i16)
        })
        .unzip();
    canvas.filled_polygon(&xs, &ys, color)
}

/// Fills an ellipse centered at `center` (local coordinates), rotated about `origin`.
pub fn rotated_ellipse(
    canvas: &mut Canvas<Window>,
    origin: Vec2,
    rotation: f32,
    center: Vec2,
    radii: Vec2,
    color: Color,
) -> Result<(), String> {
    let points: Vec<Vec2> = (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos() * radii.x, angle.sin() * radii.y)
        })
        .collect();
    rotated_polygon(canvas, origin, rotation, &points, color)
}

pub fn filled_circle(canvas: &mut Canvas<Window>, center: Vec2, radius: f32, color: Color) -> Result<(), String> {
    canvas.filled_circle(center.x.round() as i16, center.y.round() as i16, radius.round() as i16, color)
}

/// Pixel width of `text` in the built-in font at `scale`.
pub fn text_width(text: &str, scale: f32) -> f32 {
    text.chars().count() as f32 * GLYPH_SIZE as f32 * scale
}

/// Draws `text` centered on `center`, magnified by `scale`.
pub fn text_centered(
    canvas: &mut Canvas<Window>,
    text: &str,
    center: Vec2,
    scale: f32,
    color: Color,
) -> Result<(), String> {
    let scale = scale.max(1.0);
    let origin = Vec2::new(
        center.x - text_width(text, scale) / 2.0,
        center.y - GLYPH_SIZE as f32 * scale / 2.0,
    ) / scale;

    canvas.set_scale(scale, scale)?;
    let drawn = canvas.string(origin.x.round() as i16, origin.y.round() as i16, text, color);
    canvas.set_scale(1.0, 1.0)?;
    drawn
}

/// The largest whole scale up to `preferred` at which `text` fits in `max_width` pixels.
pub fn fit_scale(text: &str, max_width: f32, preferred: f32) -> f32 {
    let natural = text_width(text, 1.0);
    if natural <= 0.0 {
        return preferred.max(1.0);
    }
    (max_width / natural).floor().clamp(1.0, preferred.max(1.0))
}
