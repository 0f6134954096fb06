use bevy_ecs::{
    event::EventWriter,
    system::{NonSendMut, ResMut},
};
use sdl2::{pixels::Color, render::Canvas, video::Window};
use tracing::debug;

use crate::error::GameError;
use crate::systems::components::Viewport;

/// Keeps the viewport in step with the drawable size of the window.
///
/// Runs before anything is drawn, so a frame never mixes two sizes. The surface is
/// cleared when the size changes.
pub fn resize_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    mut viewport: ResMut<Viewport>,
    mut errors: EventWriter<GameError>,
) {
    let (width, height) = match canvas.output_size() {
        Ok(size) => size,
        Err(e) => {
            errors.write(GameError::Sdl(format!("Failed to query output size: {}", e)));
            return;
        }
    };

    // Compare without touching change detection on quiet frames
    if viewport.width == width && viewport.height == height {
        return;
    }

    viewport.resize(width, height);
    debug!(width, height, "Viewport resized");
    canvas.set_draw_color(Color::BLACK);
    canvas.clear();
}
