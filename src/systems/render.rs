//! Draws the playfield: backdrop, obstacles, exhaust and the actor.
//!
//! The HUD and menus are layered on top by [`crate::systems::hud`].

use bevy_ecs::{
    event::EventWriter,
    system::{NonSend, NonSendMut, Res},
};
use glam::Vec2;
use rand::Rng;
use sdl2::{
    pixels::Color,
    rect::Rect,
    render::{BlendMode, Canvas},
    video::Window,
};

use crate::constants::ui::{IDLE_BOB_AMPLITUDE, IDLE_BOB_PERIOD_MS};
use crate::error::{GameError, TextureError};
use crate::systems::{
    assets::Textures,
    components::{Actor, BackgroundScroll, Clock, InputIntent, Obstacle, Obstacles, Particles, Viewport},
    draw::{self, rgba, Stop},
    state::{GameSession, GameStage},
};
use crate::variant::{Variant, VariantConfig};

/// Colors shared by the playfield and the HUD of one game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Solid fill behind everything when no background image is drawn.
    pub backdrop: Color,
    /// Outlines, button borders and highlighted text.
    pub accent: Color,
    pub text: Color,
    pub panel: Color,
    /// Opacity of the black veil behind the countdown digits.
    pub countdown_veil: f32,
    pub countdown_text: Color,
}

impl Palette {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::FunFly => Palette {
                backdrop: Color::RGB(0x23, 0x0F, 0x12),
                accent: Color::RGB(0xFF, 0x4C, 0x29),
                text: Color::WHITE,
                panel: rgba(0x23, 0x0F, 0x12, 0.9),
                countdown_veil: 0.5,
                countdown_text: Color::WHITE,
            },
            Variant::DkFly => Palette {
                backdrop: Color::RGB(0x80, 0x00, 0x00),
                accent: Color::RGB(0xFF, 0xD7, 0x00),
                text: Color::WHITE,
                panel: rgba(0x40, 0x00, 0x00, 0.9),
                countdown_veil: 0.6,
                countdown_text: Color::RGB(0xFF, 0x99, 0x33),
            },
            Variant::AmitabFly => Palette {
                backdrop: Color::RGB(0x1A, 0x1A, 0x1A),
                accent: Color::RGB(0xFF, 0xD7, 0x00),
                text: Color::WHITE,
                panel: rgba(0x00, 0x00, 0x00, 0.85),
                countdown_veil: 0.7,
                countdown_text: Color::WHITE,
            },
        }
    }
}

/// Where and how the actor is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
    /// The thruster flame is lit.
    pub thrusting: bool,
}

/// The actor's on-screen pose for `stage`.
///
/// Before a round the actor hovers on a sine wave around the center line; afterwards it is
/// drawn where the simulation left it.
pub fn actor_pose(
    variant: Variant,
    stage: GameStage,
    actor: &Actor,
    viewport: &Viewport,
    millis: f32,
    holding: bool,
) -> Pose {
    match stage {
        GameStage::Start | GameStage::Countdown => Pose {
            position: Vec2::new(
                actor.x,
                viewport.height as f32 / 2.0 + (millis / IDLE_BOB_PERIOD_MS).sin() * IDLE_BOB_AMPLITUDE,
            ),
            rotation: 0.0,
            thrusting: false,
        },
        GameStage::Playing => Pose {
            position: Vec2::new(actor.x, actor.y),
            rotation: actor.rotation,
            thrusting: holding,
        },
        GameStage::GameOver => Pose {
            position: Vec2::new(actor.x, actor.y),
            // The pod slumps nose-down when it dies
            rotation: if variant == Variant::FunFly { 0.5 } else { actor.rotation },
            thrusting: false,
        },
    }
}

fn draw_starfield(canvas: &mut Canvas<Window>, viewport: &Viewport, seconds: f32) -> Result<(), String> {
    let (width, height) = (viewport.width.max(1) as f32, viewport.height.max(1) as f32);

    for (layer, speed) in [0.5_f32, 1.0, 2.0].into_iter().enumerate() {
        canvas.set_draw_color(draw::rgba(255, 255, 255, 0.2 * speed));
        let size = (2.0 * speed).round().max(1.0) as u32;
        for i in 0..20 {
            let x = (i as f32 * 100.0 + seconds * 50.0 * speed) % width;
            let y = (i as f32 * 67.0 + layer as f32 * 100.0) % height;
            canvas.fill_rect(Rect::new(x as i32, y as i32, size, size))?;
        }
    }

    const GRID_SIZE: i32 = 50;
    let offset = (seconds * 1000.0 * 0.1) % GRID_SIZE as f32;
    canvas.set_draw_color(draw::rgba(255, 76, 41, 0.1));
    let mut i = 0;
    while i < viewport.width as i32 + GRID_SIZE {
        let top = i as f32 - offset;
        canvas.draw_line((top as i32, 0), ((top - 100.0) as i32, viewport.height as i32))?;
        i += GRID_SIZE;
    }
    Ok(())
}

/// Draws a background image twice side by side, shifted by `offset` so it wraps seamlessly.
fn draw_scrolling_image(
    canvas: &mut Canvas<Window>,
    texture: &sdl2::render::Texture,
    viewport: &Viewport,
    scroll: f32,
) -> Result<(), String> {
    let width = viewport.width.max(1);
    let offset = (scroll % width as f32) as i32;
    canvas.copy(texture, None, Rect::new(-offset, 0, width, viewport.height.max(1)))?;
    canvas.copy(texture, None, Rect::new(width as i32 - offset, 0, width, viewport.height.max(1)))
}

fn draw_background(
    canvas: &mut Canvas<Window>,
    variant: Variant,
    textures: &Textures,
    viewport: &Viewport,
    scroll: f32,
    seconds: f32,
) -> Result<(), String> {
    let palette = Palette::for_variant(variant);
    let screen = Rect::new(0, 0, viewport.width.max(1), viewport.height.max(1));

    match (variant, textures.background.as_ref()) {
        (Variant::FunFly, _) => {
            draw::fill_rect(canvas, screen, palette.backdrop)?;
            draw_starfield(canvas, viewport, seconds)
        }
        (Variant::DkFly, Some(texture)) => {
            draw_scrolling_image(canvas, texture, viewport, scroll)?;
            draw::fill_rect(canvas, screen, rgba(255, 153, 51, 0.2))
        }
        (Variant::DkFly, None) => draw::vertical_gradient(
            canvas,
            screen,
            &[(0.0, Color::RGB(0xFF, 0x99, 0x33)), (1.0, Color::RGB(0x80, 0x00, 0x00))],
        ),
        (Variant::AmitabFly, Some(texture)) => {
            draw_scrolling_image(canvas, texture, viewport, scroll)?;
            draw::fill_rect(canvas, screen, rgba(0, 0, 0, 0.3))
        }
        (Variant::AmitabFly, None) => draw::fill_rect(canvas, screen, palette.backdrop),
    }
}

const FUNFLY_PIPE: &[Stop] = &[
    (0.0, Color::RGB(0x3A, 0x1A, 0x20)),
    (0.5, Color::RGB(0x5C, 0x2E, 0x36)),
    (1.0, Color::RGB(0x3A, 0x1A, 0x20)),
];

const DK_PILLAR: &[Stop] = &[
    (0.0, Color::RGB(0x8B, 0x00, 0x00)),
    (0.3, Color::RGB(0xFF, 0x45, 0x00)),
    (0.5, Color::RGB(0xFF, 0xD7, 0x00)),
    (0.7, Color::RGB(0xFF, 0x45, 0x00)),
    (1.0, Color::RGB(0x8B, 0x00, 0x00)),
];

const GOLD_PILLAR: &[Stop] = &[
    (0.0, Color::RGB(0xB8, 0x86, 0x0B)),
    (0.5, Color::RGB(0xFF, 0xD7, 0x00)),
    (1.0, Color::RGB(0xB8, 0x86, 0x0B)),
];

fn draw_obstacle(
    canvas: &mut Canvas<Window>,
    variant: Variant,
    obstacle: &Obstacle,
    config: &VariantConfig,
    viewport: &Viewport,
) -> Result<(), String> {
    let x = obstacle.x.round() as i32;
    let width = config.obstacle_width as u32;
    let top_height = obstacle.gap_top.max(0.0) as u32;
    let bottom_y = (obstacle.gap_top + config.gap_height) as i32;
    let bottom_height = (viewport.height as i32 - bottom_y).max(0) as u32;

    let top = (top_height > 0).then(|| Rect::new(x, 0, width, top_height));
    let bottom = (bottom_height > 0).then(|| Rect::new(x, bottom_y, width, bottom_height));
    let segments = top.into_iter().chain(bottom);

    match variant {
        Variant::FunFly => {
            let neon = Color::RGB(0xFF, 0x4C, 0x29);
            for segment in segments {
                draw::horizontal_gradient(canvas, segment, FUNFLY_PIPE)?;
                draw::stroke_rect(canvas, segment, 2, neon)?;
            }
            // Connectors stick out a little past the pipe on both sides
            let cap_width = width + 4;
            draw::fill_rect(canvas, Rect::new(x - 2, top_height as i32 - 10, cap_width, 10), neon)?;
            draw::fill_rect(canvas, Rect::new(x - 2, bottom_y, cap_width, 10), neon)
        }
        Variant::DkFly => {
            let gold = Color::RGB(0xFF, 0xD7, 0x00);
            for segment in segments {
                draw::horizontal_gradient(canvas, segment, DK_PILLAR)?;
                draw::stroke_rect(canvas, segment, 2, gold)?;
            }
            draw::fill_rect(canvas, Rect::new(x, top_height as i32 - 20, width, 20), gold)?;
            draw::fill_rect(canvas, Rect::new(x, bottom_y, width, 20), gold)
        }
        Variant::AmitabFly => {
            for segment in segments {
                draw::horizontal_gradient(canvas, segment, GOLD_PILLAR)?;
                draw::stroke_rect(canvas, segment, 2, Color::RGB(0xFF, 0xFA, 0xCD))?;
            }
            Ok(())
        }
    }
}

fn draw_particles(canvas: &mut Canvas<Window>, particles: &Particles, size: f32) -> Result<(), String> {
    let size = size.max(1.0) as u32;
    for particle in &particles.0 {
        canvas.set_draw_color(draw::with_alpha(particle.color, particle.life));
        canvas.fill_rect(Rect::new(
            particle.position.x as i32,
            particle.position.y as i32,
            size,
            size,
        ))?;
    }
    Ok(())
}

fn draw_pod(canvas: &mut Canvas<Window>, pose: Pose) -> Result<(), String> {
    let origin = pose.position;
    draw::rotated_ellipse(
        canvas,
        origin,
        pose.rotation,
        Vec2::ZERO,
        Vec2::new(20.0, 12.0),
        Color::RGB(0xF2, 0xEB, 0xE9),
    )?;
    draw::rotated_ellipse(
        canvas,
        origin,
        pose.rotation,
        Vec2::new(5.0, -2.0),
        Vec2::new(8.0, 5.0),
        Color::RGB(0x00, 0xE5, 0xFF),
    )?;

    if pose.thrusting {
        let flicker = rand::rng().random::<f32>() * 5.0;
        let flame = [Vec2::new(-15.0, -5.0), Vec2::new(-30.0 + flicker, 0.0), Vec2::new(-15.0, 5.0)];
        draw::rotated_polygon(canvas, origin, pose.rotation, &flame, Color::RGB(0xFF, 0x4C, 0x29))?;
    }
    Ok(())
}

fn draw_actor(
    canvas: &mut Canvas<Window>,
    config: &VariantConfig,
    textures: &Textures,
    pose: Pose,
) -> Result<(), String> {
    if config.variant == Variant::FunFly {
        return draw_pod(canvas, pose);
    }

    if let Some(texture) = textures.actor.as_ref() {
        let size = config.sprite_size as u32;
        let dest = Rect::from_center((pose.position.x as i32, pose.position.y as i32), size, size);
        return canvas.copy_ex(texture, None, dest, pose.rotation.to_degrees() as f64, None, false, false);
    }

    match config.variant {
        Variant::DkFly => draw::filled_circle(canvas, pose.position, 30.0, Color::RGB(0xFF, 0xA5, 0x00)),
        _ => {
            let square = [
                Vec2::new(-20.0, -20.0),
                Vec2::new(20.0, -20.0),
                Vec2::new(20.0, 20.0),
                Vec2::new(-20.0, 20.0),
            ];
            draw::rotated_polygon(canvas, pose.position, pose.rotation, &square, Color::RED)
        }
    }
}

/// Draws the playfield for the current stage onto a freshly cleared canvas.
#[allow(clippy::too_many_arguments)]
pub fn scene_render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    textures: NonSend<Textures>,
    config: Res<VariantConfig>,
    session: Res<GameSession>,
    viewport: Res<Viewport>,
    clock: Res<Clock>,
    scroll: Res<BackgroundScroll>,
    actor: Res<Actor>,
    intent: Res<InputIntent>,
    obstacles: Res<Obstacles>,
    particles: Res<Particles>,
    mut errors: EventWriter<GameError>,
) {
    let canvas = &mut *canvas;
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::BLACK);
    canvas.clear();

    let variant = config.variant;
    let mut frame = || -> Result<(), String> {
        draw_background(canvas, variant, &textures, &viewport, scroll.0, clock.elapsed)?;

        if matches!(session.stage, GameStage::Playing | GameStage::GameOver) {
            for obstacle in obstacles.iter() {
                draw_obstacle(canvas, variant, obstacle, &config, &viewport)?;
            }
        }
        if session.stage == GameStage::Playing {
            if let Some(settings) = config.particles {
                draw_particles(canvas, &particles, settings.size)?;
            }
        }

        let pose = actor_pose(variant, session.stage, &actor, &viewport, clock.millis(), intent.holding);
        draw_actor(canvas, &config, &textures, pose)
    };

    if let Err(e) = frame() {
        errors.write(TextureError::RenderFailed(e).into());
    }
}

pub fn present_system(mut canvas: NonSendMut<Canvas<Window>>) {
    canvas.present();
}
