//! Simulation state shared between systems.
//!
//! There is exactly one actor and one obstacle course per mounted game, so everything here
//! is a resource rather than an entity.

use std::collections::VecDeque;

use bevy_ecs::resource::Resource;
use glam::Vec2;
use rand::rngs::SmallRng;
use sdl2::pixels::Color;

use crate::variant::VariantConfig;

/// Wall time elapsed since the previous frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime {
    pub seconds: f32,
}

/// Wall time since the game was mounted. Drives idle animations, never the simulation.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Clock {
    pub elapsed: f32,
}

impl Clock {
    pub fn millis(&self) -> f32 {
        self.elapsed * 1000.0
    }
}

/// Global game state that controls the frame loop.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GlobalState {
    /// Set once the player asks to leave; the loop unmounts after the current frame.
    pub exit: bool,
}

/// Whether the window currently has keyboard focus.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFocus(pub bool);

/// The drawing surface size last observed by the resize check.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Records a new size. Returns `true` if it differed from the previous one.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

/// The player-controlled body. `x` and `hitbox` are fixed for the lifetime of a round.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    /// Radians, presentation only.
    pub rotation: f32,
    pub hitbox: f32,
}

impl Actor {
    /// An actor at rest, vertically centered.
    pub fn spawn(config: &VariantConfig, viewport: &Viewport) -> Self {
        Self {
            x: config.actor_x,
            y: viewport.height as f32 / 2.0,
            velocity: 0.0,
            rotation: 0.0,
            hitbox: config.hitbox_size,
        }
    }

    pub fn top(&self) -> f32 {
        self.y - self.hitbox / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.hitbox / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.hitbox / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.hitbox / 2.0
    }
}

/// Level-triggered thrust flag. Only the thrust force model reads it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputIntent {
    pub holding: bool,
}

/// A scrolling barrier with a passable gap spanning `gap_top..gap_top + gap_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Leading (left) edge.
    pub x: f32,
    pub gap_top: f32,
    /// Set once the actor has cleared the trailing edge and the point was awarded.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }
}

/// Live obstacles ordered oldest (leftmost) first.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Obstacles(pub VecDeque<Obstacle>);

impl Obstacles {
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in `[0, 1]`, doubling as opacity.
    pub life: f32,
    pub color: Color,
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Particles(pub Vec<Particle>);

/// Horizontal offset of the scrolling background image, in pixels.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct BackgroundScroll(pub f32);

/// Randomness for obstacle gaps and particle jitter. Seedable so tests are deterministic.
#[derive(Resource, Clone)]
pub struct GameRng(pub SmallRng);
