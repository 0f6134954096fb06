//! Procedural obstacle course: spawning on a fixed frame cadence, scrolling, and eviction.

use bevy_ecs::system::{Res, ResMut};
use rand::Rng;
use tracing::trace;

use crate::systems::components::{GameRng, Obstacle, Obstacles, Viewport};
use crate::systems::state::GameSession;
use crate::variant::VariantConfig;

/// Picks a gap position uniformly among the whole pixels in `[min_margin, height - gap - min_margin]`.
///
/// A screen too short for both margins gets a vertically centered gap instead.
pub fn random_gap_top<R: Rng>(rng: &mut R, config: &VariantConfig, height: f32) -> f32 {
    let min = config.min_margin.floor() as i64;
    let max = (height - config.gap_height - config.min_margin).floor() as i64;

    if max < min {
        return ((height - config.gap_height) / 2.0).max(0.0).floor();
    }
    rng.random_range(min..=max) as f32
}

/// Whether a new obstacle is due on this simulated frame.
pub fn should_spawn(frame_count: u64, interval: u64) -> bool {
    interval > 0 && frame_count % interval == 0
}

impl Obstacles {
    /// Appends an obstacle at the right edge. New obstacles are always the rightmost.
    pub fn spawn(&mut self, x: f32, gap_top: f32) {
        self.0.push_back(Obstacle::new(x, gap_top));
    }

    /// Moves every obstacle left by `speed` and evicts those past `threshold` from the head.
    ///
    /// Returns how many were evicted.
    pub fn advance(&mut self, speed: f32, threshold: f32) -> usize {
        for obstacle in self.0.iter_mut() {
            obstacle.x -= speed;
        }

        let mut evicted = 0;
        while self.0.front().is_some_and(|head| head.x < threshold) {
            self.0.pop_front();
            evicted += 1;
        }
        evicted
    }
}

pub fn spawn_obstacle_system(
    config: Res<VariantConfig>,
    session: Res<GameSession>,
    viewport: Res<Viewport>,
    mut rng: ResMut<GameRng>,
    mut obstacles: ResMut<Obstacles>,
) {
    if !should_spawn(session.frame_count, config.spawn_interval) {
        return;
    }

    let gap_top = random_gap_top(&mut rng.0, &config, viewport.height as f32);
    obstacles.spawn(viewport.width as f32, gap_top);
    trace!(frame = session.frame_count, gap_top, live = obstacles.len(), "Spawned obstacle");
}

pub fn scroll_obstacle_system(config: Res<VariantConfig>, mut obstacles: ResMut<Obstacles>) {
    let evicted = obstacles.advance(config.scroll_speed, config.evict_threshold);
    if evicted > 0 {
        trace!(evicted, live = obstacles.len(), "Evicted obstacles");
    }
}
