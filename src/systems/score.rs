use bevy_ecs::system::{Res, ResMut};
use tracing::debug;

use crate::systems::components::{Actor, Obstacles};
use crate::systems::state::GameSession;
use crate::variant::VariantConfig;

/// Marks every obstacle whose trailing edge is behind `actor_x` as passed.
///
/// Returns the number of obstacles newly passed; each obstacle counts at most once.
pub fn tally_passed(obstacles: &mut Obstacles, actor_x: f32, width: f32) -> u32 {
    let mut gained = 0;
    for obstacle in obstacles.0.iter_mut().filter(|o| !o.passed) {
        if actor_x > obstacle.x + width {
            obstacle.passed = true;
            gained += 1;
        }
    }
    gained
}

pub fn score_system(
    config: Res<VariantConfig>,
    actor: Res<Actor>,
    mut obstacles: ResMut<Obstacles>,
    mut session: ResMut<GameSession>,
) {
    let gained = tally_passed(&mut obstacles, actor.x, config.obstacle_width);
    if gained > 0 {
        session.score += gained;
        debug!(score = session.score, "Obstacle cleared");
    }
}
