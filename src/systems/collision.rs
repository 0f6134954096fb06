//! Crash detection against the screen edges and the obstacle course.
//!
//! The predicates here are pure; [`collision_system`] is the only place that reacts to a hit.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use tracing::info;

use crate::systems::audio::AudioEvent;
use crate::systems::components::{Actor, Obstacle, Obstacles, Viewport};
use crate::systems::state::GameSession;
use crate::variant::VariantConfig;

/// The actor's hitbox pokes above the top edge or below the bottom edge.
pub fn out_of_bounds(actor: &Actor, height: f32) -> bool {
    actor.top() < 0.0 || actor.bottom() > height
}

/// The actor overlaps the solid part of `obstacle`.
///
/// `padding` shrinks the actor's hitbox on every side before testing, forgiving near misses.
pub fn hits_obstacle(actor: &Actor, obstacle: &Obstacle, width: f32, gap_height: f32, padding: f32) -> bool {
    let overlaps_horizontally = actor.right() - padding > obstacle.x && actor.left() + padding < obstacle.x + width;
    if !overlaps_horizontally {
        return false;
    }

    actor.top() + padding < obstacle.gap_top || actor.bottom() - padding > obstacle.gap_top + gap_height
}

/// Full crash check for one frame.
pub fn check_collision<'a>(
    actor: &Actor,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    config: &VariantConfig,
    height: f32,
) -> bool {
    out_of_bounds(actor, height)
        || obstacles.into_iter().any(|obstacle| {
            hits_obstacle(
                actor,
                obstacle,
                config.obstacle_width,
                config.gap_height,
                config.hitbox_padding,
            )
        })
}

/// Ends the round on a crash and requests the crash effect. Last system of every simulated frame.
pub fn collision_system(
    config: Res<VariantConfig>,
    viewport: Res<Viewport>,
    actor: Res<Actor>,
    obstacles: Res<Obstacles>,
    mut session: ResMut<GameSession>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if !check_collision(&actor, obstacles.iter(), &config, viewport.height as f32) {
        return;
    }

    if session.end() {
        info!(
            score = session.score,
            high_score = session.high_score,
            frame = session.frame_count,
            "Actor crashed"
        );
        audio_events.write(AudioEvent::Crash);
    }
}
