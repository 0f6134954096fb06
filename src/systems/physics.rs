//! Vertical motion of the actor under gravity and player force.

use bevy_ecs::system::{Res, ResMut};

use crate::systems::components::{Actor, InputIntent};
use crate::variant::{ForceModel, VariantConfig};

/// The force applied to the actor this frame.
pub fn frame_force(config: &VariantConfig, holding: bool) -> f32 {
    match config.force {
        ForceModel::Thrust { thrust } if holding => thrust,
        _ => config.gravity,
    }
}

/// Advances the actor by one simulated frame.
///
/// Velocity is clamped before it is applied, and rotation follows velocity but never
/// tilts past `max_tilt` in either direction.
pub fn integrate(actor: &mut Actor, config: &VariantConfig, holding: bool) {
    let force = frame_force(config, holding);
    actor.velocity = (actor.velocity + force).clamp(-config.max_speed, config.max_speed);
    actor.y += actor.velocity;
    actor.rotation = (actor.velocity * config.tilt).clamp(-config.max_tilt, config.max_tilt);
}

/// Applies a jump under the impulse model. Does nothing for thrust variants.
///
/// Returns `true` if velocity changed.
pub fn jump(actor: &mut Actor, config: &VariantConfig) -> bool {
    match config.force {
        ForceModel::Impulse { jump } => {
            actor.velocity = -jump;
            true
        }
        ForceModel::Thrust { .. } => false,
    }
}

pub fn physics_system(config: Res<VariantConfig>, intent: Res<InputIntent>, mut actor: ResMut<Actor>) {
    integrate(&mut actor, &config, intent.holding);
}
