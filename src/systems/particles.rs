//! Thruster exhaust. Purely cosmetic: particles never collide and never score.

use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use rand::Rng;
use sdl2::pixels::Color;

use crate::systems::components::{Actor, GameRng, InputIntent, Particle, Particles};
use crate::systems::state::GameSession;
use crate::variant::{ParticleConfig, VariantConfig};

/// A fresh particle at the actor's exhaust, drifting backwards with some jitter.
pub fn emit<R: Rng>(rng: &mut R, config: &ParticleConfig, actor: &Actor) -> Particle {
    Particle {
        position: Vec2::new(actor.x, actor.y) + config.offset,
        velocity: Vec2::new(-rng.random::<f32>() * 2.0 - 2.0, rng.random::<f32>() * 2.0 - 1.0),
        life: 1.0,
        color: Color::RGB(255, 76 + (rng.random::<f32>() * 100.0) as u8, 41),
    }
}

impl Particles {
    /// Moves every particle one frame and drops the ones that burned out.
    pub fn update(&mut self, decay: f32) {
        self.0.retain_mut(|particle| {
            particle.position += particle.velocity;
            particle.life -= decay;
            particle.life > 0.0
        });
    }
}

pub fn particle_system(
    config: Res<VariantConfig>,
    session: Res<GameSession>,
    intent: Res<InputIntent>,
    actor: Res<Actor>,
    mut rng: ResMut<GameRng>,
    mut particles: ResMut<Particles>,
) {
    let Some(settings) = config.particles else {
        return;
    };

    if intent.holding && settings.emit_every > 0 && session.frame_count % settings.emit_every == 0 {
        let particle = emit(&mut rng.0, &settings, &actor);
        particles.0.push(particle);
    }

    particles.update(settings.decay);
}
