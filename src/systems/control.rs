use bevy_ecs::{
    event::EventReader,
    system::{Res, ResMut},
};
use tracing::{debug, info, trace};

use crate::{
    events::{GameCommand, GameEvent},
    systems::{
        components::{Actor, GlobalState, InputIntent, Obstacles, Particles, Viewport},
        physics,
        state::GameSession,
    },
    variant::VariantConfig,
};

/// Applies player commands to the session and the actor.
///
/// Nothing here advances the simulation; presses only set intent or velocity.
#[allow(clippy::too_many_arguments)]
pub fn control_system(
    mut events: EventReader<GameEvent>,
    config: Res<VariantConfig>,
    viewport: Res<Viewport>,
    mut state: ResMut<GlobalState>,
    mut session: ResMut<GameSession>,
    mut actor: ResMut<Actor>,
    mut intent: ResMut<InputIntent>,
    mut obstacles: ResMut<Obstacles>,
    mut particles: ResMut<Particles>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::Begin => {
                if session.begin() {
                    *actor = Actor::spawn(&config, &viewport);
                    obstacles.0.clear();
                    particles.0.clear();
                    // A hold carried into the round keeps thrusting; the input layer never re-sends it
                    info!(
                        variant = %config.variant,
                        high_score = session.high_score,
                        holding = intent.holding,
                        "Round starting"
                    );
                } else {
                    trace!(stage = %session.stage, "Ignoring begin outside of menus");
                }
            }
            GameCommand::Press => {
                intent.holding = true;
                if session.is_playing() && physics::jump(&mut actor, &config) {
                    trace!(velocity = actor.velocity, "Jump");
                }
            }
            GameCommand::Release => {
                intent.holding = false;
            }
            GameCommand::ToggleMute => {
                session.muted = !session.muted;
                debug!(muted = session.muted, "Toggled mute");
            }
            GameCommand::Exit => {
                info!("Exit requested");
                state.exit = true;
            }
            // Handled by the windowing system
            GameCommand::ToggleFullscreen => {}
        }
    }
}
