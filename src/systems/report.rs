use bevy_ecs::event::EventReader;
use tracing::warn;

use crate::error::GameError;

/// Logs every recoverable error reported during the frame.
pub fn error_log_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        warn!(error = %error, "Recoverable error this frame");
    }
}
