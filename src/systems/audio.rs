//! Keeps playback in step with the game.
//!
//! The background track is reconciled every frame against the session: it should be
//! playing exactly while a round is live and the game is unmuted. Because the check is
//! level-triggered, a track that finishes loading mid-round starts on the next frame.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use tracing::{debug, trace};

use crate::audio::AudioBackend;
use crate::systems::state::{GameSession, GameStage};

/// Events for triggering one-shot audio.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// The round just ended in a crash.
    Crash,
}

/// What the coordinator last told the backend to do with the background track.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Never started, or halted and rewound.
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Non-send wrapper for the playback backend.
///
/// SDL2 audio objects are not `Send`, so the backend lives in the world as a
/// non-send resource and is only touched from the main thread.
pub struct AudioResource<B: AudioBackend>(pub B);

/// The state the track should be in, given where it is now and what the session needs.
pub fn desired_track(current: TrackState, stage: GameStage, muted: bool) -> TrackState {
    if stage == GameStage::Playing && !muted {
        TrackState::Playing
    } else if stage == GameStage::Start || current == TrackState::Stopped {
        // Returning to the title screen rewinds; otherwise keep the position
        TrackState::Stopped
    } else {
        TrackState::Paused
    }
}

/// Drives `backend` from `current` toward `target`, returning the state actually reached.
pub fn reconcile_track<B: AudioBackend>(backend: &mut B, current: TrackState, target: TrackState) -> TrackState {
    match (current, target) {
        (TrackState::Stopped, TrackState::Playing) => {
            if backend.start_music() {
                TrackState::Playing
            } else {
                TrackState::Stopped
            }
        }
        (TrackState::Paused, TrackState::Playing) => {
            backend.resume_music();
            TrackState::Playing
        }
        (TrackState::Playing, TrackState::Paused) => {
            backend.pause_music();
            TrackState::Paused
        }
        (TrackState::Playing | TrackState::Paused, TrackState::Stopped) => {
            backend.halt_music();
            TrackState::Stopped
        }
        // Already there, or a stopped track asked to pause: it stays stopped until it can play
        _ => current,
    }
}

/// System that plays crash effects and keeps the background track in sync with the session.
pub fn audio_system<B: AudioBackend + 'static>(
    mut audio: NonSendMut<AudioResource<B>>,
    session: Res<GameSession>,
    mut track: ResMut<TrackState>,
    mut events: EventReader<AudioEvent>,
) {
    for event in events.read() {
        match event {
            AudioEvent::Crash => {
                if session.muted {
                    debug!("Skipping crash effect while muted");
                } else {
                    trace!("Playing crash effect");
                    audio.0.play_effect();
                }
            }
        }
    }

    let target = desired_track(*track, session.stage, session.muted);
    if target != *track {
        let reached = reconcile_track(&mut audio.0, *track, target);
        if reached != *track {
            debug!(from = ?*track, to = ?reached, stage = %session.stage, muted = session.muted, "Background track changed");
            *track = reached;
        }
    }
}
