//! This module handles audio playback for the engine.
//!
//! Each game owns one looping background track and one crash effect. Both arrive from the
//! asset loader after startup, so every operation tolerates a missing track.
use anyhow::{anyhow, Result};
use sdl2::{
    mixer::{self, Channel, Chunk, InitFlag, LoaderRWops, Music, AUDIO_S16LSB, MAX_VOLUME},
    rwops::RWops,
};
use tracing::{debug, trace, warn};

use crate::variant::Volumes;

const AUDIO_FREQUENCY: i32 = 44_100;
const AUDIO_CHANNELS: i32 = 2;
const MIXING_CHANNELS: i32 = 4;
const CHUNK_SIZE: i32 = 1024;

/// The operations the audio coordinator needs from a playback device.
///
/// Implementations swallow playback failures; the game never stalls on audio.
pub trait AudioBackend {
    /// Starts the background track from the beginning, looping forever.
    ///
    /// Returns `false` when no track is available yet, so the caller can retry later.
    fn start_music(&mut self) -> bool;

    fn pause_music(&mut self);

    /// Continues the track from where it was paused.
    fn resume_music(&mut self);

    /// Stops the track and rewinds it to the beginning.
    fn halt_music(&mut self);

    /// Plays the crash effect once.
    fn play_effect(&mut self);

    /// Silences everything. Used on unmount.
    fn stop_all(&mut self);
}

/// SDL2_mixer playback.
///
/// If the audio device or decoders cannot be initialized the backend becomes disabled
/// and every operation silently does nothing.
pub struct Audio {
    _mixer_context: Option<mixer::Sdl2MixerContext>,
    music: Option<Music<'static>>,
    effect: Option<Chunk>,
    volumes: Volumes,
    state: AudioState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Enabled,
    Disabled,
}

impl Audio {
    /// Opens the audio device, falling back to a disabled backend on failure.
    pub fn new(volumes: Volumes) -> Self {
        match Self::try_new(volumes) {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Failed to initialize audio: {}. Audio will be disabled.", e);
                Self {
                    _mixer_context: None,
                    music: None,
                    effect: None,
                    volumes,
                    state: AudioState::Disabled,
                }
            }
        }
    }

    fn try_new(volumes: Volumes) -> Result<Self> {
        mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, AUDIO_CHANNELS, CHUNK_SIZE)
            .map_err(|e| anyhow!("Failed to open audio: {}", e))?;
        mixer::allocate_channels(MIXING_CHANNELS);

        let mixer_context = mixer::init(InitFlag::MP3 | InitFlag::OGG)
            .map_err(|e| anyhow!("Failed to initialize SDL2_mixer: {}", e))?;

        Music::set_volume(to_mixer_volume(volumes.music));

        debug!(music = volumes.music, effects = volumes.effects, "Audio device opened");
        Ok(Audio {
            _mixer_context: Some(mixer_context),
            music: None,
            effect: None,
            volumes,
            state: AudioState::Enabled,
        })
    }

    /// Decodes the background track. The bytes are kept alive for the rest of the process.
    pub fn load_music(&mut self, bytes: Vec<u8>) -> Result<()> {
        if self.is_disabled() {
            return Err(anyhow!("audio is disabled"));
        }

        let data: &'static [u8] = bytes.leak();
        let music = Music::from_static_bytes(data).map_err(|e| anyhow!("Failed to decode music: {}", e))?;
        self.music = Some(music);
        Ok(())
    }

    pub fn load_effect(&mut self, bytes: &[u8]) -> Result<()> {
        if self.is_disabled() {
            return Err(anyhow!("audio is disabled"));
        }

        let rwops = RWops::from_bytes(bytes).map_err(|e| anyhow!("Failed to create RWops: {}", e))?;
        let mut chunk = rwops.load_wav().map_err(|e| anyhow!("Failed to decode effect: {}", e))?;
        chunk.set_volume(to_mixer_volume(self.volumes.effects));
        self.effect = Some(chunk);
        Ok(())
    }

    /// Returns whether the audio system failed to initialize and is non-functional.
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, AudioState::Disabled)
    }
}

impl AudioBackend for Audio {
    fn start_music(&mut self) -> bool {
        let Some(music) = &self.music else {
            return false;
        };

        match music.play(-1) {
            Ok(()) => {
                trace!("Background track started");
                true
            }
            Err(e) => {
                warn!("Could not start background track: {}", e);
                false
            }
        }
    }

    fn pause_music(&mut self) {
        if self.music.is_some() {
            Music::pause();
        }
    }

    fn resume_music(&mut self) {
        if self.music.is_some() {
            Music::resume();
        }
    }

    fn halt_music(&mut self) {
        if self.music.is_some() {
            Music::halt();
        }
    }

    fn play_effect(&mut self) {
        if let Some(chunk) = &self.effect {
            if let Err(e) = Channel::all().play(chunk, 0) {
                warn!("Could not play crash effect: {}", e);
            }
        }
    }

    fn stop_all(&mut self) {
        if self.state != AudioState::Disabled {
            Music::halt();
            Channel::all().halt();
        }
    }
}

impl Drop for Audio {
    fn drop(&mut self) {
        if self.state == AudioState::Enabled {
            // Decoded tracks must be freed while the device is still open
            self.music.take();
            self.effect.take();
            mixer::close_audio();
            debug!("Audio device closed");
        }
    }
}

fn to_mixer_volume(volume: f32) -> i32 {
    (volume.clamp(0.0, 1.0) * MAX_VOLUME as f32).round() as i32
}
