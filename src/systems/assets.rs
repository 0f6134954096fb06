//! Turns bytes from the background loader into textures and sounds.

use bevy_ecs::{
    event::EventWriter,
    system::{NonSend, NonSendMut},
};
use sdl2::{
    image::LoadTexture,
    render::{Texture, TextureCreator},
    video::WindowContext,
};
use tracing::{debug, info, warn};

use crate::asset::{Asset, AssetLoader, LoadedAsset};
use crate::audio::Audio;
use crate::error::{AssetError, GameError};
use crate::systems::audio::AudioResource;

/// Decoded images. A missing image is drawn with its placeholder.
#[derive(Default)]
pub struct Textures {
    pub actor: Option<Texture>,
    pub background: Option<Texture>,
}

/// Non-send wrapper for the texture creator, so textures can be made after startup.
pub struct TextureFactory(pub TextureCreator<WindowContext>);

/// Attaches one loaded asset to its consumer.
fn install(
    loaded: LoadedAsset,
    factory: &TextureFactory,
    textures: &mut Textures,
    audio: &mut Audio,
) -> Result<(), AssetError> {
    let asset = loaded.asset;
    let decode = |reason: String| AssetError::Decode { asset, reason };

    match asset {
        Asset::ActorImage | Asset::BackgroundImage => {
            let texture = factory.0.load_texture_bytes(&loaded.bytes).map_err(decode)?;
            if asset == Asset::ActorImage {
                textures.actor = Some(texture);
            } else {
                textures.background = Some(texture);
            }
        }
        Asset::Music => audio.load_music(loaded.bytes).map_err(|e| decode(e.to_string()))?,
        Asset::CrashEffect => audio.load_effect(&loaded.bytes).map_err(|e| decode(e.to_string()))?,
    }
    Ok(())
}

/// Polls the loader and installs whatever arrived. Failures leave the placeholder in place.
pub fn asset_poll_system(
    mut loader: NonSendMut<AssetLoader>,
    factory: NonSend<TextureFactory>,
    mut textures: NonSendMut<Textures>,
    mut audio: NonSendMut<AudioResource<Audio>>,
    mut errors: EventWriter<GameError>,
) {
    if loader.is_finished() {
        return;
    }

    for result in loader.poll() {
        let outcome = result.and_then(|loaded| {
            let asset = loaded.asset;
            let size = loaded.bytes.len();
            install(loaded, &factory, &mut textures, &mut audio.0).map(|()| (asset, size))
        });

        match outcome {
            Ok((asset, bytes)) => debug!(%asset, bytes, "Asset ready"),
            Err(e) => {
                warn!(error = %e, "Asset unavailable, using fallback");
                errors.write(e.into());
            }
        }
    }

    if loader.is_finished() {
        info!(
            actor = textures.actor.is_some(),
            background = textures.background.is_some(),
            "Asset loading finished"
        );
    }
}
