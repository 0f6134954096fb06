//! Centralized error types for the engine.
//!
//! Nothing in here is fatal once the frame loop is running: initialization errors
//! bubble up to `main`, while per-frame failures are written as ECS events and logged.

use std::io;
use std::path::PathBuf;

use bevy_ecs::event::Event;

use crate::asset::Asset;

/// Main error type for the engine.
///
/// This is the primary error type used in public APIs, and doubles as an ECS event
/// so that systems can report recoverable failures without aborting the frame.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Unknown game variant: {0}")]
    UnknownVariant(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Could not read {asset} from {path}: {source}")]
    Io {
        asset: Asset,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not decode {asset}: {reason}")]
    Decode { asset: Asset, reason: String },

    #[error("Asset loader disconnected before delivering every asset")]
    LoaderGone,
}

/// Platform-specific errors. These surface before the engine exists, so they are reported directly.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
