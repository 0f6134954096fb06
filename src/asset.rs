//! Per-variant asset discovery and non-blocking loading.
//!
//! Assets live on disk under `<root>/<variant>/`, where `<root>` defaults to `assets`
//! and can be overridden with the `REDLINE_ASSETS` environment variable. Reading happens
//! on a background thread; the frame loop polls for whatever has arrived and never waits.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use strum_macros::{Display, EnumIter};
use tracing::{debug, trace, warn};

use crate::error::AssetError;
use crate::variant::Variant;

/// Environment variable overriding the asset root directory.
pub const ASSET_ROOT_ENV: &str = "REDLINE_ASSETS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Asset {
    ActorImage,
    BackgroundImage,
    Music,
    CrashEffect,
}

impl Asset {
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::ActorImage => "actor.png",
            Asset::BackgroundImage => "background.png",
            Asset::Music => "music.mp3",
            Asset::CrashEffect => "crash.mp3",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, Asset::ActorImage | Asset::BackgroundImage)
    }
}

/// Resolves the asset root, honoring `REDLINE_ASSETS` when set.
pub fn asset_root() -> PathBuf {
    env::var_os(ASSET_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

pub fn asset_path(root: &Path, variant: Variant, asset: Asset) -> PathBuf {
    root.join(variant.id()).join(asset.file_name())
}

/// Raw bytes for an asset that finished reading.
#[derive(Debug)]
pub struct LoadedAsset {
    pub asset: Asset,
    pub bytes: Vec<u8>,
}

pub type LoadResult = Result<LoadedAsset, AssetError>;

/// Reads a variant's assets on a worker thread and hands them over through a channel.
///
/// Dropping the loader tells the worker to stop before its next read.
pub struct AssetLoader {
    receiver: Receiver<LoadResult>,
    pending: usize,
    stop: Arc<AtomicBool>,
}

impl AssetLoader {
    /// Starts reading `assets` for `variant` from `root`.
    ///
    /// If the worker thread cannot be started, the loader reports a single
    /// [`AssetError::LoaderGone`] on the first poll and every asset stays missing.
    pub fn spawn(root: PathBuf, variant: Variant, assets: &[Asset]) -> Self {
        let (sender, receiver) = mpsc::channel();
        let requested = assets.to_vec();
        let pending = requested.len();
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);

        debug!(%variant, root = %root.display(), count = pending, "Starting asset loader");
        let spawned = thread::Builder::new().name("asset-loader".to_string()).spawn(move || {
            for asset in requested {
                if worker_stop.load(Ordering::Relaxed) {
                    trace!("Asset loader cancelled");
                    break;
                }

                let path = asset_path(&root, variant, asset);
                trace!(%asset, path = %path.display(), "Reading asset");
                let result = fs::read(&path)
                    .map(|bytes| LoadedAsset { asset, bytes })
                    .map_err(|source| AssetError::Io { asset, path, source });

                // The receiving side is gone once the engine unmounts
                if sender.send(result).is_err() {
                    break;
                }
            }
        });

        if let Err(e) = spawned {
            warn!(error = %e, "Could not start asset loader thread, continuing without assets");
        }

        Self { receiver, pending, stop }
    }

    /// Drains every result that has arrived since the last poll.
    pub fn poll(&mut self) -> Vec<LoadResult> {
        let mut results = Vec::new();
        while self.pending > 0 {
            match self.receiver.try_recv() {
                Ok(result) => {
                    self.pending -= 1;
                    results.push(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.pending = 0;
                    results.push(Err(AssetError::LoaderGone));
                }
            }
        }
        results
    }

    pub fn is_finished(&self) -> bool {
        self.pending == 0
    }

    /// Stops the worker before its next read and discards anything still outstanding.
    pub fn cancel(&mut self) {
        if !self.stop.swap(true, Ordering::Relaxed) && self.pending > 0 {
            debug!(outstanding = self.pending, "Cancelling asset loader");
        }
        self.pending = 0;
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}
