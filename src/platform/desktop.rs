//! Desktop platform implementation.

use std::io::{self, IsTerminal};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::error::PlatformError;
use crate::formatter::FrameFormatter;

/// Sleeps off the rest of a frame. Spin-sleeps for accuracy only while the window has focus.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise debug builds log at `debug` and release builds at `info`.
pub fn init_tracing() -> Result<(), PlatformError> {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(io::stdout().is_terminal())
                .event_format(FrameFormatter),
        )
        .with(filter)
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).map_err(|e| PlatformError::TracingInit(e.to_string()))
}

/// A fast generator seeded from the thread-local RNG, used for obstacle gaps and particle jitter.
pub fn rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}
