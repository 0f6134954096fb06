#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;
use std::process::ExitCode;
use std::str::FromStr;

use redline::app::{App, AppOptions};
use redline::constants::LOOP_TIME;
use redline::error::GameError;
use redline::platform;
use redline::variant::Variant;
use strum::IntoEnumIterator;
use tracing::{error, info};

/// What the command line asked for.
struct Args {
    variant: Variant,
    options: AppOptions,
    list: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, GameError> {
    let mut variant = Variant::FunFly;
    let mut options = AppOptions::default();
    let mut list = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fullscreen" | "-f" => options.fullscreen = true,
            "--list" | "-l" => list = true,
            "--variant" | "-v" => {
                let id = args.next().unwrap_or_default();
                variant = Variant::from_str(&id).map_err(|_| GameError::UnknownVariant(id))?;
            }
            other => {
                variant = Variant::from_str(other).map_err(|_| GameError::UnknownVariant(other.to_string()))?;
            }
        }
    }

    Ok(Args { variant, options, list })
}

fn print_registry() {
    for variant in Variant::iter() {
        println!("{:<12} {:<14} {}", variant.id(), variant.title(), variant.description());
    }
}

/// The main entry point of the application.
///
/// Acts as a minimal host: picks a game from the registry, mounts it, and returns to the
/// library when the game hands control back.
pub fn main() -> ExitCode {
    if let Err(e) = platform::init_tracing() {
        eprintln!("{}", e);
    }

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            print_registry();
            return ExitCode::FAILURE;
        }
    };

    if args.list {
        print_registry();
        return ExitCode::SUCCESS;
    }

    let variant = args.variant;
    let mut app = match App::new(variant, args.options, move || {
        info!(%variant, "Game exited, returning to the library");
    }) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Could not create app");
            return ExitCode::FAILURE;
        }
    };

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    ExitCode::SUCCESS
}
