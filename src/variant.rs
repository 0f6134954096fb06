//! The registry of playable games and the tuning record each one runs with.
//!
//! All three games share one engine; everything that differs between them is captured
//! by [`VariantConfig`]. Rendering style is looked up separately by [`Variant`].

use std::f32::consts::FRAC_PI_4;

use bevy_ecs::resource::Resource;
use glam::Vec2;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::asset::Asset;

/// One of the registered mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
    DkFly,
    FunFly,
    AmitabFly,
}

impl Variant {
    /// Stable identifier used on the command line and for the asset directory.
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn title(self) -> &'static str {
        match self {
            Variant::DkFly => "DK Fly",
            Variant::FunFly => "FunFly",
            Variant::AmitabFly => "Amitabh Fly",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variant::DkFly => "Experience the legend. Fly high with pride.",
            Variant::FunFly => "Navigate the neon city. Dodge obstacles. Survive.",
            Variant::AmitabFly => "Realistic flight simulation with high-fidelity graphics.",
        }
    }

    /// Builds the tuning record for this game.
    pub fn config(self) -> VariantConfig {
        match self {
            Variant::FunFly => VariantConfig {
                variant: self,
                gravity: 0.6,
                force: ForceModel::Thrust { thrust: -1.2 },
                max_speed: 10.0,
                tilt: 0.05,
                max_tilt: FRAC_PI_4,
                scroll_speed: 5.0,
                spawn_interval: 90,
                gap_height: 220.0,
                min_margin: 100.0,
                obstacle_width: 60.0,
                evict_threshold: -80.0,
                actor_x: 100.0,
                hitbox_size: 30.0,
                hitbox_padding: 8.0,
                sprite_size: 40.0,
                background_scroll: 0.0,
                particles: Some(ParticleConfig::default()),
                assets: &[Asset::Music, Asset::CrashEffect],
                volumes: Volumes {
                    music: 0.4,
                    effects: 0.8,
                },
                copy: MenuCopy {
                    title: "FUNFLY",
                    tagline: "HOLD to fly, RELEASE to fall",
                    begin: "LAUNCH MISSION",
                    retry: "RETRY SYSTEM",
                    game_over: "CRITICAL FAILURE",
                    high_score_label: "BEST",
                },
            },
            Variant::DkFly => VariantConfig {
                variant: self,
                gravity: 0.3,
                force: ForceModel::Impulse { jump: 7.0 },
                max_speed: 12.0,
                tilt: 0.1,
                max_tilt: FRAC_PI_4,
                scroll_speed: 3.5,
                spawn_interval: 110,
                gap_height: 220.0,
                min_margin: 100.0,
                obstacle_width: 80.0,
                evict_threshold: -100.0,
                actor_x: 100.0,
                hitbox_size: 50.0,
                hitbox_padding: 0.0,
                sprite_size: 90.0,
                background_scroll: 0.5,
                particles: None,
                assets: &[Asset::ActorImage, Asset::BackgroundImage, Asset::Music, Asset::CrashEffect],
                volumes: Volumes {
                    music: 0.6,
                    effects: 1.0,
                },
                copy: MenuCopy {
                    title: "DK FLY",
                    tagline: "Show your courage. Rule the skies.",
                    begin: "START GAME",
                    retry: "TRY AGAIN",
                    game_over: "TOTAL SCORE",
                    high_score_label: "HIGHEST",
                },
            },
            Variant::AmitabFly => VariantConfig {
                variant: self,
                gravity: 0.25,
                force: ForceModel::Impulse { jump: 6.0 },
                max_speed: 12.0,
                tilt: 0.1,
                max_tilt: FRAC_PI_4,
                scroll_speed: 3.0,
                spawn_interval: 120,
                gap_height: 200.0,
                min_margin: 100.0,
                obstacle_width: 80.0,
                evict_threshold: -100.0,
                actor_x: 100.0,
                hitbox_size: 50.0,
                hitbox_padding: 0.0,
                sprite_size: 80.0,
                background_scroll: 1.0,
                particles: None,
                assets: &[Asset::ActorImage, Asset::BackgroundImage, Asset::Music, Asset::CrashEffect],
                volumes: Volumes {
                    music: 0.5,
                    effects: 1.0,
                },
                copy: MenuCopy {
                    title: "AMITABH FLY",
                    tagline: "Tap to Fly! Avoid the Golden Pillars.",
                    begin: "START GAME",
                    retry: "TRY AGAIN",
                    game_over: "SCORE",
                    high_score_label: "BEST",
                },
            },
        }
    }
}

/// How player input turns into vertical force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceModel {
    /// A press overwrites velocity with `-jump`; gravity applies every frame.
    Impulse { jump: f32 },
    /// While held, `thrust` replaces gravity for the frame.
    Thrust { thrust: f32 },
}

/// Exhaust emission parameters for variants that have a thruster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    /// Emit one particle every this many simulated frames while thrust is held.
    pub emit_every: u64,
    /// Life lost per frame.
    pub decay: f32,
    /// Spawn point relative to the actor's center.
    pub offset: Vec2,
    pub size: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            emit_every: 3,
            decay: 0.05,
            offset: Vec2::new(-15.0, 10.0),
            size: 4.0,
        }
    }
}

/// Linear volumes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes {
    pub music: f32,
    pub effects: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCopy {
    pub title: &'static str,
    pub tagline: &'static str,
    pub begin: &'static str,
    pub retry: &'static str,
    pub game_over: &'static str,
    pub high_score_label: &'static str,
}

/// Every tunable the engine reads. Units are pixels and pixels per frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct VariantConfig {
    pub variant: Variant,
    pub gravity: f32,
    pub force: ForceModel,
    /// Velocity is clamped to `[-max_speed, max_speed]` under both force models.
    pub max_speed: f32,
    /// Radians of rotation per unit of velocity.
    pub tilt: f32,
    pub max_tilt: f32,
    pub scroll_speed: f32,
    pub spawn_interval: u64,
    pub gap_height: f32,
    pub min_margin: f32,
    pub obstacle_width: f32,
    /// Obstacles whose `x` drops below this are evicted.
    pub evict_threshold: f32,
    pub actor_x: f32,
    pub hitbox_size: f32,
    /// Forgiveness applied to obstacle overlap checks, not to screen bounds.
    pub hitbox_padding: f32,
    pub sprite_size: f32,
    /// Background image scroll per simulated frame.
    pub background_scroll: f32,
    pub particles: Option<ParticleConfig>,
    pub assets: &'static [Asset],
    pub volumes: Volumes,
    pub copy: MenuCopy,
}

impl VariantConfig {
    pub fn has_particles(&self) -> bool {
        self.particles.is_some()
    }
}
