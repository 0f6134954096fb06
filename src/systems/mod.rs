//! The Entity-Component-System (ECS) module.
//!
//! Simulation systems only touch plain resources and can run headless; the windowing
//! systems (input, assets, resize and drawing) additionally need SDL objects as
//! non-send resources.

pub mod assets;
pub mod audio;
pub mod collision;
pub mod components;
pub mod control;
pub mod draw;
pub mod hud;
pub mod input;
pub mod layout;
pub mod obstacles;
pub mod particles;
pub mod physics;
pub mod render;
pub mod report;
pub mod resize;
pub mod score;
pub mod state;

pub use self::assets::*;
pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::control::*;
pub use self::hud::*;
pub use self::input::*;
pub use self::layout::*;
pub use self::obstacles::*;
pub use self::particles::*;
pub use self::physics::*;
pub use self::render::*;
pub use self::report::*;
pub use self::resize::*;
pub use self::score::*;
pub use self::state::*;
