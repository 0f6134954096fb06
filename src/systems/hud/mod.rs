pub mod menu;
pub mod score;

pub use self::menu::*;
pub use self::score::*;
