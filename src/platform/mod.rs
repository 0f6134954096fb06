//! Process-level plumbing: frame pacing, log output and entropy.

mod desktop;
pub use desktop::*;
