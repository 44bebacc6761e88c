//! Generator constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

mod dungeon;
mod kernels;
mod spawning;

pub use dungeon::*;
pub use kernels::*;
pub use spawning::*;
