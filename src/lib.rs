//! Procedural BSP dungeon generation.
//!
//! [`DungeonGenerator`] partitions a region into rooms, links them with
//! corridors and bridges, derives the wall, water and lamp layers, and places
//! the level's objects without overlap.

pub mod bsp;
pub mod components;
pub mod config;
pub mod constants;
pub mod dungeon_gen;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod raster;
pub mod sampler;
pub mod spawning;
pub mod tile;
pub mod water;

pub use bsp::{LeafNode, PartitionNode, Region, SplitNode};
pub use config::DungeonConfig;
pub use dungeon_gen::{DungeonGenerator, DungeonResult};
pub use error::{ConfigError, GenerationError};
pub use grid::{Classification, GridPos, TileGrid};
pub use spawning::SpawnPlan;
pub use tile::{Tile, WaterTile};
