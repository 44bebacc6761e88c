//! Generation configuration.
//!
//! Replaces the game's global config singleton: one `DungeonConfig` is built
//! (or loaded from JSON) by the caller and passed into every generation run.

use crate::constants::*;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Sizes of the renderer's tile-variant tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTables {
    pub walls: usize,
    pub bridges: usize,
}

impl Default for VariantTables {
    fn default() -> Self {
        Self {
            walls: WALL_VARIANT_COUNT,
            bridges: BRIDGE_VARIANT_COUNT,
        }
    }
}

/// Parameters for one generation run.
///
/// `rows` is the board's x extent and `columns` its y extent. The tile grid
/// is `rows + 2 * padding` by `columns + 2 * padding`, indexed `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub rows: i32,
    pub columns: i32,
    pub padding: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Dungeon-wide enemy cap
    pub enemy_cap: u32,
    /// Dungeon-wide trap cap
    pub trap_cap: u32,
    pub variant_tables: VariantTables,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            rows: DUNGEON_DEFAULT_ROWS,
            columns: DUNGEON_DEFAULT_COLUMNS,
            padding: DUNGEON_DEFAULT_PADDING,
            min_room_size: DUNGEON_DEFAULT_MIN_ROOM_SIZE,
            max_room_size: DUNGEON_DEFAULT_MAX_ROOM_SIZE,
            enemy_cap: ENEMY_SPAWN_CAP,
            trap_cap: TRAP_SPAWN_CAP,
            variant_tables: VariantTables::default(),
        }
    }
}

impl DungeonConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Grid width including padding on both sides
    pub fn grid_width(&self) -> usize {
        (self.rows + 2 * self.padding) as usize
    }

    /// Grid height including padding on both sides
    pub fn grid_height(&self) -> usize {
        (self.columns + 2 * self.padding) as usize
    }

    /// Padded cell count, `None` if any step overflows
    fn padded_cells(&self) -> Option<usize> {
        let border = self.padding.checked_mul(2)?;
        let width = usize::try_from(self.rows.checked_add(border)?).ok()?;
        let height = usize::try_from(self.columns.checked_add(border)?).ok()?;
        width.checked_mul(height)
    }

    /// Reject configurations that would loop, panic or index out of bounds.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("rows", self.rows),
            ("columns", self.columns),
            ("padding", self.padding),
            ("min_room_size", self.min_room_size),
            ("max_room_size", self.max_room_size),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.padded_cells().map_or(true, |cells| cells > MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
                padding: self.padding,
                max_cells: MAX_GRID_CELLS,
            });
        }

        if self.max_room_size < self.min_room_size {
            return Err(ConfigError::MaxBelowMin {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.min_room_size < MIN_ROOM_SIZE_FLOOR {
            return Err(ConfigError::MinTooSmall {
                min: self.min_room_size,
                floor: MIN_ROOM_SIZE_FLOOR,
            });
        }
        if self.rows < self.min_room_size || self.columns < self.min_room_size {
            return Err(ConfigError::RegionTooSmall {
                rows: self.rows,
                columns: self.columns,
                min: self.min_room_size,
            });
        }

        for (table, actual, required) in [
            ("wall", self.variant_tables.walls, WALL_VARIANT_COUNT),
            ("bridge", self.variant_tables.bridges, BRIDGE_VARIANT_COUNT),
        ] {
            if actual < required {
                return Err(ConfigError::VariantTableTooSmall {
                    table,
                    actual,
                    required,
                });
            }
        }

        if self.min_room_size * 2 >= self.max_room_size {
            warn!(
                min = self.min_room_size,
                max = self.max_room_size,
                "min_room_size * 2 >= max_room_size; splitting will produce few, large leaves"
            );
        }

        Ok(())
    }
}
