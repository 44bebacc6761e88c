//! Visual tile layer handed to the renderer.
//!
//! Variant indices are resolved by the neighbourhood kernels; the renderer
//! maps them onto its own art tables.

use serde::{Deserialize, Serialize};

/// What the renderer draws at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Floor,
    Corridor,
    /// Bridge variant from the 4-neighbour kernel, `0..16`
    Bridge(u8),
    Water,
    /// Wall variant from the 8-neighbour kernel, `0..256`
    Wall(u8),
}

impl Tile {
    /// Anything but `Empty` blocks later passes from drawing here
    pub fn is_placed(&self) -> bool {
        !matches!(self, Tile::Empty)
    }

    /// Walls next to open ground get a floor tile drawn underneath
    pub fn has_floor_backing(&self) -> bool {
        matches!(self, Tile::Wall(variant) if *variant != 0)
    }

    /// Single-character rendering for debug dumps
    pub fn glyph(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Floor => '.',
            Tile::Corridor => ',',
            Tile::Bridge(_) => '=',
            Tile::Water => '~',
            Tile::Wall(0) => ' ',
            Tile::Wall(_) => '#',
        }
    }
}

/// Water art variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterVariant {
    /// No water directly above: draw the bank
    Edge,
    /// Water continues from the row above
    Continuation,
}

/// One painted water tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterTile {
    pub x: i32,
    pub y: i32,
    pub variant: WaterVariant,
    /// False only under bridges, where the player walks over the water
    pub collidable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tile_is_empty() {
        assert_eq!(Tile::default(), Tile::Empty);
        assert!(!Tile::default().is_placed());
        assert!(Tile::Wall(0).is_placed());
    }

    #[test]
    fn test_floor_backing_only_for_exposed_walls() {
        assert!(!Tile::Wall(0).has_floor_backing());
        assert!(Tile::Wall(16).has_floor_backing());
        assert!(!Tile::Floor.has_floor_backing());
    }
}
