use crate::tile::Tile;
use serde::{Deserialize, Serialize};

/// A cell coordinate `(x, y)`
pub type GridPos = (i32, i32);

/// Walkability class of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Classification {
    #[default]
    Void,
    Walkable,
    Water,
}

impl Classification {
    /// Signed value: walkable 1, water -1, void 0
    pub fn value(&self) -> i32 {
        match self {
            Classification::Void => 0,
            Classification::Walkable => 1,
            Classification::Water => -1,
        }
    }

    /// Magnitude fed to the neighbourhood kernels
    pub fn weight(&self) -> i32 {
        self.value().abs()
    }
}

/// The rasterized dungeon: walkability, placed objects and the visual layer,
/// all `width * height` and indexed `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    classification: Vec<Classification>,
    occupied: Vec<bool>,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            classification: vec![Classification::Void; width * height],
            occupied: vec![false; width * height],
            tiles: vec![Tile::Empty; width * height],
        }
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.get_index(x, y).is_some()
    }

    /// Out-of-bounds cells read as `Void`
    pub fn classification(&self, x: i32, y: i32) -> Classification {
        self.get_index(x, y)
            .map_or(Classification::Void, |idx| self.classification[idx])
    }

    pub fn set_classification(&mut self, x: i32, y: i32, class: Classification) {
        if let Some(idx) = self.get_index(x, y) {
            self.classification[idx] = class;
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.classification(x, y) == Classification::Walkable
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get_index(x, y).is_some_and(|idx| self.occupied[idx])
    }

    /// Only the position sampler claims cells
    pub(crate) fn set_occupied(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.get_index(x, y) {
            self.occupied[idx] = true;
        }
    }

    /// Out-of-bounds cells read as `Empty`
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.get_index(x, y).map_or(Tile::Empty, |idx| self.tiles[idx])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(idx) = self.get_index(x, y) {
            self.tiles[idx] = tile;
        }
    }

    /// Copy of the classification layer, for passes that consume it destructively
    pub fn classification_snapshot(&self) -> Vec<Classification> {
        self.classification.clone()
    }

    pub fn count(&self, class: Classification) -> usize {
        self.classification.iter().filter(|c| **c == class).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_void_and_free() {
        let grid = TileGrid::new(4, 3);
        assert_eq!(grid.count(Classification::Void), 12);
        assert!(!grid.is_occupied(1, 1));
        assert_eq!(grid.tile(1, 1), Tile::Empty);
    }

    #[test]
    fn test_out_of_bounds_reads_are_void() {
        let mut grid = TileGrid::new(4, 3);
        grid.set_classification(-1, 0, Classification::Walkable);
        grid.set_classification(4, 0, Classification::Walkable);
        assert_eq!(grid.classification(-1, 0), Classification::Void);
        assert_eq!(grid.classification(0, 3), Classification::Void);
        assert_eq!(grid.count(Classification::Walkable), 0);
    }

    #[test]
    fn test_layers_are_independent() {
        let mut grid = TileGrid::new(4, 3);
        grid.set_classification(2, 1, Classification::Water);
        grid.set_occupied(3, 2);
        grid.set_tile(0, 0, Tile::Floor);
        assert_eq!(grid.classification(2, 1), Classification::Water);
        assert_eq!(grid.tile(2, 1), Tile::Empty);
        assert!(grid.is_occupied(3, 2));
        assert!(!grid.is_walkable(3, 2));
        assert_eq!(grid.tile(0, 0), Tile::Floor);
    }

    #[test]
    fn test_classification_weights() {
        assert_eq!(Classification::Walkable.weight(), 1);
        assert_eq!(Classification::Water.weight(), 1);
        assert_eq!(Classification::Void.weight(), 0);
        assert_eq!(Classification::Water.value(), -1);
    }
}
