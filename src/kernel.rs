//! Neighbourhood kernels.
//!
//! One 3x3 weighted sum drives three passes: wall variants, bridge variants
//! and lamp placement. With power-of-two weights the sum is a bitmask of
//! which neighbours are open, usable directly as a variant index.

use crate::constants::*;
use crate::grid::{Classification, GridPos, TileGrid};
use crate::tile::Tile;
use tracing::debug;

/// 3x3 weights, indexed `kernel[dy + 1][dx + 1]`
pub type Kernel = [[i32; 3]; 3];

/// A field of per-cell weights a kernel can be applied to
pub trait Neighborhood {
    /// Weight of the cell, 0 outside the field
    fn weight_at(&self, x: i32, y: i32) -> i32;
}

impl Neighborhood for TileGrid {
    fn weight_at(&self, x: i32, y: i32) -> i32 {
        self.classification(x, y).weight()
    }
}

/// Sum of `kernel` weights times cell weights around `origin`.
pub fn resolve(field: &impl Neighborhood, origin: GridPos, kernel: &Kernel) -> i32 {
    let (ox, oy) = origin;
    let mut index = 0;
    for (row, dy) in (-1..=1).enumerate() {
        for (col, dx) in (-1..=1).enumerate() {
            index += field.weight_at(ox + dx, oy + dy) * kernel[row][col];
        }
    }
    index
}

/// Window centers in the fixed scan order: top row first, left to right.
/// The outermost ring of the grid is never a center.
fn scan_centers(width: usize, height: usize) -> impl Iterator<Item = GridPos> {
    let (width, height) = (width as i32, height as i32);
    (1..height - 1)
        .rev()
        .flat_map(move |y| (1..width - 1).map(move |x| (x, y)))
}

/// Pick a bridge variant for every recorded bridge cell from its
/// 4-neighbourhood. Must run after rooms, corridors and bridges are classified.
pub fn resolve_bridges(grid: &mut TileGrid, bridge_positions: &[GridPos]) {
    puffin::profile_function!();
    for &(x, y) in bridge_positions {
        let index = resolve(grid, (x, y), &BRIDGE_KERNEL);
        if !grid.tile(x, y).is_placed() {
            grid.set_tile(x, y, Tile::Bridge(index as u8));
        }
    }
}

/// Fill every empty void cell with a wall whose variant encodes its open
/// neighbours. Returns the number of walls that face open ground.
pub fn place_walls(grid: &mut TileGrid) -> usize {
    puffin::profile_function!();
    let mut exposed = 0;
    for (x, y) in scan_centers(grid.width, grid.height) {
        if grid.tile(x, y).is_placed() || grid.classification(x, y) != Classification::Void {
            continue;
        }
        let index = resolve(grid, (x, y), &WALL_KERNEL);
        let wall = Tile::Wall(index as u8);
        if wall.has_floor_backing() {
            exposed += 1;
        }
        grid.set_tile(x, y, wall);
    }
    debug!(exposed, "placed walls");
    exposed
}

/// Scratch copy of the grid weights that lamps consume as they are placed
struct LampField {
    width: usize,
    height: usize,
    weights: Vec<i32>,
}

impl LampField {
    fn from_grid(grid: &TileGrid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            weights: grid
                .classification_snapshot()
                .iter()
                .map(Classification::weight)
                .collect(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn clear_around(&mut self, (x, y): GridPos) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(idx) = self.index(x + dx, y + dy) {
                    self.weights[idx] = 0;
                }
            }
        }
    }
}

impl Neighborhood for LampField {
    fn weight_at(&self, x: i32, y: i32) -> i32 {
        self.index(x, y).map_or(0, |idx| self.weights[idx])
    }
}

/// Greedily place lamps where a 3x3 window is mostly open ground. Each lamp
/// consumes its window, so lamps never share a neighbourhood. Scan order
/// decides which lamp wins a contested window.
pub fn place_lamps(grid: &TileGrid) -> Vec<GridPos> {
    puffin::profile_function!();
    let mut field = LampField::from_grid(grid);
    let mut lamps = Vec::new();
    for center in scan_centers(grid.width, grid.height) {
        if resolve(&field, center, &LAMP_KERNEL) >= LAMP_THRESHOLD {
            lamps.push(center);
            field.clear_around(center);
        }
    }
    debug!(lamps = lamps.len(), "placed lamps");
    lamps
}
