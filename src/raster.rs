//! Rasterize the partition tree into a [`TileGrid`].
//!
//! Rooms go down first, then corridors, then bridges; each stage only claims
//! cells no earlier stage has classified. Bridge cells are classified as water
//! and reported in stamping order so the water pass can surround them.

use crate::bsp::PartitionNode;
use crate::grid::{Classification, GridPos, TileGrid};
use crate::tile::Tile;
use tracing::debug;

/// Stamp rooms and connectors of `tree` onto a fresh `width * height` grid.
/// Returns the grid and the cells claimed by bridges.
pub fn rasterize(tree: &PartitionNode, width: usize, height: usize) -> (TileGrid, Vec<GridPos>) {
    puffin::profile_function!();
    let mut grid = TileGrid::new(width, height);

    for leaf in tree.leaves() {
        let Some(room) = leaf.room else {
            continue;
        };
        for (x, y) in room.cells() {
            if leaf.room_contains(x, y) && grid.classification(x, y) == Classification::Void {
                grid.set_classification(x, y, Classification::Walkable);
                grid.set_tile(x, y, Tile::Floor);
            }
        }
    }

    for corridor in tree.corridors() {
        for (x, y) in corridor.cells() {
            if grid.in_bounds(x, y) && grid.classification(x, y) == Classification::Void {
                grid.set_classification(x, y, Classification::Walkable);
                grid.set_tile(x, y, Tile::Corridor);
            }
        }
    }

    let mut bridge_positions = Vec::new();
    for bridge in tree.bridges() {
        for (x, y) in bridge.cells() {
            if grid.in_bounds(x, y) && grid.classification(x, y) == Classification::Void {
                grid.set_classification(x, y, Classification::Water);
                bridge_positions.push((x, y));
            }
        }
    }

    debug!(
        walkable = grid.count(Classification::Walkable),
        bridge_cells = bridge_positions.len(),
        "rasterized partition tree"
    );
    (grid, bridge_positions)
}
