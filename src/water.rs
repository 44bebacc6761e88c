//! Water around bridges.
//!
//! Every bridge cell gets a ring of water. Bridges are processed top row
//! first, so a cell can tell from the row above whether it continues a body
//! of water or starts its bank.

use crate::grid::{Classification, GridPos, TileGrid};
use crate::tile::{Tile, WaterTile, WaterVariant};
use std::cmp::Reverse;
use tracing::debug;

/// Paint water around `bridge_positions`, which are re-sorted by descending
/// row. Bridge cells end up walkable again, the surrounding water does not.
pub fn paint_water(grid: &mut TileGrid, bridge_positions: &mut [GridPos]) -> Vec<WaterTile> {
    puffin::profile_function!();
    bridge_positions.sort_by_key(|&(_, y)| Reverse(y));

    let mut painted = Vec::new();
    for &(bx, by) in bridge_positions.iter() {
        for dy in (-1..=1).rev() {
            for dx in -1..=1 {
                let (x, y) = (bx + dx, by + dy);
                let is_bridge = dx == 0 && dy == 0;
                if !grid.in_bounds(x, y) || (grid.tile(x, y).is_placed() && !is_bridge) {
                    continue;
                }

                let variant = if grid.classification(x, y + 1) == Classification::Water {
                    WaterVariant::Continuation
                } else {
                    WaterVariant::Edge
                };
                painted.push(WaterTile {
                    x,
                    y,
                    variant,
                    collidable: !is_bridge,
                });
                if !is_bridge {
                    grid.set_tile(x, y, Tile::Water);
                }
                grid.set_classification(x, y, Classification::Water);
            }
        }
    }

    for &(x, y) in bridge_positions.iter() {
        grid.set_classification(x, y, Classification::Walkable);
    }

    debug!(
        bridges = bridge_positions.len(),
        water_tiles = painted.len(),
        "painted water"
    );
    painted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_bridges(width: usize, height: usize, bridges: &[GridPos]) -> TileGrid {
        let mut grid = TileGrid::new(width, height);
        for &(x, y) in bridges {
            grid.set_classification(x, y, Classification::Water);
            grid.set_tile(x, y, Tile::Bridge(0));
        }
        grid
    }

    fn water_at(painted: &[WaterTile], x: i32, y: i32) -> Option<WaterTile> {
        painted.iter().copied().find(|w| w.x == x && w.y == y)
    }

    #[test]
    fn test_single_bridge_gets_ring_of_water() {
        let mut bridges = vec![(4, 5)];
        let mut grid = grid_with_bridges(10, 10, &bridges);
        let painted = paint_water(&mut grid, &mut bridges);
        assert_eq!(painted.len(), 9);

        // Top row has nothing above it
        for x in 3..=5 {
            assert_eq!(water_at(&painted, x, 6).map(|w| w.variant), Some(WaterVariant::Edge));
        }
        // Lower rows continue the row above
        for (x, y) in [(3, 5), (5, 5), (3, 4), (4, 4), (5, 4)] {
            assert_eq!(
                water_at(&painted, x, y).map(|w| w.variant),
                Some(WaterVariant::Continuation)
            );
            assert_eq!(grid.tile(x, y), Tile::Water);
            assert_eq!(grid.classification(x, y), Classification::Water);
        }

        let under_bridge = water_at(&painted, 4, 5).expect("bridge cell painted");
        assert!(!under_bridge.collidable);
        assert!(painted.iter().filter(|w| !w.collidable).count() == 1);
        assert_eq!(grid.tile(4, 5), Tile::Bridge(0));
        assert!(grid.is_walkable(4, 5));
    }

    #[test]
    fn test_higher_row_is_painted_first() {
        // Given lowest row first; painting must still start at row 6
        let mut bridges = vec![(4, 5), (4, 6)];
        let mut grid = grid_with_bridges(10, 10, &bridges);
        let painted = paint_water(&mut grid, &mut bridges);

        assert_eq!(bridges, vec![(4, 6), (4, 5)]);
        assert_eq!(painted[0].y, 7);
        // Beside the row-6 bridge the water continues from row 7. Had row 5
        // gone first, its ring would have drawn (3, 6) as a bank.
        assert_eq!(
            water_at(&painted, 3, 6).map(|w| w.variant),
            Some(WaterVariant::Continuation)
        );
        assert_eq!(painted.iter().filter(|w| (w.x, w.y) == (3, 6)).count(), 1);
        assert_eq!(
            water_at(&painted, 3, 7).map(|w| w.variant),
            Some(WaterVariant::Edge)
        );
    }

    #[test]
    fn test_water_does_not_cover_placed_tiles() {
        let mut bridges = vec![(4, 5)];
        let mut grid = grid_with_bridges(10, 10, &bridges);
        grid.set_classification(3, 5, Classification::Walkable);
        grid.set_tile(3, 5, Tile::Floor);
        let painted = paint_water(&mut grid, &mut bridges);
        assert!(water_at(&painted, 3, 5).is_none());
        assert_eq!(grid.tile(3, 5), Tile::Floor);
        assert!(grid.is_walkable(3, 5));
    }

    #[test]
    fn test_bridge_on_grid_edge_is_clipped() {
        let mut bridges = vec![(0, 0)];
        let mut grid = grid_with_bridges(4, 4, &bridges);
        let painted = paint_water(&mut grid, &mut bridges);
        assert_eq!(painted.len(), 4);
        assert!(painted.iter().all(|w| grid.in_bounds(w.x, w.y)));
    }
}
