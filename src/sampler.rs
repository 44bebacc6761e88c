//! Rejection sampling of free floor cells.
//!
//! A sample is accepted only on walkable, unoccupied ground and immediately
//! claims its cell, so later samples never land on it. Exhaustion is not an
//! error: the sampler gives up after a fixed number of draws and returns
//! `None`, and callers skip whatever they were about to place.

use crate::bsp::{random_in, PartitionNode, Region};
use crate::constants::SAMPLE_MAX_ATTEMPTS;
use crate::grid::{GridPos, TileGrid};
use rand::Rng;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSampler {
    pub max_attempts: u32,
}

impl Default for PositionSampler {
    fn default() -> Self {
        Self {
            max_attempts: SAMPLE_MAX_ATTEMPTS,
        }
    }
}

impl PositionSampler {
    /// Draw cells uniformly from `room` until one is free, then claim it.
    pub fn in_room(&self, grid: &mut TileGrid, room: Region, rng: &mut impl Rng) -> Option<GridPos> {
        for _ in 0..self.max_attempts {
            let x = random_in(rng, room.x, room.x_max());
            let y = random_in(rng, room.y, room.y_max());
            if grid.is_walkable(x, y) && !grid.is_occupied(x, y) {
                grid.set_occupied(x, y);
                return Some((x, y));
            }
        }
        warn!(?room, attempts = self.max_attempts, "no free cell found in room");
        None
    }

    /// Walk down to a random leaf and sample its room.
    pub fn in_tree(
        &self,
        tree: &PartitionNode,
        grid: &mut TileGrid,
        rng: &mut impl Rng,
    ) -> Option<GridPos> {
        let room = random_leaf_room(tree, rng)?;
        self.in_room(grid, room, rng)
    }

    /// Like [`in_tree`](Self::in_tree), but keeps a margin of a quarter of the
    /// room width from the walls when the room is big enough to allow it.
    pub fn spawn_in_tree(
        &self,
        tree: &PartitionNode,
        grid: &mut TileGrid,
        rng: &mut impl Rng,
    ) -> Option<GridPos> {
        let room = random_leaf_room(tree, rng)?;
        let area = room.inset(room.width / 4).unwrap_or(room);
        self.in_room(grid, area, rng)
    }
}

fn random_leaf_room(tree: &PartitionNode, rng: &mut impl Rng) -> Option<Region> {
    let mut node = tree;
    loop {
        match node {
            PartitionNode::Leaf(leaf) => return leaf.room,
            PartitionNode::Split(split) => {
                node = if rng.gen_bool(0.5) {
                    split.left.as_ref()
                } else {
                    split.right.as_ref()
                };
            }
        }
    }
}
