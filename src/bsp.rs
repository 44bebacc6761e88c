//! Binary space partitioning of the dungeon region.
//!
//! The region is split recursively into a tree of [`PartitionNode`]s. A second
//! post-order pass carves one room per leaf and links every pair of siblings
//! with a connector: a wide corridor or a one-tile bridge.

use crate::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// An axis-aligned integer rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn x_max(&self) -> i32 {
        self.x + self.width
    }

    pub fn y_max(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a cell is inside this rectangle (half-open on the max edges)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x_max() && y >= self.y && y < self.y_max()
    }

    /// Check if `other` lies entirely inside this rectangle
    pub fn contains_region(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }

    /// Shrink by `margin` on every side. `None` if nothing is left.
    pub fn inset(&self, margin: i32) -> Option<Region> {
        let inner = Region::new(
            self.x + margin,
            self.y + margin,
            self.width - 2 * margin,
            self.height - 2 * margin,
        );
        (!inner.is_empty()).then_some(inner)
    }

    /// Iterate every cell of the rectangle, column by column
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let Region { x, y, width, height } = *self;
        (x..x + width.max(0)).flat_map(move |cx| (y..y + height.max(0)).map(move |cy| (cx, cy)))
    }
}

/// Draw from `[lo, hi)`, or return `lo` when the range is empty.
pub(crate) fn random_in(rng: &mut impl Rng, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

/// A node of the partition tree
#[derive(Clone, Debug, Serialize)]
pub enum PartitionNode {
    Leaf(LeafNode),
    Split(SplitNode),
}

/// An unsplit region hosting one room
#[derive(Clone, Debug, Serialize)]
pub struct LeafNode {
    pub bounds: Region,
    /// Set by the room pass; absent only between partitioning and room creation
    pub room: Option<Region>,
    /// Corner carved out of `room`
    pub cutout: Option<Region>,
    /// A turret already spawned here
    pub has_turret: bool,
}

/// A region split into two children, owning the connectors that link them
#[derive(Clone, Debug, Serialize)]
pub struct SplitNode {
    pub bounds: Region,
    pub left: Box<PartitionNode>,
    pub right: Box<PartitionNode>,
    /// Connectors thicker than one tile
    pub corridors: Vec<Region>,
    /// One-tile connectors, later surrounded by water
    pub bridges: Vec<Region>,
}

impl LeafNode {
    fn new(bounds: Region) -> Self {
        Self {
            bounds,
            room: None,
            cutout: None,
            has_turret: false,
        }
    }

    /// Check if a cell is part of the room and not carved away by the cutout
    pub fn room_contains(&self, x: i32, y: i32) -> bool {
        self.room.is_some_and(|room| room.contains(x, y))
            && !self.cutout.is_some_and(|cutout| cutout.contains(x, y))
    }

    /// Carve a room inside the bounds, leaving at least one tile of margin.
    fn create_room(&mut self, rng: &mut impl Rng) {
        let bounds = self.bounds;
        let width = random_in(rng, bounds.width / 2, bounds.width - 1).max(1);
        let height = random_in(rng, bounds.height / 2, bounds.height - 1).max(1);
        let offset_x = random_in(rng, 1, bounds.width - width - 1);
        let offset_y = random_in(rng, 1, bounds.height - height - 1);
        let room = Region::new(bounds.x + offset_x, bounds.y + offset_y, width, height);
        self.room = Some(room);

        if rng.gen_bool(CUTOUT_CHANCE)
            && room.width >= CUTOUT_MIN_ROOM_SIZE
            && room.height >= CUTOUT_MIN_ROOM_SIZE
        {
            self.cutout = Some(random_cutout(room, rng));
        }
        trace!(?bounds, ?room, cutout = ?self.cutout, "created room");
    }
}

/// Pick a corner of the room and cut a rectangle of at most half its size from it.
fn random_cutout(room: Region, rng: &mut impl Rng) -> Region {
    let width = random_in(rng, 1, room.width / 2);
    let height = random_in(rng, 1, room.height / 2);
    let (x, y) = match rng.gen_range(0..4) {
        0 => (room.x, room.y),
        1 => (room.x_max() - width, room.y),
        2 => (room.x, room.y_max() - height),
        _ => (room.x_max() - width, room.y_max() - height),
    };
    let x_max = (x + width).min(room.x_max());
    let y_max = (y + height).min(room.y_max());
    Region::new(x, y, x_max - x, y_max - y)
}

/// Pick a random cell of the room that is outside the cutout. Cutouts are
/// always strictly smaller than their room, so this terminates.
fn connector_anchor(room: Region, cutout: Option<Region>, rng: &mut impl Rng) -> (i32, i32) {
    loop {
        let x = anchor_axis(room.x, room.width, rng);
        let y = anchor_axis(room.y, room.height, rng);
        if !cutout.is_some_and(|c| c.contains(x, y)) {
            return (x, y);
        }
    }
}

/// Prefer the room interior so connectors don't run along the wall.
fn anchor_axis(start: i32, len: i32, rng: &mut impl Rng) -> i32 {
    if len >= 3 {
        random_in(rng, start + 1, start + len - 1)
    } else {
        random_in(rng, start, start + len)
    }
}

/// Build the dog-leg between two anchors, `from` being the leftmost.
fn connector_legs(
    from: (i32, i32),
    to: (i32, i32),
    thickness: i32,
    rng: &mut impl Rng,
) -> Vec<Region> {
    let dx = from.0 - to.0;
    let dy = from.1 - to.1;
    let run = dx.abs() + 1;
    let rise = dy.abs();

    if dx == 0 {
        let start = if dy < 0 { from } else { to };
        return vec![Region::new(start.0, start.1, thickness, rise)];
    }

    if rng.gen_bool(0.5) {
        // Across first, then up or down at the far anchor
        let vertical = if dy < 0 {
            Region::new(to.0, from.1, thickness, rise)
        } else {
            Region::new(to.0, to.1, thickness, rise)
        };
        vec![Region::new(from.0, from.1, run, thickness), vertical]
    } else {
        // Up or down at the near anchor, then across
        let vertical = if dy < 0 {
            Region::new(from.0, from.1, thickness, rise)
        } else {
            Region::new(from.0, to.1, thickness, rise)
        };
        vec![vertical, Region::new(from.0, to.1, run, thickness)]
    }
}

impl SplitNode {
    /// Link the first room of each child subtree.
    fn connect_children(&mut self, rng: &mut impl Rng) {
        let (Some((left_room, left_cutout)), Some((right_room, right_cutout))) =
            (self.left.first_room(), self.right.first_room())
        else {
            return;
        };

        let mut from = connector_anchor(left_room, left_cutout, rng);
        let mut to = connector_anchor(right_room, right_cutout, rng);
        if from.0 > to.0 {
            std::mem::swap(&mut from, &mut to);
        }

        let thickness = rng.gen_range(CONNECTOR_MIN_THICKNESS..=CONNECTOR_MAX_THICKNESS);
        let legs = connector_legs(from, to, thickness, rng);
        let connectors = if thickness > 1 {
            &mut self.corridors
        } else {
            &mut self.bridges
        };
        connectors.extend(legs.into_iter().filter(|leg| !leg.is_empty()));
        trace!(?from, ?to, thickness, "connected siblings");
    }
}

impl PartitionNode {
    pub fn leaf(bounds: Region) -> Self {
        PartitionNode::Leaf(LeafNode::new(bounds))
    }

    pub fn bounds(&self) -> Region {
        match self {
            PartitionNode::Leaf(leaf) => leaf.bounds,
            PartitionNode::Split(split) => split.bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PartitionNode::Leaf(_))
    }

    /// Partition `bounds` and furnish every leaf with a room and every split
    /// with a connector between its children.
    pub fn generate(bounds: Region, min_size: i32, max_size: i32, rng: &mut impl Rng) -> Self {
        puffin::profile_function!();
        let mut root = PartitionNode::leaf(bounds);
        root.split_recursive(min_size, max_size, rng);
        root.create_rooms(rng);
        root
    }

    /// Split this node in two along an axis picked from its aspect ratio.
    /// Returns false, leaving the node untouched, if it is already split or
    /// either half would be narrower than `min_size`.
    pub fn try_split(&mut self, min_size: i32, rng: &mut impl Rng) -> bool {
        let PartitionNode::Leaf(leaf) = self else {
            return false;
        };
        let bounds = leaf.bounds;

        let width = bounds.width as f32;
        let height = bounds.height as f32;
        let split_horizontal = if width / height >= SPLIT_ASPECT_RATIO {
            false // Too wide, cut into left and right
        } else if height / width >= SPLIT_ASPECT_RATIO {
            true // Too tall, cut into bottom and top
        } else {
            rng.gen_bool(0.5)
        };

        if (bounds.width.min(bounds.height) as f32) / 2.0 < min_size as f32 {
            return false;
        }

        let (left, right) = if split_horizontal {
            let split = random_in(rng, min_size, bounds.height - min_size);
            (
                Region::new(bounds.x, bounds.y, bounds.width, split),
                Region::new(bounds.x, bounds.y + split, bounds.width, bounds.height - split),
            )
        } else {
            let split = random_in(rng, min_size, bounds.width - min_size);
            (
                Region::new(bounds.x, bounds.y, split, bounds.height),
                Region::new(bounds.x + split, bounds.y, bounds.width - split, bounds.height),
            )
        };

        *self = PartitionNode::Split(SplitNode {
            bounds,
            left: Box::new(PartitionNode::leaf(left)),
            right: Box::new(PartitionNode::leaf(right)),
            corridors: Vec::new(),
            bridges: Vec::new(),
        });
        true
    }

    /// Keep splitting while leaves exceed `max_size`; leaves that already fit
    /// are still split most of the time so room sizes vary.
    fn split_recursive(&mut self, min_size: i32, max_size: i32, rng: &mut impl Rng) {
        if !self.is_leaf() {
            return;
        }
        let bounds = self.bounds();
        let too_large = bounds.width > max_size || bounds.height > max_size;
        if !(too_large || rng.gen_bool(FURTHER_SPLIT_CHANCE)) {
            return;
        }

        if self.try_split(min_size, rng) {
            if let PartitionNode::Split(split) = self {
                split.left.split_recursive(min_size, max_size, rng);
                split.right.split_recursive(min_size, max_size, rng);
            }
        } else if too_large {
            warn!(?bounds, min_size, max_size, "cannot split oversized region, keeping it as one leaf");
        } else {
            trace!(?bounds, "leaf too small to split");
        }
    }

    /// Post-order: children get rooms before their parent connects them.
    fn create_rooms(&mut self, rng: &mut impl Rng) {
        match self {
            PartitionNode::Leaf(leaf) => leaf.create_room(rng),
            PartitionNode::Split(split) => {
                split.left.create_rooms(rng);
                split.right.create_rooms(rng);
                split.connect_children(rng);
            }
        }
    }

    /// The room of the leftmost leaf that has one, with that leaf's cutout.
    pub fn first_room(&self) -> Option<(Region, Option<Region>)> {
        match self {
            PartitionNode::Leaf(leaf) => leaf.room.map(|room| (room, leaf.cutout)),
            PartitionNode::Split(split) => split
                .left
                .first_room()
                .or_else(|| split.right.first_room()),
        }
    }

    /// Visit every node, children before parents, left before right.
    pub fn visit_post_order<'a>(&'a self, visit: &mut impl FnMut(&'a PartitionNode)) {
        if let PartitionNode::Split(split) = self {
            split.left.visit_post_order(visit);
            split.right.visit_post_order(visit);
        }
        visit(self);
    }

    /// All leaves, left to right
    pub fn leaves(&self) -> Vec<&LeafNode> {
        let mut leaves = Vec::new();
        self.visit_post_order(&mut |node| {
            if let PartitionNode::Leaf(leaf) = node {
                leaves.push(leaf);
            }
        });
        leaves
    }

    /// Visit every leaf mutably, left to right
    pub fn for_each_leaf_mut(&mut self, visit: &mut impl FnMut(&mut LeafNode)) {
        match self {
            PartitionNode::Leaf(leaf) => visit(leaf),
            PartitionNode::Split(split) => {
                split.left.for_each_leaf_mut(visit);
                split.right.for_each_leaf_mut(visit);
            }
        }
    }

    /// All rooms, left to right
    pub fn rooms(&self) -> Vec<Region> {
        self.leaves().iter().filter_map(|leaf| leaf.room).collect()
    }

    /// Corridors of the whole tree in post-order
    pub fn corridors(&self) -> Vec<Region> {
        let mut corridors = Vec::new();
        self.visit_post_order(&mut |node| {
            if let PartitionNode::Split(split) = node {
                corridors.extend_from_slice(&split.corridors);
            }
        });
        corridors
    }

    /// Bridges of the whole tree in post-order
    pub fn bridges(&self) -> Vec<Region> {
        let mut bridges = Vec::new();
        self.visit_post_order(&mut |node| {
            if let PartitionNode::Split(split) = node {
                bridges.extend_from_slice(&split.bridges);
            }
        });
        bridges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check_tiling(node: &PartitionNode) {
        if let PartitionNode::Split(split) = node {
            let (a, b) = (split.left.bounds(), split.right.bounds());
            assert!(split.bounds.contains_region(&a));
            assert!(split.bounds.contains_region(&b));
            assert_eq!(a.area() + b.area(), split.bounds.area());
            let side_by_side = a.x_max() == b.x && a.y == b.y && a.height == b.height;
            let stacked = a.y_max() == b.y && a.x == b.x && a.width == b.width;
            assert!(side_by_side || stacked, "{a:?} and {b:?} do not tile {:?}", split.bounds);
            check_tiling(&split.left);
            check_tiling(&split.right);
        }
    }

    #[test]
    fn test_region_edges_and_containment() {
        let region = Region::new(2, 3, 4, 5);
        assert_eq!(region.x_max(), 6);
        assert_eq!(region.y_max(), 8);
        assert!(region.contains(2, 3));
        assert!(region.contains(5, 7));
        assert!(!region.contains(6, 7));
        assert!(!region.contains(5, 8));
        assert!(region.contains_region(&Region::new(3, 4, 3, 4)));
        assert!(!region.contains_region(&Region::new(3, 4, 4, 4)));
    }

    #[test]
    fn test_region_inset() {
        let region = Region::new(0, 0, 10, 6);
        assert_eq!(region.inset(2), Some(Region::new(2, 2, 6, 2)));
        assert_eq!(region.inset(3), None);
    }

    #[test]
    fn test_region_cells_cover_area() {
        let region = Region::new(1, 1, 3, 2);
        assert_eq!(region.cells().count(), 6);
        assert_eq!(Region::new(0, 0, 0, 4).cells().count(), 0);
    }

    #[test]
    fn test_random_in_empty_range_returns_low() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_in(&mut rng, 5, 5), 5);
        assert_eq!(random_in(&mut rng, 5, 2), 5);
        for _ in 0..100 {
            let v = random_in(&mut rng, 3, 7);
            assert!((3..7).contains(&v));
        }
    }

    #[test]
    fn test_small_node_doesnt_split() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut node = PartitionNode::leaf(Region::new(0, 0, 11, 11));
        assert!(!node.try_split(6, &mut rng));
        assert!(node.is_leaf());
    }

    #[test]
    fn test_split_node_refuses_second_split() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut node = PartitionNode::leaf(Region::new(0, 0, 40, 40));
        assert!(node.try_split(6, &mut rng));
        assert!(!node.try_split(6, &mut rng));
    }

    #[test]
    fn test_wide_node_splits_into_left_and_right() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut node = PartitionNode::leaf(Region::new(0, 0, 40, 20));
        assert!(node.try_split(6, &mut rng));
        let PartitionNode::Split(split) = &node else {
            panic!("expected split");
        };
        let (a, b) = (split.left.bounds(), split.right.bounds());
        assert_eq!(a.height, 20);
        assert_eq!(b.height, 20);
        assert_eq!(a.x_max(), b.x);
        assert!(a.width >= 6 && b.width >= 6);
    }

    #[test]
    fn test_tall_node_splits_into_bottom_and_top() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut node = PartitionNode::leaf(Region::new(5, 5, 20, 40));
        assert!(node.try_split(6, &mut rng));
        let PartitionNode::Split(split) = &node else {
            panic!("expected split");
        };
        let (a, b) = (split.left.bounds(), split.right.bounds());
        assert_eq!(a.width, 20);
        assert_eq!(a.y_max(), b.y);
        assert!(a.height >= 6 && b.height >= 6);
    }

    #[test]
    fn test_children_tile_parent() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tree = PartitionNode::generate(Region::new(2, 2, 40, 40), 6, 15, &mut rng);
            check_tiling(&tree);
        }
    }

    #[test]
    fn test_rooms_inside_bounds_and_cutouts_inside_rooms() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tree = PartitionNode::generate(Region::new(2, 2, 60, 45), 6, 15, &mut rng);
            for leaf in tree.leaves() {
                let room = leaf.room.expect("every leaf gets a room");
                assert!(!room.is_empty());
                assert!(leaf.bounds.contains_region(&room), "{room:?} escapes {:?}", leaf.bounds);
                if let Some(cutout) = leaf.cutout {
                    assert!(!cutout.is_empty());
                    assert!(room.contains_region(&cutout));
                    assert!(cutout.width < room.width && cutout.height < room.height);
                }
            }
        }
    }

    #[test]
    fn test_large_region_is_split() {
        let mut rng = StdRng::seed_from_u64(11);
        let tree = PartitionNode::generate(Region::new(0, 0, 40, 40), 6, 15, &mut rng);
        assert!(!tree.is_leaf());
        for leaf in tree.leaves() {
            assert!(leaf.bounds.width >= 6 && leaf.bounds.height >= 6);
        }
    }

    #[test]
    fn test_every_split_gets_a_connector() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tree = PartitionNode::generate(Region::new(2, 2, 40, 40), 6, 15, &mut rng);
            tree.visit_post_order(&mut |node| {
                if let PartitionNode::Split(split) = node {
                    assert!(!split.corridors.is_empty() || !split.bridges.is_empty());
                    for bridge in &split.bridges {
                        assert!(bridge.width == 1 || bridge.height == 1);
                    }
                    for corridor in &split.corridors {
                        assert!(corridor.width >= 2 || corridor.height >= 2);
                    }
                }
            });
        }
    }

    #[test]
    fn test_first_room_prefers_left_subtree() {
        let mut rng = StdRng::seed_from_u64(5);
        let tree = PartitionNode::generate(Region::new(0, 0, 40, 40), 6, 15, &mut rng);
        let leftmost = tree.leaves()[0];
        let (room, cutout) = tree.first_room().expect("tree has rooms");
        assert_eq!(Some(room), leftmost.room);
        assert_eq!(cutout, leftmost.cutout);
    }

    #[test]
    fn test_connector_legs_same_column_is_single_vertical() {
        let mut rng = StdRng::seed_from_u64(0);
        let legs = connector_legs((4, 10), (4, 3), 2, &mut rng);
        assert_eq!(legs, vec![Region::new(4, 3, 2, 7)]);
    }

    #[test]
    fn test_connector_legs_reach_both_anchors() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (from, to) = ((3, 12), (9, 4));
            let legs = connector_legs(from, to, 1, &mut rng);
            assert_eq!(legs.len(), 2);
            // Vertical legs stop one row short of the upper anchor
            let reached = |(x, y): (i32, i32)| {
                legs.iter()
                    .any(|leg| leg.contains(x, y) || leg.contains(x, y - 1))
            };
            assert!(reached(from));
            assert!(reached(to));
        }
    }

    #[test]
    fn test_anchor_avoids_cutout() {
        let mut rng = StdRng::seed_from_u64(9);
        let room = Region::new(0, 0, 8, 8);
        let cutout = Region::new(0, 0, 3, 3);
        for _ in 0..200 {
            let (x, y) = connector_anchor(room, Some(cutout), &mut rng);
            assert!(room.contains(x, y));
            assert!(!cutout.contains(x, y));
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            PartitionNode::generate(Region::new(2, 2, 40, 40), 6, 15, &mut rng)
        };
        let (a, b) = (build(42), build(42));
        assert_eq!(a.rooms(), b.rooms());
        assert_eq!(a.corridors(), b.corridors());
        assert_eq!(a.bridges(), b.bridges());
    }
}
