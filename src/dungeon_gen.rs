use crate::bsp::{PartitionNode, Region};
use crate::components::{Lamp, Position};
use crate::config::DungeonConfig;
use crate::error::Result;
use crate::grid::{GridPos, TileGrid};
use crate::kernel::{place_lamps, place_walls, resolve_bridges};
use crate::raster::rasterize;
use crate::spawning::{plan_spawns, ChestKind, SpawnPlan};
use crate::tile::WaterTile;
use crate::water::paint_water;
use hecs::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Result of dungeon generation
#[derive(Debug, Clone, Serialize)]
pub struct DungeonResult {
    pub level: u32,
    pub tree: PartitionNode,
    pub grid: TileGrid,
    pub water: Vec<WaterTile>,
    pub lamps: Vec<GridPos>,
    pub spawns: SpawnPlan,
}

impl DungeonResult {
    /// All rooms, left to right in the partition tree
    pub fn rooms(&self) -> Vec<Region> {
        self.tree.rooms()
    }

    /// Spawn the planned objects and the lamps into `world`.
    /// Returns the number of entities spawned.
    pub fn spawn_into(&self, world: &mut World) -> usize {
        let mut spawned = self.spawns.spawn_into(world);
        for &(x, y) in &self.lamps {
            world.spawn((Position::new(x, y), Lamp));
            spawned += 1;
        }
        spawned
    }

    /// Text dump of the level, top row first. Objects are drawn over lamps,
    /// lamps over tiles.
    pub fn render_ascii(&self) -> String {
        let mut overlay: HashMap<GridPos, char> = HashMap::new();
        for &pos in &self.lamps {
            overlay.insert(pos, '*');
        }
        for chest in &self.spawns.chests {
            overlay.insert(chest.pos, 'c');
        }
        for trap in &self.spawns.traps {
            overlay.insert(trap.pos, '^');
        }
        for enemy in &self.spawns.enemies {
            overlay.insert(enemy.pos, if enemy.is_turret() { 'T' } else { 'E' });
        }
        let singles = [(self.spawns.key, 'k'), (self.spawns.exit, '>'), (self.spawns.player, '@')];
        for (pos, glyph) in singles {
            if let Some(pos) = pos {
                overlay.insert(pos, glyph);
            }
        }

        let mut out = String::with_capacity((self.grid.width + 1) * self.grid.height);
        for y in (0..self.grid.height as i32).rev() {
            for x in 0..self.grid.width as i32 {
                let glyph = overlay
                    .get(&(x, y))
                    .copied()
                    .unwrap_or_else(|| self.grid.tile(x, y).glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

pub struct DungeonGenerator;

impl DungeonGenerator {
    /// Generate one level from a fixed seed. The same config, level and seed
    /// always produce the same dungeon.
    pub fn generate(config: &DungeonConfig, level: u32, seed: u64) -> Result<DungeonResult> {
        info!(seed, level, "generating dungeon");
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with_rng(config, level, &mut rng)
    }

    /// Generate one level drawing from `rng` in a fixed stage order.
    pub fn generate_with_rng(
        config: &DungeonConfig,
        level: u32,
        rng: &mut impl Rng,
    ) -> Result<DungeonResult> {
        puffin::profile_function!();
        config.validate()?;

        let bounds = Region::new(config.padding, config.padding, config.rows, config.columns);
        let mut tree = PartitionNode::generate(bounds, config.min_room_size, config.max_room_size, rng);
        debug!(
            rooms = tree.rooms().len(),
            corridors = tree.corridors().len(),
            bridges = tree.bridges().len(),
            "partitioned dungeon"
        );

        let (mut grid, mut bridge_positions) =
            rasterize(&tree, config.grid_width(), config.grid_height());
        resolve_bridges(&mut grid, &bridge_positions);
        let water = paint_water(&mut grid, &mut bridge_positions);
        place_walls(&mut grid);
        let lamps = place_lamps(&grid);
        let spawns = plan_spawns(&mut tree, &mut grid, config, level, rng);

        debug!(
            weapon_chest = spawns.chests.iter().any(|c| c.kind == ChestKind::WeaponChest),
            lamps = lamps.len(),
            "dungeon ready"
        );
        Ok(DungeonResult {
            level,
            tree,
            grid,
            water,
            lamps,
            spawns,
        })
    }
}
