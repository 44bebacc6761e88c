//! Data-driven object spawning.
//!
//! Decides where the player, exit, key, enemies, traps and chests go. Every
//! position comes from the [`PositionSampler`], so no two objects share a
//! cell and nothing lands on water. The resulting [`SpawnPlan`] is plain data;
//! [`SpawnPlan::spawn_into`] hands it to an ECS world.

use crate::bsp::PartitionNode;
use crate::components::{Chest, Enemy, Exit, Key, Player, Position, Trap};
use crate::config::DungeonConfig;
use crate::constants::*;
use crate::grid::{GridPos, TileGrid};
use crate::sampler::PositionSampler;
use hecs::World;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// Dungeon-wide cap on one spawn category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnBudget {
    pub max: u32,
    pub current: u32,
}

impl SpawnBudget {
    pub fn new(max: u32) -> Self {
        Self { max, current: 0 }
    }

    pub fn has_capacity(&self) -> bool {
        self.current < self.max
    }

    pub fn record(&mut self) {
        self.current += 1;
    }
}

/// An enemy placement; `roster_index` selects the enemy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnemySpawn {
    pub pos: GridPos,
    pub roster_index: usize,
}

impl EnemySpawn {
    pub fn is_turret(&self) -> bool {
        self.roster_index == TURRET_ROSTER_INDEX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrapSpawn {
    pub pos: GridPos,
    pub kind: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChestKind {
    Barrel,
    WeaponChest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChestSpawn {
    pub pos: GridPos,
    pub kind: ChestKind,
}

/// Everything placed on one level. Objects whose sample failed are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpawnPlan {
    pub player: Option<GridPos>,
    pub exit: Option<GridPos>,
    pub key: Option<GridPos>,
    pub enemies: Vec<EnemySpawn>,
    pub traps: Vec<TrapSpawn>,
    pub chests: Vec<ChestSpawn>,
}

impl SpawnPlan {
    /// Every claimed position, in spawn order
    pub fn positions(&self) -> Vec<GridPos> {
        let mut positions: Vec<GridPos> = [self.player, self.exit, self.key]
            .into_iter()
            .flatten()
            .collect();
        positions.extend(self.enemies.iter().map(|e| e.pos));
        positions.extend(self.traps.iter().map(|t| t.pos));
        positions.extend(self.chests.iter().map(|c| c.pos));
        positions
    }

    /// Spawn one entity per planned object. Returns the number spawned.
    pub fn spawn_into(&self, world: &mut World) -> usize {
        let mut spawned = 0;
        if let Some((x, y)) = self.player {
            world.spawn((Position::new(x, y), Player));
            spawned += 1;
        }
        if let Some((x, y)) = self.exit {
            world.spawn((Position::new(x, y), Exit));
            spawned += 1;
        }
        if let Some((x, y)) = self.key {
            world.spawn((Position::new(x, y), Key));
            spawned += 1;
        }
        for enemy in &self.enemies {
            let (x, y) = enemy.pos;
            world.spawn((
                Position::new(x, y),
                Enemy {
                    roster_index: enemy.roster_index,
                },
            ));
            spawned += 1;
        }
        for trap in &self.traps {
            let (x, y) = trap.pos;
            world.spawn((Position::new(x, y), Trap { kind: trap.kind }));
            spawned += 1;
        }
        for chest in &self.chests {
            let (x, y) = chest.pos;
            world.spawn((Position::new(x, y), Chest { kind: chest.kind }));
            spawned += 1;
        }
        spawned
    }
}

/// Inclusive roster range for a level; deeper levels reuse the last row
fn roster_range(level: u32) -> (usize, usize) {
    let row = (level as usize).min(ENEMY_ROSTER_BY_LEVEL.len() - 1);
    ENEMY_ROSTER_BY_LEVEL[row]
}

/// Roll an enemy type, re-rolling turrets in a room that already has one.
/// Every roster row offers a non-turret type, so the loop ends.
fn roll_enemy(level: u32, room_has_turret: bool, rng: &mut impl Rng) -> usize {
    let (lo, hi) = roster_range(level);
    loop {
        let index = rng.gen_range(lo..=hi);
        if !(room_has_turret && index == TURRET_ROSTER_INDEX) {
            return index;
        }
    }
}

/// Place every object of a level. Sampling claims cells on `grid`, and leaf
/// turret flags are updated on `tree`.
pub fn plan_spawns(
    tree: &mut PartitionNode,
    grid: &mut TileGrid,
    config: &DungeonConfig,
    level: u32,
    rng: &mut impl Rng,
) -> SpawnPlan {
    puffin::profile_function!();
    let sampler = PositionSampler::default();
    let player = sampler.spawn_in_tree(tree, grid, rng);
    let exit = sampler.spawn_in_tree(tree, grid, rng);
    let key = sampler.spawn_in_tree(tree, grid, rng);
    let mut plan = SpawnPlan {
        player,
        exit,
        key,
        ..SpawnPlan::default()
    };
    for (name, pos) in [("player", plan.player), ("exit", plan.exit), ("key", plan.key)] {
        if pos.is_none() {
            warn!(object = name, "no spawn position found, skipping");
        }
    }

    let mut enemy_budget = SpawnBudget::new(config.enemy_cap);
    tree.for_each_leaf_mut(&mut |leaf| {
        let Some(room) = leaf.room else {
            return;
        };
        for _ in 0..room.area() / ROOM_AREA_PER_ENEMY {
            if !enemy_budget.has_capacity() {
                return;
            }
            let Some(pos) = sampler.in_room(grid, room, rng) else {
                continue;
            };
            let roster_index = roll_enemy(level, leaf.has_turret, rng);
            let enemy = EnemySpawn { pos, roster_index };
            if enemy.is_turret() {
                leaf.has_turret = true;
            }
            plan.enemies.push(enemy);
            enemy_budget.record();
        }
    });

    let mut trap_budget = SpawnBudget::new(config.trap_cap);
    tree.for_each_leaf_mut(&mut |leaf| {
        let Some(room) = leaf.room else {
            return;
        };
        for _ in 0..room.area() / ROOM_AREA_PER_TRAP {
            if !trap_budget.has_capacity() {
                return;
            }
            let Some(pos) = sampler.in_room(grid, room, rng) else {
                continue;
            };
            let kind = rng.gen_range(0..TRAP_KIND_COUNT);
            plan.traps.push(TrapSpawn { pos, kind });
            trap_budget.record();
        }
    });

    let weapon_chest = (level % 2 == 1).then_some(ChestKind::WeaponChest);
    let chests = std::iter::repeat(ChestKind::Barrel)
        .take(BARREL_COUNT)
        .chain(weapon_chest);
    for kind in chests {
        match sampler.spawn_in_tree(tree, grid, rng) {
            Some(pos) => plan.chests.push(ChestSpawn { pos, kind }),
            None => warn!(?kind, "no chest position found, skipping"),
        }
    }

    debug!(
        level,
        enemies = plan.enemies.len(),
        traps = plan.traps.len(),
        chests = plan.chests.len(),
        "planned spawns"
    );
    plan
}
