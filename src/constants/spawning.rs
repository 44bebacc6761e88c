//! Spawn placement constants.

/// Rejection-sampling attempts before a sample is reported as failed
pub const SAMPLE_MAX_ATTEMPTS: u32 = 500;

/// Default dungeon-wide enemy cap
pub const ENEMY_SPAWN_CAP: u32 = 25;
/// Default dungeon-wide trap cap
pub const TRAP_SPAWN_CAP: u32 = 12;
/// Room area per enemy
pub const ROOM_AREA_PER_ENEMY: i32 = 8;
/// Room area per trap
pub const ROOM_AREA_PER_TRAP: i32 = 12;
/// Number of trap kinds known to the renderer
pub const TRAP_KIND_COUNT: u8 = 2;

/// Inclusive enemy roster range per dungeon level; deeper levels clamp to the last row
pub const ENEMY_ROSTER_BY_LEVEL: [(usize, usize); 7] =
    [(0, 1), (0, 2), (1, 2), (0, 3), (1, 3), (1, 4), (1, 5)];
/// Roster index of the ranged turret; at most one per room
pub const TURRET_ROSTER_INDEX: usize = 2;

/// Barrels placed anywhere in the dungeon every level
pub const BARREL_COUNT: usize = 3;
