//! Dungeon generation constants.

/// Default board extent along x, in cells
pub const DUNGEON_DEFAULT_ROWS: i32 = 40;
/// Default board extent along y, in cells
pub const DUNGEON_DEFAULT_COLUMNS: i32 = 40;
/// Default void border around the partitioned region
pub const DUNGEON_DEFAULT_PADDING: i32 = 2;
/// Default minimum BSP leaf size
pub const DUNGEON_DEFAULT_MIN_ROOM_SIZE: i32 = 6;
/// Default size above which a leaf is always split
pub const DUNGEON_DEFAULT_MAX_ROOM_SIZE: i32 = 15;
/// Smallest accepted `min_room_size`; below this a leaf cannot hold a room with a margin
pub const MIN_ROOM_SIZE_FLOOR: i32 = 3;
/// Upper bound on padded grid cells a config may request
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Aspect ratio at which the split axis is forced
pub const SPLIT_ASPECT_RATIO: f32 = 1.25;
/// Chance a leaf that already fits `max_room_size` is split anyway
pub const FURTHER_SPLIT_CHANCE: f64 = 0.75;
/// Chance a room gets a corner cutout
pub const CUTOUT_CHANCE: f64 = 0.25;
/// Rooms narrower than this on either axis never get a cutout
pub const CUTOUT_MIN_ROOM_SIZE: i32 = 4;
/// Connector thickness range (inclusive); thickness 1 is a bridge
pub const CONNECTOR_MIN_THICKNESS: i32 = 1;
pub const CONNECTOR_MAX_THICKNESS: i32 = 3;

/// 3x3 neighbourhood sum at which a lamp is placed
pub const LAMP_THRESHOLD: i32 = 6;
