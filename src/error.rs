//! Error types for dungeon generation.
//!
//! Only malformed input is an error. Refused splits and exhausted samplers are
//! recovered where they happen and never surface here.

/// A configuration that cannot produce a dungeon
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i32 },

    #[error("max_room_size ({max}) is smaller than min_room_size ({min})")]
    MaxBelowMin { min: i32, max: i32 },

    #[error("min_room_size ({min}) is below the smallest usable size ({floor})")]
    MinTooSmall { min: i32, floor: i32 },

    #[error("padded grid for {rows}x{columns} with padding {padding} exceeds {max_cells} cells")]
    GridTooLarge {
        rows: i32,
        columns: i32,
        padding: i32,
        max_cells: usize,
    },

    #[error("region {rows}x{columns} cannot hold a single room of min_room_size {min}")]
    RegionTooSmall { rows: i32, columns: i32, min: i32 },

    #[error("{table} variant table has {actual} entries, kernel needs {required}")]
    VariantTableTooSmall {
        table: &'static str,
        actual: usize,
        required: usize,
    },
}

/// Anything that stops a generation run before it starts
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
