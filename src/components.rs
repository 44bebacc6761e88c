use crate::spawning::ChestKind;

/// Position component - grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Player spawn marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Level exit marker component
#[derive(Debug, Clone, Copy)]
pub struct Exit;

/// Exit key marker component
#[derive(Debug, Clone, Copy)]
pub struct Key;

/// Enemy component - which roster entry to instantiate
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub roster_index: usize,
}

/// Trap component
#[derive(Debug, Clone, Copy)]
pub struct Trap {
    pub kind: u8,
}

/// Chest component - barrel or weapon chest
#[derive(Debug, Clone, Copy)]
pub struct Chest {
    pub kind: ChestKind,
}

/// Lamp marker component
#[derive(Debug, Clone, Copy)]
pub struct Lamp;
