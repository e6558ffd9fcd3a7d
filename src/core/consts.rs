pub const DEFAULT_WIDTH: i32 = 4;
pub const DEFAULT_HEIGHT: i32 = 4;
pub const WIN_TILE: u32 = 2048;

pub const START_TILES: usize = 2;
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;
pub const SPAWN_LOW_VALUE: u32 = 2;
pub const SPAWN_HIGH_VALUE: u32 = 4;
