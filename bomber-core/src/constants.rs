//! Game constants for the standard arena.

// Arena dimensions (cells)
pub const GRID_WIDTH: u8 = 13;
pub const GRID_HEIGHT: u8 = 11;

// Bombs
pub const BOMB_FUSE_TICKS: u8 = 8;
pub const STARTING_BLAST_RANGE: u8 = 3;
pub const STARTING_BOMB_CAPACITY: u8 = 1;

// Agents
pub const MAX_AGENTS: usize = 4;

// Committed-move history kept for cycle detection
pub const MOVE_HISTORY_LEN: usize = 8;

// Arena generation (percent chances, drawn per candidate cell / per box)
pub const BOX_DENSITY_PCT: u32 = 55;
pub const BOX_RANGE_ITEM_PCT: u32 = 20;
pub const BOX_BOMB_ITEM_PCT: u32 = 20;

// Spawn corners stay clear out to this manhattan radius
pub const SPAWN_CLEARANCE: u8 = 2;
