pub mod arena;
pub mod constants;
pub mod error;
pub mod grid;
pub mod hazard;
pub mod physics;
pub mod rng;
pub mod world;

pub use error::RuleCode;
pub use grid::{BoxContent, Grid, ItemKind, Pos, Tile};
pub use hazard::{project_hazards, HazardGrid};
pub use physics::resolve_tick;
pub use world::{Action, AgentId, AgentState, Bomb, Direction, Move, WorldSnapshot};
