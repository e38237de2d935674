//! Deterministic simulation module
//!
//! All world logic lives here. This module must be pure and deterministic:
//! - One fixed step per input intent
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod block;
pub mod collision;
pub mod grid;
pub mod mining;
pub mod player;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod view;

pub use block::{BlockKind, BlockProps, BlockTable, Hardness};
pub use collision::{MoveResolution, box_collides, resolve_move};
pub use grid::{Cell, TileGrid};
pub use mining::{IgnoreReason, MineOutcome, MiningState, attempt_mine};
pub use player::{Inventory, Player};
pub use state::{DayClock, GameEvent, PlayerSnapshot, Simulation};
pub use terrain::{OreGate, Terrain, TerrainParams, generate_heightmap, generate_terrain};
pub use tick::{InputIntent, MoveDirection, tick};
pub use view::Viewport;
