//! Tile Miner - A 2D tile-world mining simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, mining, game state)
//! - `settings`: Tunable simulation configuration
//!
//! Rendering and input polling live outside this crate. A frontend feeds one
//! [`sim::InputIntent`] per tick and reads state back through the query
//! methods on [`sim::Simulation`].

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, SimConfig};
pub use sim::{InputIntent, MoveDirection, Simulation};

use glam::Vec2;

/// Default simulation constants
pub mod consts {
    /// Tile edge length in world units (pixels)
    pub const TILE_SIZE: f32 = 32.0;

    /// World dimensions in tiles
    pub const ROWS: usize = 64;
    pub const COLS: usize = 128;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set on jump (negative = up)
    pub const JUMP_POWER: f32 = -10.0;
    /// Terminal fall velocity per tick
    pub const MAX_FALL_SPEED: f32 = 12.0;
    /// Horizontal walk velocity per tick
    pub const MOVE_SPEED: f32 = 6.0;
    /// Horizontal velocity multiplier applied on ticks without move input
    pub const FRICTION: f32 = 0.8;

    /// Player bounding box in tiles (1 wide, 2 tall)
    pub const PLAYER_WIDTH_TILES: f32 = 1.0;
    pub const PLAYER_HEIGHT_TILES: f32 = 2.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;

    /// Mining reach, measured center-to-center in tiles
    pub const MINING_RANGE_TILES: f32 = 5.0;
    /// Progress added per in-range mining tick
    pub const MINING_INCREMENT: f32 = 1.0;
    /// Ticks needed per point of hardness
    pub const HARDNESS_MULTIPLIER: u32 = 20;

    /// Time-of-day advance per tick (clock runs 0..100)
    pub const DAY_CYCLE_RATE: f32 = 0.1;
    pub const DAY_CYCLE_LENGTH: f32 = 100.0;
}

/// Map a world-space coordinate to a tile index (floor division)
#[inline]
pub fn world_to_tile(coord: f32, tile_size: f32) -> i64 {
    (coord / tile_size).floor() as i64
}

/// World-space center of the tile at (row, col)
#[inline]
pub fn tile_center(row: usize, col: usize, tile_size: f32) -> Vec2 {
    Vec2::new(
        col as f32 * tile_size + tile_size / 2.0,
        row as f32 * tile_size + tile_size / 2.0,
    )
}

/// World-space top-left corner of the tile at (row, col)
#[inline]
pub fn tile_origin(row: usize, col: usize, tile_size: f32) -> Vec2 {
    Vec2::new(col as f32 * tile_size, row as f32 * tile_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_tile_floors_negatives() {
        assert_eq!(world_to_tile(0.0, 32.0), 0);
        assert_eq!(world_to_tile(31.9, 32.0), 0);
        assert_eq!(world_to_tile(32.0, 32.0), 1);
        assert_eq!(world_to_tile(-0.5, 32.0), -1);
    }

    #[test]
    fn test_tile_center() {
        let c = tile_center(2, 3, 32.0);
        assert_eq!(c, Vec2::new(112.0, 80.0));
        assert_eq!(tile_origin(2, 3, 32.0), Vec2::new(96.0, 64.0));
    }
}
