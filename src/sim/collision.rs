//! Collision detection and response against the tile grid
//!
//! Boxes are tested by sampling their four corners, each pulled in by one
//! unit from the far edges so a box flush against a tile boundary does not
//! register the neighboring tile. This is point sampling, not a swept test:
//! a body moving more than a tile per tick can pass through a one-tile wall.

use glam::Vec2;

use super::grid::TileGrid;
use crate::world_to_tile;

/// Result of moving a box through the grid for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolution {
    /// Position after the move
    pub pos: Vec2,
    /// Downward motion was blocked this tick
    pub on_ground: bool,
    /// Horizontal step was rejected
    pub blocked_x: bool,
    /// Vertical step was rejected
    pub blocked_y: bool,
}

/// The four sample points of a box with top-left `pos`
#[inline]
pub fn box_corners(pos: Vec2, size: Vec2) -> [Vec2; 4] {
    let far = pos + size - Vec2::ONE;
    [
        pos,
        Vec2::new(far.x, pos.y),
        Vec2::new(pos.x, far.y),
        far,
    ]
}

/// Check whether a box at `pos` overlaps any solid tile
///
/// Corners that fall outside the grid never collide.
pub fn box_collides(grid: &TileGrid, pos: Vec2, size: Vec2, tile_size: f32) -> bool {
    box_corners(pos, size).iter().any(|corner| {
        let row = world_to_tile(corner.y, tile_size);
        let col = world_to_tile(corner.x, tile_size);
        grid.is_solid(row, col)
    })
}

/// Move a box by `vel`, one axis at a time
///
/// X is tried first at the current Y; Y is then tried at the committed X.
/// A blocked axis keeps its old coordinate. `on_ground` is set only when the
/// vertical step was blocked while moving down.
pub fn resolve_move(
    grid: &TileGrid,
    pos: Vec2,
    vel: Vec2,
    size: Vec2,
    tile_size: f32,
) -> MoveResolution {
    let mut out = MoveResolution {
        pos,
        on_ground: false,
        blocked_x: false,
        blocked_y: false,
    };

    let new_x = pos.x + vel.x;
    if box_collides(grid, Vec2::new(new_x, pos.y), size, tile_size) {
        out.blocked_x = true;
    } else {
        out.pos.x = new_x;
    }

    let new_y = pos.y + vel.y;
    if box_collides(grid, Vec2::new(out.pos.x, new_y), size, tile_size) {
        out.blocked_y = true;
        out.on_ground = vel.y > 0.0;
    } else {
        out.pos.y = new_y;
    }

    out
}
