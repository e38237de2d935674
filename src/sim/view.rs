//! Camera rectangle and visibility culling
//!
//! The frontend owns camera motion; the core only needs a rectangle to
//! decide which tiles are worth handing to the renderer.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned camera rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle centered on `focus`, pushed back inside `[0, world]` where the
    /// world is larger than the view
    pub fn centered_on(focus: Vec2, width: f32, height: f32, world: Vec2) -> Self {
        let size = Vec2::new(width, height);
        let max = (world - size).max(Vec2::ZERO);
        let origin = (focus - size / 2.0).clamp(Vec2::ZERO, max);
        Self { origin, size }
    }

    /// Row and column ranges covered by this rectangle, clamped to the grid
    pub fn tile_span(&self, rows: usize, cols: usize, tile_size: f32) -> (Range<usize>, Range<usize>) {
        let span = |start: f32, len: f32, limit: usize| {
            let lo = (start / tile_size).floor().max(0.0) as usize;
            let hi = (((start + len) / tile_size).floor() + 1.0).max(0.0) as usize;
            lo.min(limit)..hi.min(limit)
        };
        (
            span(self.origin.y, self.size.y, rows),
            span(self.origin.x, self.size.x, cols),
        )
    }
}
