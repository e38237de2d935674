//! The player entity and its platformer kinematics

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::collision::{MoveResolution, resolve_move};
use super::grid::TileGrid;
use super::mining::MiningState;
use super::tick::{InputIntent, MoveDirection};
use crate::settings::SimConfig;

/// Mined block counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: BTreeMap<BlockKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count held for a kind (0 if never collected)
    pub fn count(&self, kind: BlockKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: BlockKind, amount: u32) {
        *self.counts.entry(kind).or_insert(0) += amount;
    }

    /// Total blocks held
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Non-zero entries in block-kind order
    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(k, n)| (*k, *n))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding box (world units)
    pub pos: Vec2,
    /// Per-tick velocity (+y is down)
    pub vel: Vec2,
    /// Bounding box size
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub inventory: Inventory,
    /// Downward motion was blocked on the last tick
    pub on_ground: bool,
    pub mining: MiningState,
}

impl Player {
    pub fn new(pos: Vec2, config: &SimConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: config.player_size(),
            health: config.player_max_health,
            max_health: config.player_max_health,
            inventory: Inventory::new(),
            on_ground: false,
            mining: MiningState::default(),
        }
    }

    /// Spawn in the middle column, two rows above its topmost block.
    /// An empty column spawns at the top of the world.
    pub fn spawn(grid: &TileGrid, config: &SimConfig) -> Self {
        let col = grid.cols() / 2;
        let row = grid
            .first_solid_row(col)
            .map(|r| r as i64 - 2)
            .unwrap_or(0);
        let pos = Vec2::new(
            col as f32 * config.tile_size,
            row as f32 * config.tile_size,
        );
        log::debug!("Player spawn at column {}, row {} ({:?})", col, row, pos);
        Self::new(pos, config)
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Apply move/jump input and gravity to the velocity.
    /// Returns true if a jump started this tick.
    pub fn apply_intent(&mut self, intent: &InputIntent, config: &SimConfig) -> bool {
        match intent.move_dir {
            MoveDirection::Left => self.vel.x = -config.move_speed,
            MoveDirection::Right => self.vel.x = config.move_speed,
            MoveDirection::None => self.vel.x *= config.friction,
        }

        // on_ground still reflects the previous tick's landing
        let jumped = intent.jump && self.on_ground;
        if jumped {
            self.vel.y = config.jump_power;
        }

        self.vel.y = (self.vel.y + config.gravity).min(config.max_fall_speed);
        jumped
    }

    /// Move through the grid by the current velocity.
    ///
    /// A blocked vertical step zeroes `vel.y`; a blocked horizontal step only
    /// freezes X and leaves `vel.x` to decay through friction.
    pub fn integrate(&mut self, grid: &TileGrid, config: &SimConfig) -> MoveResolution {
        let res = resolve_move(grid, self.pos, self.vel, self.size, config.tile_size);
        self.pos = res.pos;
        self.on_ground = res.on_ground;
        if res.blocked_y {
            self.vel.y = 0.0;
        }
        res
    }
}
