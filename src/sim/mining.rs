//! Mining: sustained player action that breaks blocks
//!
//! Progress is a single scalar on the player, not a per-cell counter. When
//! the player switches targets before a block breaks, the accumulated
//! progress is applied to the new target's threshold unless
//! `reset_progress_on_retarget` is enabled in the config.

use serde::{Deserialize, Serialize};

use super::block::{BlockKind, BlockTable};
use super::grid::TileGrid;
use super::player::Player;
use crate::settings::SimConfig;
use crate::tile_center;

/// Mining progress carried by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MiningState {
    /// Accumulated mining ticks
    pub progress: f32,
    /// Cell last mined in range, as (row, col)
    pub target: Option<(usize, usize)>,
}

/// Why a mining attempt had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OutOfBounds,
    Empty,
    Unbreakable,
    OutOfRange,
}

/// What a single mining attempt did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MineOutcome {
    /// No state changed
    Ignored(IgnoreReason),
    /// Progress advanced but the block holds
    Progressed { progress: f32, required: f32 },
    /// Block removed and credited to the inventory
    Broke(BlockKind),
}

/// Mine the cell at (row, col) for one tick
pub fn attempt_mine(
    grid: &mut TileGrid,
    player: &mut Player,
    blocks: &BlockTable,
    config: &SimConfig,
    row: usize,
    col: usize,
) -> MineOutcome {
    if row >= grid.rows() || col >= grid.cols() {
        return MineOutcome::Ignored(IgnoreReason::OutOfBounds);
    }
    let Some(kind) = grid.get(row, col).kind() else {
        return MineOutcome::Ignored(IgnoreReason::Empty);
    };
    if kind == BlockKind::Unbreakable {
        return MineOutcome::Ignored(IgnoreReason::Unbreakable);
    }
    let Some(required) = blocks
        .hardness(kind)
        .break_threshold(config.hardness_multiplier)
    else {
        return MineOutcome::Ignored(IgnoreReason::Unbreakable);
    };

    let distance = player
        .center()
        .distance(tile_center(row, col, config.tile_size));
    if distance > config.mining_range() {
        return MineOutcome::Ignored(IgnoreReason::OutOfRange);
    }

    let state = &mut player.mining;
    if config.reset_progress_on_retarget && state.target != Some((row, col)) {
        state.progress = 0.0;
    }
    state.target = Some((row, col));
    state.progress += config.mining_increment;

    if state.progress >= required {
        grid.remove(row, col);
        player.inventory.add(kind, 1);
        player.mining = MiningState::default();
        MineOutcome::Broke(kind)
    } else {
        MineOutcome::Progressed {
            progress: state.progress,
            required,
        }
    }
}

/// Fraction of the current target's break threshold reached, for progress bars
pub fn progress_fraction(
    grid: &TileGrid,
    player: &Player,
    blocks: &BlockTable,
    config: &SimConfig,
) -> Option<f32> {
    let (row, col) = player.mining.target?;
    let kind = grid.get(row, col).kind()?;
    let required = blocks
        .hardness(kind)
        .break_threshold(config.hardness_multiplier)?;
    Some((player.mining.progress / required).min(1.0))
}
