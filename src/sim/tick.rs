//! Fixed-step simulation tick
//!
//! One call advances the world by exactly one tick. Order within a tick:
//! input -> velocity -> collision-resolved movement -> mining -> day clock.

use serde::{Deserialize, Serialize};

use super::mining::{MineOutcome, attempt_mine};
use super::state::{GameEvent, Simulation};

/// Horizontal movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
    #[default]
    None,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    pub move_dir: MoveDirection,
    /// Jump (only takes effect on the ground)
    pub jump: bool,
    /// Mining button held
    pub mine: bool,
    /// Cell under the cursor, as (row, col)
    pub mine_target: Option<(usize, usize)>,
}

impl InputIntent {
    pub fn walk(move_dir: MoveDirection) -> Self {
        Self {
            move_dir,
            ..Default::default()
        }
    }

    pub fn mine_at(row: usize, col: usize) -> Self {
        Self {
            mine: true,
            mine_target: Some((row, col)),
            ..Default::default()
        }
    }
}

/// Advance the simulation by one tick
pub fn tick(sim: &mut Simulation, input: &InputIntent) {
    sim.events.clear();
    sim.time_ticks += 1;

    let was_on_ground = sim.player.on_ground;
    if sim.player.apply_intent(input, &sim.config) {
        sim.events.push(GameEvent::Jumped);
    }

    let res = sim.player.integrate(&sim.grid, &sim.config);
    if res.on_ground && !was_on_ground {
        sim.events.push(GameEvent::Landed);
        log::trace!("Landed at {:?} on tick {}", sim.player.pos, sim.time_ticks);
    }

    if input.mine {
        if let Some((row, col)) = input.mine_target {
            let outcome = attempt_mine(
                &mut sim.grid,
                &mut sim.player,
                &sim.blocks,
                &sim.config,
                row,
                col,
            );
            if let MineOutcome::Broke(kind) = outcome {
                log::debug!("Broke {} at ({}, {})", kind.name(), row, col);
                sim.events.push(GameEvent::BlockBroken { row, col, kind });
            }
        }
    }

    sim.clock.advance(sim.config.day_cycle_rate);
}

impl Simulation {
    /// Advance by one tick; see [`tick`]
    pub fn step(&mut self, input: &InputIntent) {
        tick(self, input);
    }
}
