//! Game state and core simulation types
//!
//! `Simulation` owns the grid and the player for the whole session. Every
//! other component borrows them for the duration of one call.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::{BlockKind, BlockTable};
use super::grid::{Cell, TileGrid};
use super::mining::{self, MiningState};
use super::player::{Inventory, Player};
use super::terrain::generate_terrain;
use super::view::Viewport;
use crate::consts::DAY_CYCLE_LENGTH;
use crate::settings::{ConfigError, SimConfig};

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// Downward motion was blocked after being airborne
    Landed,
    BlockBroken { row: usize, col: usize, kind: BlockKind },
}

/// Time-of-day clock, runs 0..100 and wraps
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayClock {
    pub time: f32,
}

impl DayClock {
    pub fn advance(&mut self, rate: f32) {
        self.time = (self.time + rate) % DAY_CYCLE_LENGTH;
    }

    /// First half of the cycle is day
    pub fn is_day(&self) -> bool {
        self.time < DAY_CYCLE_LENGTH / 2.0
    }
}

/// Read-only view of the player for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub on_ground: bool,
    pub inventory: Inventory,
    pub mining: MiningState,
    /// Fraction of the current target's threshold, if a target is set
    pub mining_fraction: Option<f32>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    /// World seed (0 when built from a supplied grid)
    pub seed: u64,
    pub config: SimConfig,
    pub blocks: BlockTable,
    pub grid: TileGrid,
    pub player: Player,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub clock: DayClock,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl Simulation {
    /// Default config and block table
    pub fn new(seed: u64) -> Self {
        Self::with_config(SimConfig::default(), BlockTable::standard(), seed)
    }

    /// Validate `config`, then generate a world from `seed`
    pub fn from_config(
        config: SimConfig,
        blocks: BlockTable,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config, blocks, seed))
    }

    /// Generate a world from `seed` and spawn the player on it.
    ///
    /// `config` is taken as-is and must already pass
    /// [`SimConfig::validate`]; use [`Simulation::from_config`] otherwise.
    pub fn with_config(config: SimConfig, blocks: BlockTable, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = generate_terrain(config.rows, config.cols, &config.terrain, &mut rng);
        log::info!(
            "Generated {}x{} world with seed {}",
            config.rows,
            config.cols,
            seed
        );
        let mut sim = Self::from_grid(config, blocks, terrain.grid);
        sim.seed = seed;
        sim
    }

    /// Wrap an existing grid (custom maps, tests). `config` must already be
    /// valid; its `rows`/`cols` are ignored in favor of the grid's.
    pub fn from_grid(config: SimConfig, blocks: BlockTable, grid: TileGrid) -> Self {
        let player = Player::spawn(&grid, &config);
        Self {
            seed: 0,
            config,
            blocks,
            grid,
            player,
            time_ticks: 0,
            clock: DayClock::default(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid.get(row, col)
    }

    /// Occupied cells intersecting a camera rectangle, row-major
    pub fn visible_cells(
        &self,
        viewport: &Viewport,
    ) -> impl Iterator<Item = (usize, usize, BlockKind)> + '_ {
        let (rows, cols) = viewport.tile_span(self.rows(), self.cols(), self.config.tile_size);
        self.grid.cells_in(rows, cols)
    }

    /// Viewport of the given size centered on the player, kept inside the world
    pub fn camera(&self, width: f32, height: f32) -> Viewport {
        Viewport::centered_on(
            self.player.center(),
            width,
            height,
            self.world_size(),
        )
    }

    /// World extent in world units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.cols() as f32 * self.config.tile_size,
            self.rows() as f32 * self.config.tile_size,
        )
    }

    pub fn mining_fraction(&self) -> Option<f32> {
        mining::progress_fraction(&self.grid, &self.player, &self.blocks, &self.config)
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            pos: self.player.pos,
            size: self.player.size,
            health: self.player.health,
            max_health: self.player.max_health,
            on_ground: self.player.on_ground,
            inventory: self.player.inventory.clone(),
            mining: self.player.mining,
            mining_fraction: self.mining_fraction(),
        }
    }

    /// Take the events from the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
