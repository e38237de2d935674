//! Simulation configuration
//!
//! Every tunable the core uses lives here. Defaults come from
//! [`crate::consts`]; a frontend can override any subset from JSON.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::TerrainParams;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but a value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    /// Grid height in tiles
    pub rows: usize,
    /// Grid width in tiles
    pub cols: usize,
    /// Tile edge length in world units
    pub tile_size: f32,
    /// Terrain generation parameters
    pub terrain: TerrainParams,

    // === Physics ===
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_power: f32,
    pub max_fall_speed: f32,
    pub move_speed: f32,
    /// Horizontal velocity multiplier on ticks without move input
    pub friction: f32,

    // === Player ===
    /// Bounding box width in tiles
    pub player_width_tiles: f32,
    /// Bounding box height in tiles
    pub player_height_tiles: f32,
    pub player_max_health: f32,

    // === Mining ===
    /// Reach in tiles, player center to cell center
    pub mining_range_tiles: f32,
    /// Progress gained per in-range mining tick
    pub mining_increment: f32,
    /// Ticks required per point of hardness
    pub hardness_multiplier: u32,
    /// Reset progress when the mined cell changes (off = progress carries over)
    pub reset_progress_on_retarget: bool,

    // === Day cycle ===
    /// Clock advance per tick
    pub day_cycle_rate: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            tile_size: TILE_SIZE,
            terrain: TerrainParams::default(),

            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            max_fall_speed: MAX_FALL_SPEED,
            move_speed: MOVE_SPEED,
            friction: FRICTION,

            player_width_tiles: PLAYER_WIDTH_TILES,
            player_height_tiles: PLAYER_HEIGHT_TILES,
            player_max_health: PLAYER_MAX_HEALTH,

            mining_range_tiles: MINING_RANGE_TILES,
            mining_increment: MINING_INCREMENT,
            hardness_multiplier: HARDNESS_MULTIPLIER,
            reset_progress_on_retarget: false,

            day_cycle_rate: DAY_CYCLE_RATE,
        }
    }
}

impl SimConfig {
    /// Smallest grid height that still leaves room for the terrain band and floor
    pub const MIN_ROWS: usize = 8;

    /// Parse and validate a config from JSON text. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < Self::MIN_ROWS {
            return Err(invalid(format!(
                "rows must be at least {}, got {}",
                Self::MIN_ROWS,
                self.rows
            )));
        }
        if self.cols == 0 {
            return Err(invalid("cols must be positive".into()));
        }
        if !(self.tile_size > 0.0) {
            return Err(invalid(format!("tile_size must be positive, got {}", self.tile_size)));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(invalid(format!("friction must be within [0, 1], got {}", self.friction)));
        }
        if self.gravity < 0.0 || !(self.max_fall_speed > 0.0) || self.move_speed < 0.0 {
            return Err(invalid(
                "gravity and move_speed must be non-negative, max_fall_speed positive".into(),
            ));
        }
        if !(self.player_width_tiles > 0.0) || !(self.player_height_tiles > 0.0) {
            return Err(invalid("player dimensions must be positive".into()));
        }
        if !(self.mining_increment > 0.0) || self.hardness_multiplier == 0 {
            return Err(invalid(
                "mining_increment and hardness_multiplier must be positive".into(),
            ));
        }
        if self.mining_range_tiles < 0.0 || self.day_cycle_rate < 0.0 {
            return Err(invalid("mining_range_tiles and day_cycle_rate must be non-negative".into()));
        }
        self.terrain.validate()
    }

    /// Player bounding box in world units
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(
            self.player_width_tiles * self.tile_size,
            self.player_height_tiles * self.tile_size,
        )
    }

    /// Mining reach in world units
    pub fn mining_range(&self) -> f32 {
        self.mining_range_tiles * self.tile_size
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}
