//! Procedural terrain generation
//!
//! Builds the initial tile grid from an explicit RNG:
//! 1. A bounded random-walk heightmap (rolling hills)
//! 2. Per-column fill: dirt cap, then stone with sequential ore gates
//! 3. Trees on a fraction of surface columns
//! 4. An unbreakable floor along the bottom row
//!
//! The same RNG state and params always produce the same grid.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::grid::{Cell, TileGrid};
use crate::settings::ConfigError;

/// One ore gate: a deep cell becomes `kind` if its draw is below
/// `threshold` and it sits more than `min_rows_from_bottom` rows above the
/// grid's last row index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OreGate {
    pub kind: BlockKind,
    pub threshold: f64,
    pub min_rows_from_bottom: usize,
}

impl OreGate {
    #[inline]
    fn admits(&self, draw: f64, row: usize, rows: usize) -> bool {
        draw < self.threshold && row + self.min_rows_from_bottom < rows
    }
}

/// Terrain generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Largest height change between neighboring columns
    pub max_step: u32,
    /// Dirt rows below the surface row before stone starts
    pub dirt_depth: usize,
    /// Gates checked in order; the first that admits a draw wins, else stone
    pub ore_gates: Vec<OreGate>,
    /// Chance that a column grows a tree
    pub tree_chance: f64,
    /// Trunk height is `trunk_min + rand(0..=trunk_extra)`
    pub trunk_min: usize,
    pub trunk_extra: usize,
    /// Canopy layer widths, bottom layer first
    pub canopy_widths: Vec<usize>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            max_step: 2,
            dirt_depth: 4,
            ore_gates: vec![
                OreGate {
                    kind: BlockKind::Diamond,
                    threshold: 0.01,
                    min_rows_from_bottom: 10,
                },
                OreGate {
                    kind: BlockKind::Gold,
                    threshold: 0.03,
                    min_rows_from_bottom: 5,
                },
                OreGate {
                    kind: BlockKind::Iron,
                    threshold: 0.08,
                    min_rows_from_bottom: 5,
                },
            ],
            tree_chance: 0.2,
            trunk_min: 3,
            trunk_extra: 3,
            canopy_widths: vec![1, 3, 5, 3, 1],
        }
    }
}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tree_chance) {
            return Err(ConfigError::Invalid(format!(
                "tree_chance must be within [0, 1], got {}",
                self.tree_chance
            )));
        }
        if let Some(gate) = self
            .ore_gates
            .iter()
            .find(|g| !(0.0..=1.0).contains(&g.threshold))
        {
            return Err(ConfigError::Invalid(format!(
                "ore threshold for {} must be within [0, 1], got {}",
                gate.kind.name(),
                gate.threshold
            )));
        }
        if self.trunk_min == 0 {
            return Err(ConfigError::Invalid("trunk_min must be at least 1".into()));
        }
        Ok(())
    }
}

/// Generated world plus the heightmap it was built from
#[derive(Debug, Clone)]
pub struct Terrain {
    pub grid: TileGrid,
    /// Surface row per column
    pub heights: Vec<usize>,
}

/// Inclusive height bounds for a grid with `rows` rows
#[inline]
pub fn height_bounds(rows: usize) -> (usize, usize) {
    (rows / 4, rows * 3 / 4)
}

/// Bounded random walk: starts at `rows / 2`, steps by at most `max_step`
pub fn generate_heightmap<R: Rng>(
    rows: usize,
    cols: usize,
    params: &TerrainParams,
    rng: &mut R,
) -> Vec<usize> {
    let (lo, hi) = height_bounds(rows);
    let step = params.max_step as i64;
    let mut heights = Vec::with_capacity(cols);
    for col in 0..cols {
        let h = if col == 0 {
            rows / 2
        } else {
            let prev = heights[col - 1] as i64;
            let next = prev + rng.random_range(-step..=step);
            next.clamp(lo as i64, hi as i64) as usize
        };
        heights.push(h);
    }
    heights
}

/// Generate a full world
pub fn generate_terrain<R: Rng>(
    rows: usize,
    cols: usize,
    params: &TerrainParams,
    rng: &mut R,
) -> Terrain {
    let heights = generate_heightmap(rows, cols, params, rng);
    let mut grid = TileGrid::new(rows, cols);
    let mut trees = 0usize;

    for (col, &surface) in heights.iter().enumerate() {
        let tree_roll: f64 = rng.random();

        for row in surface..rows {
            let kind = if row <= surface + params.dirt_depth {
                BlockKind::Dirt
            } else {
                deep_block(params, rng.random(), row, rows)
            };

            if row == surface && tree_roll < params.tree_chance {
                let trunk = params.trunk_min + rng.random_range(0..=params.trunk_extra);
                grow_tree(&mut grid, params, surface, col, trunk);
                trees += 1;
            }

            grid.set_if_empty(row, col, Cell::block(kind));
        }
    }

    // Floor
    if let Some(floor) = rows.checked_sub(1) {
        for col in 0..cols {
            grid.set(floor, col, Cell::block(BlockKind::Unbreakable));
        }
    }

    log::debug!(
        "Generated {}x{} terrain: {} trees, {} diamond, {} gold, {} iron",
        rows,
        cols,
        trees,
        grid.count(BlockKind::Diamond),
        grid.count(BlockKind::Gold),
        grid.count(BlockKind::Iron),
    );

    Terrain { grid, heights }
}

/// Pick the block for a cell below the dirt cap
fn deep_block(params: &TerrainParams, draw: f64, row: usize, rows: usize) -> BlockKind {
    params
        .ore_gates
        .iter()
        .find(|gate| gate.admits(draw, row, rows))
        .map(|gate| gate.kind)
        .unwrap_or(BlockKind::Stone)
}

/// Trunk rises from the surface row; canopy sits on top and only fills empty cells
fn grow_tree(grid: &mut TileGrid, params: &TerrainParams, surface: usize, col: usize, trunk: usize) {
    for dy in 0..trunk.min(surface + 1) {
        grid.set(surface - dy, col, Cell::block(BlockKind::Wood));
    }

    let cols = grid.cols();
    for (layer, &width) in params.canopy_widths.iter().enumerate() {
        let Some(row) = surface.checked_sub(trunk + layer) else {
            continue;
        };
        let start = col.saturating_sub(width / 2);
        let end = (col + width / 2 + 1).min(cols);
        for leaf_col in start..end {
            grid.set_if_empty(row, leaf_col, Cell::block(BlockKind::Leaves));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world(seed: u64) -> Terrain {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_terrain(64, 128, &TerrainParams::default(), &mut rng)
    }

    #[test]
    fn test_heightmap_starts_mid() {
        let mut rng = Pcg32::seed_from_u64(1);
        let heights = generate_heightmap(64, 128, &TerrainParams::default(), &mut rng);
        assert_eq!(heights.len(), 128);
        assert_eq!(heights[0], 32);
    }

    #[test]
    fn test_floor_is_unbreakable() {
        let terrain = world(7);
        let grid = &terrain.grid;
        for col in 0..grid.cols() {
            assert_eq!(grid.get(63, col).kind(), Some(BlockKind::Unbreakable));
        }
        assert_eq!(grid.count(BlockKind::Unbreakable), grid.cols());
    }

    #[test]
    fn test_same_seed_same_world() {
        assert_eq!(world(42).grid, world(42).grid);
        assert_ne!(world(42).grid, world(43).grid);
    }

    #[test]
    fn test_column_layers() {
        let terrain = world(3);
        let grid = &terrain.grid;
        for (col, &surface) in terrain.heights.iter().enumerate() {
            // Nothing but tree parts above the surface
            for row in 0..surface {
                if let Some(kind) = grid.get(row, col).kind() {
                    assert!(
                        matches!(kind, BlockKind::Wood | BlockKind::Leaves),
                        "unexpected {:?} above surface at ({}, {})",
                        kind,
                        row,
                        col
                    );
                }
            }
            // Surface is dirt, or the base of a trunk
            let top = grid.get(surface, col).kind();
            assert!(matches!(top, Some(BlockKind::Dirt | BlockKind::Wood)));
            // Dirt cap
            for row in surface + 1..=surface + 4 {
                assert_eq!(grid.get(row, col).kind(), Some(BlockKind::Dirt));
            }
            // Solid all the way down
            for row in surface..64 {
                assert!(!grid.get(row, col).is_empty());
            }
        }
    }

    #[test]
    fn test_ore_depth_limits() {
        for seed in 0..8 {
            let grid = world(seed).grid;
            for col in 0..grid.cols() {
                for row in 0..grid.rows() {
                    match grid.get(row, col).kind() {
                        Some(BlockKind::Diamond) => assert!(row < 64 - 10),
                        Some(BlockKind::Gold | BlockKind::Iron) => assert!(row < 64 - 5),
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn test_params_validate() {
        assert!(TerrainParams::default().validate().is_ok());

        let mut params = TerrainParams::default();
        params.ore_gates[1].threshold = -0.1;
        assert!(matches!(params.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("gold")));

        let params = TerrainParams {
            trunk_min: 0,
            ..TerrainParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_sequential_gates() {
        let params = TerrainParams::default();
        assert_eq!(deep_block(&params, 0.005, 10, 64), BlockKind::Diamond);
        // Too deep for diamond but gold's gate still admits
        assert_eq!(deep_block(&params, 0.005, 56, 64), BlockKind::Gold);
        assert_eq!(deep_block(&params, 0.02, 10, 64), BlockKind::Gold);
        assert_eq!(deep_block(&params, 0.05, 10, 64), BlockKind::Iron);
        assert_eq!(deep_block(&params, 0.05, 59, 64), BlockKind::Stone);
        assert_eq!(deep_block(&params, 0.5, 10, 64), BlockKind::Stone);
    }

    #[test]
    fn test_tree_shape() {
        let mut grid = TileGrid::new(20, 9);
        let params = TerrainParams::default();
        grow_tree(&mut grid, &params, 15, 4, 3);

        // Trunk at rows 15, 14, 13
        for row in 13..=15 {
            assert_eq!(grid.get(row, 4).kind(), Some(BlockKind::Wood));
        }
        // Canopy rows 12..=8 with widths 1,3,5,3,1
        let widths: Vec<usize> = (8..=12)
            .rev()
            .map(|row| (0..9).filter(|&c| grid.get(row, c).kind() == Some(BlockKind::Leaves)).count())
            .collect();
        assert_eq!(widths, vec![1, 3, 5, 3, 1]);
        assert!(grid.get(7, 4).is_empty());
    }

    #[test]
    fn test_canopy_never_overwrites() {
        let mut grid = TileGrid::new(20, 9);
        grid.set(11, 3, Cell::block(BlockKind::Wood));
        grow_tree(&mut grid, &TerrainParams::default(), 15, 4, 3);
        assert_eq!(grid.get(11, 3).kind(), Some(BlockKind::Wood));
    }

    #[test]
    fn test_canopy_clamped_at_edge() {
        let mut grid = TileGrid::new(20, 3);
        grow_tree(&mut grid, &TerrainParams::default(), 15, 0, 3);
        // Widest layer (row 10) spans cols 0..=2 clipped to 0..=2
        assert_eq!(grid.get(10, 0).kind(), Some(BlockKind::Leaves));
        assert_eq!(grid.get(10, 2).kind(), Some(BlockKind::Leaves));
    }

    proptest! {
        #[test]
        fn prop_heightmap_is_smooth_and_bounded(seed in any::<u64>(), rows in 8usize..200, cols in 1usize..300) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let heights = generate_heightmap(rows, cols, &TerrainParams::default(), &mut rng);
            let (lo, hi) = height_bounds(rows);
            for h in &heights {
                prop_assert!(*h >= lo && *h <= hi);
            }
            for pair in heights.windows(2) {
                prop_assert!(pair[0].abs_diff(pair[1]) <= 2);
            }
        }

        #[test]
        fn prop_floor_always_unbreakable(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let terrain = generate_terrain(32, 48, &TerrainParams::default(), &mut rng);
            for col in 0..48 {
                prop_assert_eq!(terrain.grid.get(31, col).kind(), Some(BlockKind::Unbreakable));
            }
        }
    }
}
