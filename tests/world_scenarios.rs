//! # World Scenarios
//!
//! End-to-end runs through the public API: seeded generation, spawn, walking,
//! friction, and mining against generated terrain.

use proptest::prelude::*;
use tile_miner::SimConfig;
use tile_miner::sim::{
    BlockKind, BlockTable, InputIntent, MoveDirection, Simulation, TerrainParams,
};

fn flat_config() -> SimConfig {
    SimConfig {
        terrain: TerrainParams {
            max_step: 0,
            tree_chance: 0.0,
            ..TerrainParams::default()
        },
        ..SimConfig::default()
    }
}

fn hop_right() -> InputIntent {
    InputIntent {
        move_dir: MoveDirection::Right,
        jump: true,
        ..Default::default()
    }
}

/// Spawn sits two rows above the topmost block of the middle column.
#[test]
fn test_spawn_matches_first_solid_row() {
    for seed in [0, 1, 42, 777, 123_456_789] {
        let sim = Simulation::new(seed);
        let col = sim.cols() / 2;
        let first = sim.grid.first_solid_row(col).expect("column has ground");
        assert_eq!(sim.player.pos.x, col as f32 * sim.config.tile_size);
        assert_eq!(
            sim.player.pos.y,
            (first as f32 - 2.0) * sim.config.tile_size,
            "seed {}",
            seed
        );
    }
}

/// On flat ground the player walks right, then coasts to a stop.
#[test]
fn test_walk_then_coast_on_flat_world() {
    let mut sim = Simulation::with_config(flat_config(), BlockTable::standard(), 2024);
    assert_eq!(sim.player.pos.y, 30.0 * 32.0);

    for _ in 0..30 {
        sim.step(&InputIntent::default());
    }
    assert!(sim.player.on_ground);
    let start_x = sim.player.pos.x;

    for _ in 0..60 {
        sim.step(&hop_right());
    }
    let walked_x = sim.player.pos.x;
    assert!(walked_x > start_x + 300.0, "walked from {} to {}", start_x, walked_x);

    let mut prev = walked_x;
    for _ in 0..150 {
        sim.step(&InputIntent::default());
        assert!(sim.player.pos.x >= prev);
        prev = sim.player.pos.x;
    }
    // Geometric tail of 6 * 0.8^n is bounded by 24
    assert!(sim.player.pos.x - walked_x <= 24.1);
    assert!(sim.player.vel.x.abs() < 1e-6);

    let settled = sim.player.pos.x;
    for _ in 0..10 {
        sim.step(&InputIntent::default());
    }
    assert!((sim.player.pos.x - settled).abs() < 1e-4);
}

/// On generated hills the player never moves left under rightward input and
/// always comes to rest once input stops.
#[test]
fn test_walk_on_generated_terrain() {
    let mut sim = Simulation::new(31337);
    let mut prev = sim.player.pos.x;
    for _ in 0..120 {
        sim.step(&hop_right());
        assert!(sim.player.pos.x >= prev);
        prev = sim.player.pos.x;
    }
    for _ in 0..200 {
        sim.step(&InputIntent::default());
        assert!(sim.player.pos.x >= prev);
        prev = sim.player.pos.x;
    }
    assert!(sim.player.vel.x.abs() < 1e-6);
    assert!(sim.player.vel.y <= sim.config.max_fall_speed);
}

/// Dig down from the spawn column until the floor stops us.
#[test]
fn test_dig_to_floor() {
    let mut sim = Simulation::with_config(flat_config(), BlockTable::standard(), 9);
    for _ in 0..30 {
        sim.step(&InputIntent::default());
    }

    let col = sim.cols() / 2;
    let mut broken = 0;
    for _ in 0..sim.rows() {
        let feet_row = ((sim.player.pos.y + sim.player.size.y) / 32.0).floor() as usize;
        let kind = sim.cell(feet_row, col).kind();
        if kind == Some(BlockKind::Unbreakable) {
            break;
        }
        for _ in 0..200 {
            sim.step(&InputIntent::mine_at(feet_row, col));
            if sim.cell(feet_row, col).is_empty() {
                break;
            }
        }
        assert!(sim.cell(feet_row, col).is_empty());
        broken += 1;
        for _ in 0..20 {
            sim.step(&InputIntent::default());
        }
    }

    // Surface row 32 down to row 62, all broken
    assert_eq!(broken, 31);
    assert_eq!(sim.player.inventory.total(), 31);
    assert_eq!(sim.player.inventory.count(BlockKind::Dirt), 5);
    assert_eq!(sim.cell(63, col).kind(), Some(BlockKind::Unbreakable));
    assert!(sim.player.on_ground);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever the player tries to mine, the floor holds.
    #[test]
    fn prop_floor_survives_any_mining(
        seed in any::<u64>(),
        targets in prop::collection::vec((0usize..20, 0usize..24), 1..12),
    ) {
        let config = SimConfig { rows: 16, cols: 24, ..SimConfig::default() };
        let mut sim = Simulation::with_config(config, BlockTable::standard(), seed);
        for (row, col) in targets {
            for _ in 0..60 {
                sim.step(&InputIntent::mine_at(row, col));
            }
        }
        for col in 0..24 {
            prop_assert_eq!(sim.cell(15, col).kind(), Some(BlockKind::Unbreakable));
        }
    }

    /// Same seed, same inputs, same world.
    #[test]
    fn prop_replay_is_deterministic(seed in any::<u64>()) {
        let config = SimConfig { rows: 24, cols: 32, ..SimConfig::default() };
        let mut a = Simulation::with_config(config.clone(), BlockTable::standard(), seed);
        let mut b = Simulation::with_config(config, BlockTable::standard(), seed);
        let script = [
            hop_right(),
            InputIntent::walk(MoveDirection::Left),
            InputIntent::mine_at(12, 16),
            InputIntent::default(),
        ];
        for i in 0..200 {
            let input = &script[i % script.len()];
            a.step(input);
            b.step(input);
        }
        prop_assert_eq!(&a.grid, &b.grid);
        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.player.inventory, b.player.inventory);
    }
}
