//! Tile Miner entry point
//!
//! Headless driver: generates a world, replays a scripted session through the
//! same `InputIntent` channel a graphical frontend would use, and prints what
//! happened.
//!
//! Usage: `tile-miner [seed] [config.json]`

use tile_miner::SimConfig;
use tile_miner::sim::{BlockKind, BlockTable, GameEvent, InputIntent, MoveDirection, Simulation};
use tile_miner::world_to_tile;

/// Camera size used for the ASCII view (world units)
const VIEW_WIDTH: f32 = 1280.0;
const VIEW_HEIGHT: f32 = 720.0;

/// Give up on a block after this many mining ticks
const MAX_MINING_TICKS: u32 = 400;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>().unwrap_or_else(|_| {
            log::warn!("Seed {:?} is not a number, using clock seed", arg);
            clock_seed()
        }),
        None => clock_seed(),
    };
    let config = match args.next() {
        Some(path) => SimConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default config", e);
            SimConfig::default()
        }),
        None => SimConfig::default(),
    };

    log::info!("Tile Miner (headless) starting, seed {}", seed);
    let mut sim = match Simulation::from_config(config, BlockTable::standard(), seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::warn!("{}; using default config", e);
            Simulation::with_config(SimConfig::default(), BlockTable::standard(), seed)
        }
    };

    let mut counts = EventCounts::default();
    run_script(&mut sim, &mut counts);

    print_view(&sim);
    print_summary(&sim, &counts);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend in this crate
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Default)]
struct EventCounts {
    jumps: u32,
    landings: u32,
    blocks_broken: u32,
}

impl EventCounts {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::Landed => self.landings += 1,
                GameEvent::BlockBroken { .. } => self.blocks_broken += 1,
            }
        }
    }
}

fn run(sim: &mut Simulation, counts: &mut EventCounts, input: &InputIntent, ticks: u32) {
    for _ in 0..ticks {
        sim.step(input);
        counts.record(&sim.events);
    }
}

/// Settle, hop right, coast to a stop, then dig straight down a few blocks
fn run_script(sim: &mut Simulation, counts: &mut EventCounts) {
    run(sim, counts, &InputIntent::default(), 30);

    let hop_right = InputIntent {
        move_dir: MoveDirection::Right,
        jump: true,
        ..Default::default()
    };
    run(sim, counts, &hop_right, 40);
    run(sim, counts, &InputIntent::default(), 40);
    log::info!(
        "After walking: x={:.1} vx={:.4}",
        sim.player.pos.x,
        sim.player.vel.x
    );

    for _ in 0..3 {
        if !dig_below(sim, counts) {
            break;
        }
        // Drop into the hole
        run(sim, counts, &InputIntent::default(), 20);
    }
}

/// Mine the cell under the player's feet until it breaks.
/// Returns false if it could not be broken.
fn dig_below(sim: &mut Simulation, counts: &mut EventCounts) -> bool {
    let tile = sim.config.tile_size;
    let feet = sim.player.pos.y + sim.player.size.y;
    let row = world_to_tile(feet, tile);
    let col = world_to_tile(sim.player.center().x, tile);
    if row < 0 || col < 0 {
        return false;
    }
    let (row, col) = (row as usize, col as usize);
    if matches!(
        sim.cell(row, col).kind(),
        None | Some(BlockKind::Unbreakable)
    ) {
        log::info!("Nothing minable below the player at ({}, {})", row, col);
        return false;
    }

    let dig = InputIntent::mine_at(row, col);
    for _ in 0..MAX_MINING_TICKS {
        sim.step(&dig);
        counts.record(&sim.events);
        if sim
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BlockBroken { .. }))
        {
            return true;
        }
    }
    log::warn!("Gave up mining ({}, {})", row, col);
    false
}

fn glyph(kind: Option<BlockKind>) -> char {
    match kind {
        None => ' ',
        Some(BlockKind::Dirt) => '.',
        Some(BlockKind::Stone) => '#',
        Some(BlockKind::Iron) => 'i',
        Some(BlockKind::Gold) => 'g',
        Some(BlockKind::Diamond) => '*',
        Some(BlockKind::Unbreakable) => '=',
        Some(BlockKind::Wood) => '|',
        Some(BlockKind::Leaves) => '%',
    }
}

fn print_view(sim: &Simulation) {
    let view = sim.camera(VIEW_WIDTH, VIEW_HEIGHT);
    let tile = sim.config.tile_size;
    let (rows, cols) = view.tile_span(sim.rows(), sim.cols(), tile);

    let player_min = sim.player.pos;
    let player_max = sim.player.pos + sim.player.size - 1.0;
    let player_rows = world_to_tile(player_min.y, tile)..=world_to_tile(player_max.y, tile);
    let player_cols = world_to_tile(player_min.x, tile)..=world_to_tile(player_max.x, tile);

    for row in rows {
        let line: String = cols
            .clone()
            .map(|col| {
                if player_rows.contains(&(row as i64)) && player_cols.contains(&(col as i64)) {
                    '@'
                } else {
                    glyph(sim.cell(row, col).kind())
                }
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

fn print_summary(sim: &Simulation, counts: &EventCounts) {
    let snap = sim.player_snapshot();
    println!();
    println!("Seed:        {}", sim.seed);
    println!("Ticks:       {}", sim.time_ticks);
    println!(
        "Time of day: {:.1} ({})",
        sim.clock.time,
        if sim.clock.is_day() { "day" } else { "night" }
    );
    println!("Position:    ({:.1}, {:.1})", snap.pos.x, snap.pos.y);
    println!("Health:      {}/{}", snap.health, snap.max_health);
    println!(
        "Events:      {} jumps, {} landings, {} blocks broken",
        counts.jumps, counts.landings, counts.blocks_broken
    );
    if snap.inventory.is_empty() {
        println!("Inventory:   (empty)");
    } else {
        for (kind, count) in snap.inventory.iter() {
            println!("Inventory:   {}:{}", kind.name(), count);
        }
    }
}
