//! # Steel
//!
//! Runs the liquid simulation over a small scene and reports what happened.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use steel_core::behavior::EmptyBucketBehavior;
use steel_core::config::SimulationConfig;
use steel_core::fluid::get_flow_vector;
use steel_core::world::{LevelAccessor, World};
use steel_registry::{FluidId, vanilla_blocks};

mod logger;
mod scene;

const CONFIG_PATH: &str = "config/steel_fluid.json5";

fn main() -> anyhow::Result<()> {
    let config = SimulationConfig::load_or_create(Path::new(CONFIG_PATH))
        .with_context(|| format!("failed to load {CONFIG_PATH}"))?;
    logger::init(&config.log_level)?;

    let registry = config.build_registry()?;
    for fluid in registry.iter() {
        log::info!(
            "{}: tick rate {}, decay per block {}, reach {:.2}",
            fluid.key,
            fluid.tick_rate,
            fluid.flow_decay_per_block,
            fluid.max_reach()
        );
    }

    let mut world = World::new(&config.world, registry);
    scene::build(&mut world)?;

    let start = Instant::now();
    world.run_ticks(config.simulation_ticks);
    log::info!(
        "Simulated {} ticks in {:?}, {} updates pending",
        world.game_time(),
        start.elapsed(),
        world.pending_updates()
    );

    log::info!(
        "Water cells: {}, lava cells: {}",
        world.count_fluid(FluidId::WATER),
        world.count_fluid(FluidId::LAVA)
    );
    log::info!(
        "Obsidian: {}, cobblestone: {}, stone: {}",
        world.count_block(vanilla_blocks::OBSIDIAN),
        world.count_block(vanilla_blocks::COBBLESTONE),
        world.count_block(vanilla_blocks::STONE)
    );
    log::info!(
        "{} reaction events, {} obstructions washed away",
        world.reaction_events().len(),
        world.broken_obstructions().len()
    );

    let probe = scene::WATER_SOURCE.offset(1, 0, 0);
    let current = get_flow_vector(&mut world, probe);
    log::info!(
        "Current at {probe}: ({:.3}, {:.3}, {:.3}), {} flow vectors cached",
        current.x,
        current.y,
        current.z,
        world.flow_vectors().len()
    );

    match EmptyBucketBehavior::new().pick_up(&mut world, scene::WATER_SOURCE) {
        Some(fluid) => log::info!("Scooped {fluid:?} back up at {}", scene::WATER_SOURCE),
        None => log::info!("Nothing left to scoop at {}", scene::WATER_SOURCE),
    }

    Ok(())
}
