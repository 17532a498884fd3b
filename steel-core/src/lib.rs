//! # Steel Core
//!
//! The liquid simulation of the Steel server: the fluid engine, the world
//! surface it runs against, the scheduler that drives it and its configuration.
//!
//! ```no_run
//! use steel_core::config::SimulationConfig;
//! use steel_core::world::World;
//! use steel_registry::FluidId;
//! use steel_utils::BlockPos;
//!
//! let config = SimulationConfig::default();
//! let registry = config.build_registry().expect("vanilla liquids register");
//! let mut world = World::new(&config.world, registry);
//! world.place_fluid_source(BlockPos::new(0, 64, 0), FluidId::WATER);
//! world.run_ticks(100);
//! ```

pub mod behavior;
pub mod config;
pub mod fluid;
pub mod world;
