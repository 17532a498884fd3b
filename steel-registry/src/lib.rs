//! Static game data for the fluid simulation: blocks, liquid types and their
//! tuning, the per-cell liquid state and sound identifiers.

pub mod block_state;
pub mod blocks;
pub mod fluid;
pub mod sound_events;

pub use block_state::BlockState;
pub use blocks::{Block, BlockConfig, BlockRef, vanilla_blocks};
pub use fluid::{FluidId, FluidKind, FluidRegistry, FluidState, FluidType, RegistryError};
