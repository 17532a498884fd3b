//! Liquid types, their tuning values and the per-cell liquid state.

mod fluid;
mod fluid_state;
mod registry;
pub mod vanilla;

pub use fluid::*;
pub use fluid_state::FluidState;
pub use registry::{FluidRegistry, RegistryError};
