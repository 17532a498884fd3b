//! Water-specific helpers.
//!
//! Water never hardens. Its source formation is driven by the
//! `source_conversion` flag of its tuning, not by code here.

use steel_registry::{BlockState, FluidKind};

use crate::world::LevelAccessor;

/// Checks if `state` holds a liquid of the water category.
#[must_use]
pub fn is_water<W: LevelAccessor + ?Sized>(world: &W, state: BlockState) -> bool {
    state
        .fluid_id()
        .and_then(|id| world.fluids().get(id))
        .is_some_and(|fluid| fluid.kind == FluidKind::Water)
}
