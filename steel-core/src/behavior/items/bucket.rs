//! Bucket item behavior implementations.

use steel_registry::{BlockState, FluidId, FluidState};
use steel_utils::{BlockPos, UpdateFlags};

use crate::behavior::{InteractionResult, ItemBehavior};
use crate::world::LevelAccessor;

/// Behavior for filled bucket items (water bucket, lava bucket, etc.)
///
/// Pours a source of its liquid at the target position.
pub struct FilledBucketBehavior {
    /// The liquid to place.
    fluid: FluidId,
}

impl FilledBucketBehavior {
    /// Creates a new filled bucket behavior.
    #[must_use]
    pub const fn new(fluid: FluidId) -> Self {
        Self { fluid }
    }

    /// The liquid this bucket holds.
    #[must_use]
    pub const fn fluid(&self) -> FluidId {
        self.fluid
    }
}

impl ItemBehavior for FilledBucketBehavior {
    fn use_on<W: LevelAccessor + ?Sized>(&self, world: &mut W, pos: BlockPos) -> InteractionResult {
        let Some(fluid) = world.fluids().get(self.fluid).copied() else {
            log::warn!("Bucket holds unregistered liquid {:?}", self.fluid);
            return InteractionResult::Fail;
        };

        let existing = world.get_cell(pos);

        if existing.fluid_id() == Some(fluid.id) && existing.is_fluid_source() {
            return InteractionResult::Pass;
        }

        // Flowing liquid is replaced, sources of other liquids are not.
        if !existing.can_be_flowed_into() || existing.is_fluid_source() {
            return InteractionResult::Fail;
        }

        if !existing.is_air() && existing.fluid_state().is_none() {
            world.break_obstruction(pos);
        }

        let source = BlockState::Fluid(FluidState::source(fluid.id));
        if !world.set_cell(pos, source, UpdateFlags::UPDATE_ALL) {
            return InteractionResult::Fail;
        }

        world.broadcast_reaction_event(pos.center(), fluid.bucket_empty_sound, 0);
        InteractionResult::Success
    }
}

/// Behavior for empty bucket items.
///
/// Scoops up the liquid source at the target position.
pub struct EmptyBucketBehavior;

impl EmptyBucketBehavior {
    /// Creates a new empty bucket behavior.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Removes the source at `pos` and returns its liquid.
    ///
    /// Flowing cells cannot be scooped up.
    pub fn pick_up<W: LevelAccessor + ?Sized>(&self, world: &mut W, pos: BlockPos) -> Option<FluidId> {
        let cell = world.get_cell(pos).fluid_state()?;
        if !cell.is_source() {
            return None;
        }
        let fluid = world.fluids().get(cell.fluid).copied()?;

        if !world.set_cell(pos, BlockState::AIR, UpdateFlags::UPDATE_ALL) {
            return None;
        }

        log::debug!("Bucket scooped {} at {pos}", fluid.key);
        world.broadcast_reaction_event(pos.center(), fluid.bucket_fill_sound, 0);
        Some(fluid.id)
    }
}

impl Default for EmptyBucketBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemBehavior for EmptyBucketBehavior {
    fn use_on<W: LevelAccessor + ?Sized>(&self, world: &mut W, pos: BlockPos) -> InteractionResult {
        if self.pick_up(world, pos).is_some() {
            InteractionResult::Success
        } else {
            InteractionResult::Fail
        }
    }
}
