//! The world surface the fluid engine reads and writes through.

use steel_registry::sound_events::SoundEvent;
use steel_registry::{BlockState, FluidId, FluidRegistry};
use steel_utils::math::Vector3;
use steel_utils::{BlockPos, UpdateFlags};

use crate::fluid::FlowVectorCache;

/// Grid access, scheduling and broadcasting used by the fluid engine.
///
/// Implementations must be total: any position may be read, and positions
/// outside the world read as air.
pub trait LevelAccessor {
    /// Returns what occupies `pos`.
    fn get_cell(&self, pos: BlockPos) -> BlockState;

    /// Writes `state` at `pos`.
    ///
    /// With [`UpdateFlags::UPDATE_NEIGHBORS`] the written position and its six
    /// neighbours are notified synchronously, which may reenter the fluid
    /// engine. Returns false if the write was rejected.
    fn set_cell(&mut self, pos: BlockPos, state: BlockState, flags: UpdateFlags) -> bool;

    /// Requests a scheduled update for the liquid at `pos` after `delay` ticks.
    fn schedule_delayed_update(&mut self, pos: BlockPos, fluid: FluidId, delay: u32);

    /// Broadcasts a sound/reaction event to listeners near `position`.
    fn broadcast_reaction_event(&mut self, position: Vector3<f64>, event: SoundEvent, payload: i32);

    /// Breaks the non-liquid obstruction at `pos`, running its break effects.
    fn break_obstruction(&mut self, pos: BlockPos);

    /// Stable key for `pos`, used by transient per-call lookups.
    fn hash_coordinate(&self, pos: BlockPos) -> i64 {
        pos.as_long()
    }

    /// The liquid types known to this world.
    fn fluids(&self) -> &FluidRegistry;

    /// The world-owned flow vector cache.
    fn flow_vectors(&mut self) -> &mut FlowVectorCache;
}
