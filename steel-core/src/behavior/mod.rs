//! Item behaviors that interact with liquids.

mod items;

pub use items::{EmptyBucketBehavior, FilledBucketBehavior};

use steel_utils::BlockPos;

use crate::world::LevelAccessor;

/// Outcome of using an item on a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResult {
    /// The item did something.
    Success,
    /// The item could not be used here.
    Fail,
    /// Nothing to do; the use falls through.
    Pass,
}

/// Behavior of an item used on a world position.
pub trait ItemBehavior {
    /// Uses the item on `pos`.
    fn use_on<W: LevelAccessor + ?Sized>(&self, world: &mut W, pos: BlockPos) -> InteractionResult;
}
