//! Delayed fluid update scheduler.
//!
//! Keeps at most one pending update per (position, fluid) pair. Whether an
//! update is still meaningful when it fires is decided by the world.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use steel_registry::FluidId;
use steel_utils::BlockPos;

/// A pending fluid update.
#[derive(Debug, Clone)]
pub struct ScheduledTick {
    /// The position to update.
    pub pos: BlockPos,
    /// The liquid expected at `pos` when the update fires.
    pub fluid: FluidId,
    /// The game tick when this should trigger.
    pub trigger_tick: u64,
    /// Insertion order, used as a FIFO tie-break.
    sequence: u64,
}

impl PartialEq for ScheduledTick {
    fn eq(&self, other: &Self) -> bool {
        self.trigger_tick == other.trigger_tick && self.sequence == other.sequence
    }
}

impl Eq for ScheduledTick {}

impl Ord for ScheduledTick {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: earlier trigger and earlier sequence win.
        other
            .trigger_tick
            .cmp(&self.trigger_tick)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for ScheduledTick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The tick scheduler manages pending fluid updates.
///
/// Uses a priority queue (binary heap) for retrieval of due updates and a
/// hash set to prevent duplicate scheduling.
#[derive(Default)]
pub struct TickScheduler {
    pending: BinaryHeap<ScheduledTick>,
    scheduled: FxHashSet<(BlockPos, FluidId)>,
    next_sequence: u64,
}

impl TickScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules an update `delay` ticks after `current_tick`.
    ///
    /// Returns false (and keeps the existing timing) if an update for this
    /// position and fluid is already pending.
    pub fn schedule(&mut self, pos: BlockPos, fluid: FluidId, current_tick: u64, delay: u32) -> bool {
        if !self.scheduled.insert((pos, fluid)) {
            return false;
        }

        let trigger_tick = current_tick + u64::from(delay);
        self.pending.push(ScheduledTick {
            pos,
            fluid,
            trigger_tick,
            sequence: self.next_sequence,
        });
        self.next_sequence = self.next_sequence.wrapping_add(1);

        log::trace!("Scheduled {fluid:?} update at {pos} for tick {trigger_tick} (delay={delay})");
        true
    }

    /// Removes and returns up to `limit` updates due at or before `current_tick`,
    /// earliest first.
    pub fn get_due_ticks(&mut self, current_tick: u64, limit: usize) -> Vec<ScheduledTick> {
        let mut due = Vec::new();

        while due.len() < limit
            && self
                .pending
                .peek()
                .is_some_and(|tick| tick.trigger_tick <= current_tick)
        {
            let Some(tick) = self.pending.pop() else {
                break;
            };
            self.scheduled.remove(&(tick.pos, tick.fluid));
            due.push(tick);
        }

        due
    }

    /// Returns the number of pending updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Checks if an update is already pending for this position and fluid.
    #[must_use]
    pub fn is_scheduled(&self, pos: BlockPos, fluid: FluidId) -> bool {
        self.scheduled.contains(&(pos, fluid))
    }
}
