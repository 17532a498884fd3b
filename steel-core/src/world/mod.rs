//! This module contains the `World` struct, an in-memory voxel grid that drives
//! the fluid engine.
use rustc_hash::{FxHashMap, FxHashSet};
use steel_registry::sound_events::SoundEvent;
use steel_registry::{BlockRef, BlockState, FluidId, FluidRegistry, FluidState};
use steel_utils::math::Vector3;
use steel_utils::{BlockPos, Direction, UpdateFlags};

use crate::config::WorldSettings;
use crate::fluid::{self, FlowVectorCache};

mod level_accessor;
mod tick_scheduler;

pub use level_accessor::LevelAccessor;
pub use tick_scheduler::{ScheduledTick, TickScheduler};

/// A reaction or sound event broadcast by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionEvent {
    /// Where the event happened.
    pub position: Vector3<f64>,
    /// What happened.
    pub event: SoundEvent,
    /// Event specific data (pitch for reactions).
    pub payload: i32,
}

/// A struct that represents a world.
///
/// Cells not present in the map are air. The world is vertically bounded;
/// reads outside the bounds return air and writes outside them are rejected.
pub struct World {
    cells: FxHashMap<BlockPos, BlockState>,
    min_y: i32,
    height: i32,
    max_updates_per_tick: usize,
    fluids: FluidRegistry,
    scheduler: TickScheduler,
    flow_vectors: FlowVectorCache,
    game_time: u64,
    events: Vec<ReactionEvent>,
    broken: Vec<(BlockPos, BlockRef)>,
    pending_light: FxHashSet<BlockPos>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new(settings: &WorldSettings, fluids: FluidRegistry) -> Self {
        Self {
            cells: FxHashMap::default(),
            min_y: settings.min_y,
            height: i32::try_from(settings.height).unwrap_or(i32::MAX),
            max_updates_per_tick: settings.max_updates_per_tick,
            fluids,
            scheduler: TickScheduler::new(),
            flow_vectors: FlowVectorCache::new(),
            game_time: 0,
            events: Vec::new(),
            broken: Vec::new(),
            pending_light: FxHashSet::default(),
        }
    }

    /// Returns true if `pos` lies inside the vertical bounds of the world.
    #[must_use]
    pub fn is_in_valid_bounds(&self, pos: BlockPos) -> bool {
        pos.y() >= self.min_y && pos.y() < self.min_y.saturating_add(self.height)
    }

    /// The current game tick.
    #[must_use]
    pub const fn game_time(&self) -> u64 {
        self.game_time
    }

    /// Runs every due fluid update, then advances the clock by one tick.
    ///
    /// An update whose position no longer holds the liquid it was scheduled
    /// for is dropped.
    pub fn tick(&mut self) {
        let _span = tracing::debug_span!("world_tick", game_time = self.game_time).entered();

        let due = self
            .scheduler
            .get_due_ticks(self.game_time, self.max_updates_per_tick);

        for tick in due {
            if self.get_cell(tick.pos).fluid_id() == Some(tick.fluid) {
                fluid::tick(self, tick.pos);
            } else {
                log::trace!("Dropping stale {:?} update at {}", tick.fluid, tick.pos);
            }
        }

        self.game_time += 1;
    }

    /// Runs `count` world ticks.
    pub fn run_ticks(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Places a block, notifying neighbours.
    pub fn set_block(&mut self, pos: BlockPos, block: BlockRef) -> bool {
        self.set_cell(pos, BlockState::Block(block), UpdateFlags::UPDATE_ALL)
    }

    /// Places a liquid source, notifying neighbours (which schedules its first update).
    pub fn place_fluid_source(&mut self, pos: BlockPos, fluid: FluidId) -> bool {
        if self.fluids.get(fluid).is_none() {
            log::warn!("Refusing to place unregistered fluid {fluid:?} at {pos}");
            return false;
        }
        self.set_cell(
            pos,
            BlockState::Fluid(FluidState::source(fluid)),
            UpdateFlags::UPDATE_ALL,
        )
    }

    /// Fills the box between two corners (inclusive) without notifying anyone.
    ///
    /// Meant for building terrain before the simulation runs.
    pub fn fill(&mut self, from: BlockPos, to: BlockPos, block: BlockRef) {
        for x in from.x().min(to.x())..=from.x().max(to.x()) {
            for y in from.y().min(to.y())..=from.y().max(to.y()) {
                for z in from.z().min(to.z())..=from.z().max(to.z()) {
                    self.set_cell(
                        BlockPos::new(x, y, z),
                        BlockState::Block(block),
                        UpdateFlags::empty(),
                    );
                }
            }
        }
    }

    /// Returns the liquid cell at `pos`, if any.
    #[must_use]
    pub fn fluid_state(&self, pos: BlockPos) -> Option<FluidState> {
        self.get_cell(pos).fluid_state()
    }

    /// Counts the cells holding `fluid`.
    #[must_use]
    pub fn count_fluid(&self, fluid: FluidId) -> usize {
        self.cells
            .values()
            .filter(|state| state.fluid_id() == Some(fluid))
            .count()
    }

    /// Counts the cells holding `block`.
    #[must_use]
    pub fn count_block(&self, block: BlockRef) -> usize {
        self.cells
            .values()
            .filter(|state| **state == BlockState::Block(block))
            .count()
    }

    /// Events broadcast so far.
    #[must_use]
    pub fn reaction_events(&self) -> &[ReactionEvent] {
        &self.events
    }

    /// Obstructions broken by liquids so far, in order.
    #[must_use]
    pub fn broken_obstructions(&self) -> &[(BlockPos, BlockRef)] {
        &self.broken
    }

    /// Drains the positions queued for a light recalculation.
    pub fn take_light_updates(&mut self) -> Vec<BlockPos> {
        self.pending_light.drain().collect()
    }

    /// Number of pending fluid updates.
    #[must_use]
    pub fn pending_updates(&self) -> usize {
        self.scheduler.len()
    }

    /// Checks if an update is pending for `fluid` at `pos`.
    #[must_use]
    pub fn has_scheduled_update(&self, pos: BlockPos, fluid: FluidId) -> bool {
        self.scheduler.is_scheduled(pos, fluid)
    }

    fn update_neighbors_at(&mut self, pos: BlockPos) {
        self.neighbor_changed(pos);
        for direction in Direction::ALL {
            self.neighbor_changed(direction.relative(pos));
        }
    }

    fn neighbor_changed(&mut self, pos: BlockPos) {
        if self.get_cell(pos).fluid_state().is_some() {
            fluid::on_neighbor_changed(self, pos);
        }
    }
}

impl LevelAccessor for World {
    fn get_cell(&self, pos: BlockPos) -> BlockState {
        self.cells.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    fn set_cell(&mut self, pos: BlockPos, state: BlockState, flags: UpdateFlags) -> bool {
        if !self.is_in_valid_bounds(pos) {
            log::trace!("Rejected write outside the world at {pos}");
            return false;
        }

        if state.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, state);
        }
        self.flow_vectors.invalidate_around(pos);

        if flags.contains(UpdateFlags::UPDATE_LIGHT) {
            self.pending_light.insert(pos);
        }
        if flags.contains(UpdateFlags::UPDATE_NEIGHBORS) {
            self.update_neighbors_at(pos);
        }
        true
    }

    fn schedule_delayed_update(&mut self, pos: BlockPos, fluid: FluidId, delay: u32) {
        self.scheduler.schedule(pos, fluid, self.game_time, delay);
    }

    fn broadcast_reaction_event(&mut self, position: Vector3<f64>, event: SoundEvent, payload: i32) {
        log::debug!(
            "Event {} at ({:.1}, {:.1}, {:.1}) payload={payload}",
            event.key,
            position.x,
            position.y,
            position.z
        );
        self.events.push(ReactionEvent {
            position,
            event,
            payload,
        });
    }

    fn break_obstruction(&mut self, pos: BlockPos) {
        if let BlockState::Block(block) = self.get_cell(pos)
            && !block.config.is_air
        {
            log::debug!("Liquid broke {} at {pos}", block.key);
            self.broken.push((pos, block));
            self.set_cell(pos, BlockState::AIR, UpdateFlags::empty());
        }
    }

    fn fluids(&self) -> &FluidRegistry {
        &self.fluids
    }

    fn flow_vectors(&mut self) -> &mut FlowVectorCache {
        &mut self.flow_vectors
    }
}

#[cfg(test)]
mod tests {
    use steel_registry::vanilla_blocks;

    use super::*;

    fn world() -> World {
        World::new(&WorldSettings::default(), FluidRegistry::vanilla())
    }

    #[test]
    fn test_out_of_bounds_reads_air_and_rejects_writes() {
        let mut world = world();
        let below = BlockPos::new(0, WorldSettings::default().min_y - 1, 0);
        assert_eq!(world.get_cell(below), BlockState::AIR);
        assert!(!world.set_block(below, vanilla_blocks::STONE));
        assert_eq!(world.get_cell(below), BlockState::AIR);
    }

    #[test]
    fn test_place_source_schedules_update() {
        let mut world = world();
        let pos = BlockPos::new(0, 64, 0);
        assert!(world.place_fluid_source(pos, FluidId::WATER));
        assert!(world.has_scheduled_update(pos, FluidId::WATER));
        assert_eq!(world.fluid_state(pos), Some(FluidState::source(FluidId::WATER)));
        assert!(world.take_light_updates().contains(&pos));
        assert!(world.take_light_updates().is_empty());
    }

    #[test]
    fn test_stale_update_is_dropped() {
        let mut world = world();
        let pos = BlockPos::new(0, 64, 0);
        world.place_fluid_source(pos, FluidId::WATER);
        // Replace the water before its update fires.
        world.set_cell(pos, BlockState::Block(vanilla_blocks::STONE), UpdateFlags::empty());

        world.run_ticks(10);
        assert_eq!(world.count_fluid(FluidId::WATER), 0);
        assert_eq!(world.get_cell(pos), BlockState::Block(vanilla_blocks::STONE));
        assert_eq!(world.pending_updates(), 0);
    }

    #[test]
    fn test_break_obstruction_records_block() {
        let mut world = world();
        let pos = BlockPos::new(3, 64, 3);
        world.fill(pos, pos, vanilla_blocks::SHORT_GRASS);
        world.break_obstruction(pos);
        assert_eq!(world.broken_obstructions(), &[(pos, vanilla_blocks::SHORT_GRASS)]);
        assert!(world.get_cell(pos).is_air());

        // Air is not an obstruction.
        world.break_obstruction(pos);
        assert_eq!(world.broken_obstructions().len(), 1);
    }

    #[test]
    fn test_unregistered_fluid_rejected() {
        let mut world = world();
        assert!(!world.place_fluid_source(BlockPos::new(0, 64, 0), FluidId(99)));
    }
}
