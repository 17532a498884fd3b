//! Core fluid flowing behavior.
//!
//! A single engine drives every liquid type. The per-type tuning comes from the
//! [`FluidType`] registered in the world, and the type-specific hooks
//! (hardening, reactions when spreading) are picked by its [`FluidKind`].

use steel_registry::sound_events;
use steel_registry::{BlockState, FluidId, FluidKind, FluidState, FluidType};
use steel_utils::{BlockPos, Direction, UpdateFlags};

use super::lava;
use super::spread_context::get_optimal_flow_directions;
use crate::world::LevelAccessor;

/// Decay at which a liquid can no longer exist.
pub const DECAY_LIMIT: u8 = 8;

/// Returns the decay of `state` as seen by liquid `fluid`.
///
/// `-1` if `state` is not a cell of that liquid; falling cells count as 0.
#[must_use]
pub fn effective_flow_decay(state: BlockState, fluid: FluidId) -> i8 {
    match state.fluid_state() {
        Some(cell) if cell.fluid == fluid => cell.effective_decay() as i8,
        _ => -1,
    }
}

/// Returns true if a liquid may spread into `state`.
///
/// Liquid sources of any type are never flowed into.
#[must_use]
pub fn can_flow_into(state: BlockState) -> bool {
    state.can_be_flowed_into() && !state.is_fluid_source()
}

/// Gets the liquid cell at `pos` together with its registered type.
#[must_use]
pub fn fluid_at<W: LevelAccessor + ?Sized>(world: &W, pos: BlockPos) -> Option<(FluidState, FluidType)> {
    let cell = world.get_cell(pos).fluid_state()?;
    let Some(fluid) = world.fluids().get(cell.fluid).copied() else {
        log::warn!("Liquid cell at {pos} has unregistered type {:?}", cell.fluid);
        return None;
    };
    Some((cell, fluid))
}

/// Neighbour readings for one decay recomputation.
///
/// Taken in full before the update writes anything, so cells changed by the
/// notifications of this update never feed back into it.
#[derive(Debug, Clone, Copy)]
struct NeighbourSnapshot {
    /// Smallest effective decay among same-type horizontal neighbours.
    smallest_decay: Option<u8>,
    /// Same-type sources among the horizontal neighbours.
    adjacent_sources: u8,
    /// The cell above holds the same liquid.
    fed_from_above: bool,
    below: BlockState,
}

impl NeighbourSnapshot {
    fn read<W: LevelAccessor + ?Sized>(world: &W, pos: BlockPos, fluid: FluidId) -> Self {
        let mut smallest_decay: Option<u8> = None;
        let mut adjacent_sources = 0;

        for direction in Direction::HORIZONTAL {
            let Some(side) = world.get_cell(direction.relative(pos)).fluid_state() else {
                continue;
            };
            if side.fluid != fluid {
                continue;
            }
            if side.is_source() {
                adjacent_sources += 1;
            }
            let decay = side.effective_decay();
            smallest_decay = Some(smallest_decay.map_or(decay, |smallest| smallest.min(decay)));
        }

        Self {
            smallest_decay,
            adjacent_sources,
            fed_from_above: effective_flow_decay(world.get_cell(pos.above()), fluid) >= 0,
            below: world.get_cell(pos.below()),
        }
    }

    /// Returns the decay and falling flag the cell should have.
    ///
    /// A negative decay means no neighbour can sustain the cell.
    fn recompute(&self, fluid: &FluidType) -> (i8, bool) {
        let mut new_decay = match self.smallest_decay {
            Some(smallest) => {
                let decay = smallest.saturating_add(fluid.flow_decay_per_block);
                if decay >= DECAY_LIMIT { -1 } else { decay as i8 }
            }
            None => -1,
        };
        let mut falling = self.fed_from_above;

        if fluid.source_conversion
            && self.adjacent_sources >= 2
            && (self.below.is_solid()
                || self
                    .below
                    .fluid_state()
                    .is_some_and(|below| below.fluid == fluid.id && below.is_source()))
        {
            new_decay = 0;
            falling = false;
        }

        (new_decay, falling)
    }
}

fn holds<W: LevelAccessor + ?Sized>(world: &W, pos: BlockPos, cell: FluidState) -> bool {
    world.get_cell(pos) == BlockState::Fluid(cell)
}

/// Runs one scheduled update of the liquid cell at `pos`.
///
/// Recomputes the decay of a non-source cell (removing it if nothing sustains
/// it), lets the liquid fall, spreads it sideways when it cannot fall, and
/// finally checks whether it hardens. Writes notify neighbours, which
/// reschedules whatever they touch.
pub fn tick<W: LevelAccessor + ?Sized>(world: &mut W, pos: BlockPos) {
    let Some((mut cell, fluid)) = fluid_at(world, pos) else {
        return;
    };

    if !cell.is_source() {
        let snapshot = NeighbourSnapshot::read(world, pos, fluid.id);
        let (new_decay, falling) = snapshot.recompute(&fluid);

        if !falling && new_decay < 0 {
            log::debug!("{} at {pos} is no longer sustained", fluid.key);
            world.set_cell(pos, BlockState::AIR, UpdateFlags::UPDATE_ALL);
            return;
        }

        let updated = FluidState::new(fluid.id, u8::try_from(new_decay).unwrap_or(0), falling);
        if updated != cell {
            log::trace!(
                "{} at {pos}: decay {} -> {}, falling {} -> {}",
                fluid.key,
                cell.decay,
                updated.decay,
                cell.falling,
                updated.falling
            );
            world.set_cell(pos, BlockState::Fluid(updated), UpdateFlags::UPDATE_ALL);
            if !holds(world, pos, updated) {
                return;
            }
            cell = updated;
        }
    }

    let below = pos.below();
    let below_state = world.get_cell(below);
    flow_into_block(world, below, &fluid, 0, true);
    if !holds(world, pos, cell) {
        return;
    }

    if cell.is_source() || !below_state.can_be_flowed_into() {
        let spread_decay = if cell.falling {
            1
        } else {
            cell.decay.saturating_add(fluid.flow_decay_per_block)
        };

        if spread_decay < DECAY_LIMIT {
            let optimal = get_optimal_flow_directions(world, pos, &fluid);
            for direction in Direction::HORIZONTAL {
                if optimal[direction.ordinal()] {
                    flow_into_block(world, direction.relative(pos), &fluid, spread_decay, false);
                    if !holds(world, pos, cell) {
                        return;
                    }
                }
            }
        }
    }

    check_for_harden(world, pos, &fluid);
}

/// Spreads `fluid` into `target` with the given state.
///
/// Nothing happens unless the target can be flowed into and holds no liquid,
/// so sources are never overwritten. A non-air obstruction is broken first.
/// Lava reaching water turns the water into stone instead.
///
/// Returns true if the world was changed.
pub fn flow_into_block<W: LevelAccessor + ?Sized>(
    world: &mut W,
    target: BlockPos,
    fluid: &FluidType,
    decay: u8,
    falling: bool,
) -> bool {
    let state = world.get_cell(target);
    let cell = FluidState::new(fluid.id, decay, falling);

    if fluid.kind == FluidKind::Lava && lava::flow_into_water(world, target, state, cell) {
        return true;
    }

    if !can_flow_into(state) || state.fluid_state().is_some() {
        return false;
    }

    if !state.is_air() {
        world.break_obstruction(target);
    }

    log::trace!(
        "{} flows into {target} (decay {}, falling {})",
        fluid.key,
        cell.decay,
        cell.falling
    );
    world.set_cell(target, BlockState::Fluid(cell), UpdateFlags::UPDATE_ALL)
}

/// Replaces the cell at `pos` with `result` and broadcasts the fizz.
///
/// `cause` is the liquid responsible for the reaction.
pub fn liquid_collide<W: LevelAccessor + ?Sized>(
    world: &mut W,
    pos: BlockPos,
    cause: BlockState,
    result: BlockState,
) -> bool {
    log::debug!("Liquid reaction at {pos}: {cause} produced {result}");
    world.set_cell(pos, result, UpdateFlags::UPDATE_ALL);

    let pitch = (2.6 + (rand::random::<f64>() - rand::random::<f64>()) * 0.8) * 1000.0;
    world.broadcast_reaction_event(pos.center(), sound_events::FIZZ, pitch as i32);
    true
}

/// Called when a neighbour of the liquid cell at `pos` (or the cell itself) changed.
///
/// Hardens the cell if it should, otherwise schedules its next update.
pub fn on_neighbor_changed<W: LevelAccessor + ?Sized>(world: &mut W, pos: BlockPos) {
    let Some((_, fluid)) = fluid_at(world, pos) else {
        return;
    };

    if check_for_harden(world, pos, &fluid) {
        return;
    }

    world.schedule_delayed_update(pos, fluid.id, fluid.tick_rate);
}

/// Runs the hardening hook of the liquid at `pos`. Returns true if it hardened.
fn check_for_harden<W: LevelAccessor + ?Sized>(world: &mut W, pos: BlockPos, fluid: &FluidType) -> bool {
    match fluid.kind {
        FluidKind::Water => false,
        FluidKind::Lava => lava::check_for_harden(world, pos),
    }
}

#[cfg(test)]
mod tests {
    use steel_registry::fluid::vanilla;
    use steel_registry::{FluidRegistry, vanilla_blocks};

    use super::*;
    use crate::config::WorldSettings;
    use crate::world::World;

    fn floored_world() -> World {
        let mut world = World::new(&WorldSettings::default(), FluidRegistry::vanilla());
        world.fill(
            BlockPos::new(-8, 63, -8),
            BlockPos::new(8, 63, 8),
            vanilla_blocks::STONE,
        );
        world
    }

    fn place(world: &mut World, pos: BlockPos, cell: FluidState) {
        world.set_cell(pos, BlockState::Fluid(cell), UpdateFlags::empty());
    }

    #[test]
    fn test_effective_flow_decay() {
        let water = BlockState::Fluid(FluidState::new(FluidId::WATER, 5, false));
        let falling = BlockState::Fluid(FluidState::decode(FluidId::WATER, 0b1101));
        assert_eq!(effective_flow_decay(water, FluidId::WATER), 5);
        assert_eq!(effective_flow_decay(falling, FluidId::WATER), 0);
        assert_eq!(effective_flow_decay(water, FluidId::LAVA), -1);
        assert_eq!(effective_flow_decay(BlockState::AIR, FluidId::WATER), -1);
    }

    #[test]
    fn test_can_flow_into() {
        assert!(can_flow_into(BlockState::AIR));
        assert!(can_flow_into(BlockState::Block(vanilla_blocks::SHORT_GRASS)));
        assert!(can_flow_into(BlockState::Fluid(FluidState::new(FluidId::LAVA, 2, false))));
        assert!(!can_flow_into(BlockState::Fluid(FluidState::source(FluidId::LAVA))));
        assert!(!can_flow_into(BlockState::Block(vanilla_blocks::STONE)));
    }

    #[test]
    fn test_unsustained_cell_is_removed() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        place(&mut world, pos, FluidState::new(FluidId::WATER, 3, false));

        tick(&mut world, pos);
        assert!(world.get_cell(pos).is_air());
    }

    #[test]
    fn test_decay_follows_smallest_neighbour() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        place(&mut world, pos, FluidState::new(FluidId::WATER, 6, false));
        place(&mut world, BlockPos::new(1, 64, 0), FluidState::new(FluidId::WATER, 2, false));
        place(&mut world, BlockPos::new(-1, 64, 0), FluidState::new(FluidId::WATER, 4, false));
        // A different liquid never sustains water.
        place(&mut world, BlockPos::new(0, 64, 1), FluidState::source(FluidId::LAVA));

        tick(&mut world, pos);
        let cell = world.fluid_state(pos);
        assert!(cell.is_some_and(|cell| cell.decay == 3 && !cell.falling));
    }

    #[test]
    fn test_two_sources_form_a_new_source() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        place(&mut world, BlockPos::new(-1, 64, 0), FluidState::source(FluidId::WATER));
        place(&mut world, BlockPos::new(1, 64, 0), FluidState::source(FluidId::WATER));
        place(&mut world, pos, FluidState::new(FluidId::WATER, 1, false));

        tick(&mut world, pos);
        assert_eq!(world.fluid_state(pos), Some(FluidState::source(FluidId::WATER)));
    }

    #[test]
    fn test_lava_never_forms_sources() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        place(&mut world, BlockPos::new(-1, 64, 0), FluidState::source(FluidId::LAVA));
        place(&mut world, BlockPos::new(1, 64, 0), FluidState::source(FluidId::LAVA));
        place(&mut world, pos, FluidState::new(FluidId::LAVA, 2, false));

        tick(&mut world, pos);
        assert_eq!(world.fluid_state(pos), Some(FluidState::new(FluidId::LAVA, 2, false)));
    }

    #[test]
    fn test_source_conversion_needs_support() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        // Hole below the middle cell.
        world.fill(pos.below(), pos.below(), vanilla_blocks::AIR);
        place(&mut world, BlockPos::new(-1, 64, 0), FluidState::source(FluidId::WATER));
        place(&mut world, BlockPos::new(1, 64, 0), FluidState::source(FluidId::WATER));
        place(&mut world, pos, FluidState::new(FluidId::WATER, 1, false));

        tick(&mut world, pos);
        assert_eq!(world.fluid_state(pos), Some(FluidState::new(FluidId::WATER, 1, false)));
        assert_eq!(
            world.fluid_state(pos.below()),
            Some(FluidState::new(FluidId::WATER, 0, true))
        );
    }

    #[test]
    fn test_flow_into_source_is_refused() {
        let mut world = floored_world();
        let target = BlockPos::new(2, 64, 2);
        place(&mut world, target, FluidState::source(FluidId::WATER));

        assert!(!flow_into_block(&mut world, target, &vanilla::WATER, 3, false));
        assert_eq!(world.fluid_state(target), Some(FluidState::source(FluidId::WATER)));

        assert!(!flow_into_block(&mut world, target, &vanilla::WATER, 0, true));
        assert_eq!(world.fluid_state(target), Some(FluidState::source(FluidId::WATER)));
    }

    #[test]
    fn test_flow_into_block_breaks_obstruction() {
        let mut world = floored_world();
        let target = BlockPos::new(2, 64, 2);
        world.fill(target, target, vanilla_blocks::SHORT_GRASS);

        assert!(flow_into_block(&mut world, target, &vanilla::WATER, 4, false));
        assert_eq!(
            world.fluid_state(target),
            Some(FluidState::new(FluidId::WATER, 4, false))
        );
        assert_eq!(world.broken_obstructions(), &[(target, vanilla_blocks::SHORT_GRASS)]);
    }

    #[test]
    fn test_liquid_collide_replaces_and_fizzes() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        place(&mut world, pos, FluidState::new(FluidId::WATER, 2, false));

        let cause = BlockState::Fluid(FluidState::source(FluidId::LAVA));
        assert!(liquid_collide(
            &mut world,
            pos,
            cause,
            BlockState::Block(vanilla_blocks::STONE)
        ));
        assert_eq!(world.get_cell(pos), BlockState::Block(vanilla_blocks::STONE));

        let events = world.reaction_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, sound_events::FIZZ);
        assert_eq!(events[0].position, pos.center());
        assert!((1800..=3400).contains(&events[0].payload));
    }

    #[test]
    fn test_neighbor_change_schedules_at_tick_rate() {
        let mut world = floored_world();
        let pos = BlockPos::new(0, 64, 0);
        // Boxed in so the update itself writes nothing.
        world.fill(
            BlockPos::new(-1, 64, -1),
            BlockPos::new(1, 64, 1),
            vanilla_blocks::STONE,
        );
        place(&mut world, pos, FluidState::source(FluidId::LAVA));

        on_neighbor_changed(&mut world, pos);
        assert!(world.has_scheduled_update(pos, FluidId::LAVA));

        world.run_ticks(u64::from(vanilla::LAVA.tick_rate));
        assert!(world.has_scheduled_update(pos, FluidId::LAVA));
        world.tick();
        assert!(!world.has_scheduled_update(pos, FluidId::LAVA));
    }
}
