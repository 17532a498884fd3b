//! Lava-specific hooks.
//!
//! Lava hardens when it touches water and turns water it flows into into stone.

use steel_registry::{BlockState, FluidState, vanilla_blocks};
use steel_utils::{BlockPos, Direction};

use super::flowing::liquid_collide;
use super::water::is_water;
use crate::world::LevelAccessor;

/// Hardens the lava at `pos` if water touches it from any side but below.
///
/// A source becomes obsidian and a cell whose encoded state is at most 4
/// becomes cobblestone. Falling lava is left alone.
pub(super) fn check_for_harden<W: LevelAccessor + ?Sized>(world: &mut W, pos: BlockPos) -> bool {
    let Some(cell) = world.get_cell(pos).fluid_state() else {
        return false;
    };

    let view: &W = world;
    let Some(colliding) = Direction::ALL
        .into_iter()
        .filter(|direction| *direction != Direction::Down)
        .map(|direction| view.get_cell(direction.relative(pos)))
        .find(|side| is_water(view, *side))
    else {
        return false;
    };

    let result = match cell.encode() {
        0 => vanilla_blocks::OBSIDIAN,
        1..=4 => vanilla_blocks::COBBLESTONE,
        _ => return false,
    };
    liquid_collide(world, pos, colliding, BlockState::Block(result))
}

/// Turns the water at `target` into stone when lava flows into it.
///
/// Returns false (and changes nothing) if `target` does not hold water.
pub(super) fn flow_into_water<W: LevelAccessor + ?Sized>(
    world: &mut W,
    target: BlockPos,
    state: BlockState,
    lava: FluidState,
) -> bool {
    if !is_water(world, state) {
        return false;
    }
    liquid_collide(
        world,
        target,
        BlockState::Fluid(lava),
        BlockState::Block(vanilla_blocks::STONE),
    )
}

#[cfg(test)]
mod tests {
    use steel_registry::{FluidId, FluidRegistry};
    use steel_utils::UpdateFlags;

    use super::*;
    use crate::config::WorldSettings;
    use crate::world::World;

    const LAVA_POS: BlockPos = BlockPos::new(0, 64, 0);

    fn world_with(lava: FluidState, water_at: BlockPos) -> World {
        let mut world = World::new(&WorldSettings::default(), FluidRegistry::vanilla());
        world.set_cell(LAVA_POS, BlockState::Fluid(lava), UpdateFlags::empty());
        world.set_cell(
            water_at,
            BlockState::Fluid(FluidState::source(FluidId::WATER)),
            UpdateFlags::empty(),
        );
        world
    }

    #[test]
    fn test_source_hardens_to_obsidian() {
        let mut world = world_with(FluidState::source(FluidId::LAVA), LAVA_POS.above());
        assert!(check_for_harden(&mut world, LAVA_POS));
        assert_eq!(
            world.get_cell(LAVA_POS),
            BlockState::Block(vanilla_blocks::OBSIDIAN)
        );
        assert_eq!(world.reaction_events().len(), 1);
    }

    #[test]
    fn test_shallow_flow_hardens_to_cobblestone() {
        let mut world = world_with(
            FluidState::new(FluidId::LAVA, 4, false),
            BlockPos::new(1, 64, 0),
        );
        assert!(check_for_harden(&mut world, LAVA_POS));
        assert_eq!(
            world.get_cell(LAVA_POS),
            BlockState::Block(vanilla_blocks::COBBLESTONE)
        );
    }

    #[test]
    fn test_thin_or_falling_lava_stays() {
        let thin = FluidState::new(FluidId::LAVA, 6, false);
        let mut world = world_with(thin, BlockPos::new(0, 64, 1));
        assert!(!check_for_harden(&mut world, LAVA_POS));
        assert_eq!(world.fluid_state(LAVA_POS), Some(thin));

        let falling = FluidState::new(FluidId::LAVA, 0, true);
        let mut world = world_with(falling, BlockPos::new(0, 64, 1));
        assert!(!check_for_harden(&mut world, LAVA_POS));
        assert_eq!(world.fluid_state(LAVA_POS), Some(falling));
        assert!(world.reaction_events().is_empty());
    }

    #[test]
    fn test_water_below_does_not_harden() {
        let mut world = world_with(FluidState::source(FluidId::LAVA), LAVA_POS.below());
        assert!(!check_for_harden(&mut world, LAVA_POS));
        assert_eq!(
            world.fluid_state(LAVA_POS),
            Some(FluidState::source(FluidId::LAVA))
        );
    }

    #[test]
    fn test_flow_into_water_makes_stone() {
        let target = BlockPos::new(1, 64, 0);
        let mut world = world_with(FluidState::source(FluidId::LAVA), target);
        let lava = FluidState::new(FluidId::LAVA, 2, false);

        let water = world.get_cell(target);
        assert!(flow_into_water(&mut world, target, water, lava));
        assert_eq!(world.get_cell(target), BlockState::Block(vanilla_blocks::STONE));

        let stone = world.get_cell(target);
        assert!(!flow_into_water(&mut world, target, stone, lava));
    }
}
