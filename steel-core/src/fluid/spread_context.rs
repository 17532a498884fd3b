//! Spread calculation context for fluid flow.
//!
//! Decides which horizontal directions a liquid spreads into by searching for
//! the nearest drop-off within the liquid's reach. Each coordinate is
//! classified at most once per search; the memo lives in the context and is
//! dropped together with it when the search returns.

use rustc_hash::FxHashMap;
use steel_registry::FluidType;
use steel_utils::{BlockPos, Direction};

use super::flowing::can_flow_into;
use crate::world::LevelAccessor;

/// Cost of a direction in which no drop-off was found.
pub const BLOCKED_COST: u32 = 1000;

/// Hard ceiling on the search depth, whatever the liquid's reach.
pub const MAX_FLOW_COST_DEPTH: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowStatus {
    /// The liquid cannot enter the position.
    Blocked,
    /// The liquid can enter the position but not fall from it.
    CanFlow,
    /// The liquid can enter the position and fall from it.
    CanFlowDown,
}

/// How far one search may walk.
///
/// The reach is `BASE_FLOW_REACH / per_block` blocks and may be fractional, so
/// it is kept scaled by `per_block` and compared exactly. The depth ceiling
/// applies whatever the reach.
#[derive(Debug, Clone, Copy)]
struct FlowBudget {
    scaled_reach: u32,
    per_block: u32,
    max_depth: u32,
}

impl FlowBudget {
    const fn new(reach: u32, per_block: u32) -> Self {
        Self {
            scaled_reach: reach,
            per_block,
            max_depth: MAX_FLOW_COST_DEPTH,
        }
    }

    fn of(fluid: &FluidType) -> Self {
        Self::new(
            FluidType::BASE_FLOW_REACH,
            u32::from(fluid.flow_decay_per_block.max(1)),
        )
    }

    const fn is_open(&self) -> bool {
        self.scaled_reach > 0
    }

    /// Returns true if a search `accumulated` steps out may take another step.
    fn allows_step(&self, accumulated: u32) -> bool {
        accumulated < self.max_depth
            && accumulated.saturating_mul(self.per_block) < self.scaled_reach
    }

    /// Shrinks the reach to `cost` blocks if that is shorter.
    fn tighten(&mut self, cost: u32) {
        self.scaled_reach = self
            .scaled_reach
            .min(cost.saturating_mul(self.per_block));
    }
}

/// Context for one flow cost search.
///
/// Created fresh by [`get_optimal_flow_directions`] and never stored, so two
/// searches can never share a memo.
pub(crate) struct SpreadContext<'a, W: ?Sized> {
    /// Status by hashed coordinate
    visited: FxHashMap<i64, FlowStatus>,
    world: &'a W,
}

impl<'a, W: LevelAccessor + ?Sized> SpreadContext<'a, W> {
    /// Creates an empty context reading from `world`.
    fn new(world: &'a W) -> Self {
        Self {
            visited: FxHashMap::default(),
            world,
        }
    }

    /// Returns the memoized status of `pos`, classifying it on first use.
    fn status(&mut self, pos: BlockPos) -> FlowStatus {
        let world = self.world;
        *self
            .visited
            .entry(world.hash_coordinate(pos))
            .or_insert_with(|| {
                if !can_flow_into(world.get_cell(pos)) {
                    FlowStatus::Blocked
                } else if world.get_cell(pos.below()).can_be_flowed_into() {
                    FlowStatus::CanFlowDown
                } else {
                    FlowStatus::CanFlow
                }
            })
    }

    /// Finds the cheapest cost at which a drop-off is reachable from `pos`.
    ///
    /// Never steps back towards the origin or along the edge just traversed.
    /// Returns [`BLOCKED_COST`] if nothing is found within the budget.
    fn calculate_flow_cost(
        &mut self,
        pos: BlockPos,
        accumulated: u32,
        budget: FlowBudget,
        origin_opposite: Direction,
        last_opposite: Direction,
    ) -> u32 {
        let mut cost = BLOCKED_COST;

        for direction in Direction::HORIZONTAL {
            if direction == origin_opposite || direction == last_opposite {
                continue;
            }

            let side = direction.relative(pos);
            match self.status(side) {
                FlowStatus::Blocked => continue,
                FlowStatus::CanFlowDown => return accumulated,
                FlowStatus::CanFlow => {}
            }

            // Anything found deeper costs at least accumulated + 1.
            if !budget.allows_step(accumulated) || cost <= accumulated + 1 {
                continue;
            }

            let real_cost = self.calculate_flow_cost(
                side,
                accumulated + 1,
                budget,
                origin_opposite,
                direction.opposite(),
            );
            cost = cost.min(real_cost);
        }

        cost
    }
}

/// Returns, for each horizontal direction (indexed by [`Direction::ordinal`]),
/// whether it is one of the cheapest ways towards a drop-off.
///
/// A neighbour the liquid can fall from costs 0 and stops the deeper searches
/// of the directions evaluated after it. Every direction matching the minimum
/// cost is marked, including when that minimum is [`BLOCKED_COST`].
#[must_use]
pub fn get_optimal_flow_directions<W: LevelAccessor + ?Sized>(
    world: &W,
    pos: BlockPos,
    fluid: &FluidType,
) -> [bool; 4] {
    let mut ctx = SpreadContext::new(world);
    let mut flow_cost = [BLOCKED_COST; 4];
    let mut budget = FlowBudget::of(fluid);

    for direction in Direction::HORIZONTAL {
        let side = direction.relative(pos);
        let index = direction.ordinal();

        match ctx.status(side) {
            FlowStatus::Blocked => {}
            FlowStatus::CanFlowDown => {
                flow_cost[index] = 0;
                budget.tighten(0);
            }
            FlowStatus::CanFlow if budget.is_open() => {
                flow_cost[index] = ctx.calculate_flow_cost(
                    side,
                    1,
                    budget,
                    direction.opposite(),
                    direction.opposite(),
                );
                budget.tighten(flow_cost[index]);
            }
            FlowStatus::CanFlow => {}
        }
    }

    let min_cost = flow_cost.iter().copied().min().unwrap_or(BLOCKED_COST);
    flow_cost.map(|cost| cost == min_cost)
}

#[cfg(test)]
mod tests {
    use steel_registry::fluid::vanilla;
    use steel_registry::{FluidRegistry, vanilla_blocks};

    use super::*;
    use crate::config::WorldSettings;
    use crate::world::World;

    const ORIGIN: BlockPos = BlockPos::new(0, 64, 0);

    /// A world with a stone floor below y = 64 around the origin.
    fn floored_world() -> World {
        let mut world = World::new(&WorldSettings::default(), FluidRegistry::vanilla());
        world.fill(
            BlockPos::new(-12, 63, -12),
            BlockPos::new(12, 63, 12),
            vanilla_blocks::STONE,
        );
        world
    }

    #[test]
    fn test_flat_floor_all_directions() {
        let world = floored_world();
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [true; 4]
        );
    }

    #[test]
    fn test_adjacent_drop_off_wins() {
        let mut world = floored_world();
        // Hole under the +x neighbour.
        world.fill(
            BlockPos::new(1, 63, 0),
            BlockPos::new(1, 63, 0),
            vanilla_blocks::AIR,
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [false, true, false, false]
        );
    }

    #[test]
    fn test_distant_drop_off_within_reach() {
        let mut world = floored_world();
        // Hole three blocks towards -z.
        world.fill(
            BlockPos::new(0, 63, -3),
            BlockPos::new(0, 63, -3),
            vanilla_blocks::AIR,
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [false, false, true, false]
        );
    }

    #[test]
    fn test_drop_off_out_of_lava_reach() {
        let mut world = floored_world();
        // Four blocks away: water (reach 4) sees it, lava (reach 2) does not.
        world.fill(
            BlockPos::new(-4, 63, 0),
            BlockPos::new(-4, 63, 0),
            vanilla_blocks::AIR,
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [true, false, false, false]
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::LAVA),
            [true; 4]
        );
    }

    #[test]
    fn test_blocked_neighbour_over_hole_is_not_a_drop_off() {
        let mut world = floored_world();
        world.fill(
            BlockPos::new(-1, 63, 0),
            BlockPos::new(-1, 63, 0),
            vanilla_blocks::AIR,
        );
        world.fill(
            BlockPos::new(-1, 64, 0),
            BlockPos::new(-1, 64, 0),
            vanilla_blocks::STONE,
        );
        world.fill(
            BlockPos::new(0, 63, -2),
            BlockPos::new(0, 63, -2),
            vanilla_blocks::AIR,
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [false, false, true, false]
        );
    }

    #[test]
    fn test_fully_enclosed_marks_every_direction() {
        let mut world = floored_world();
        for direction in Direction::HORIZONTAL {
            let side = direction.relative(ORIGIN);
            world.fill(side, side, vanilla_blocks::STONE);
        }
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [true; 4]
        );
    }

    #[test]
    fn test_search_memo_is_call_scoped() {
        let mut world = floored_world();
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [true; 4]
        );
        world.fill(
            BlockPos::new(0, 63, 2),
            BlockPos::new(0, 63, 2),
            vanilla_blocks::AIR,
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &vanilla::WATER),
            [false, false, false, true]
        );
    }

    #[test]
    fn test_flow_cost_reports_depth() {
        let mut world = floored_world();
        world.fill(
            BlockPos::new(3, 63, 0),
            BlockPos::new(3, 63, 0),
            vanilla_blocks::AIR,
        );
        let mut ctx = SpreadContext::new(&world);
        let cost = ctx.calculate_flow_cost(
            BlockPos::new(1, 64, 0),
            1,
            FlowBudget::new(4, 1),
            Direction::West,
            Direction::West,
        );
        assert_eq!(cost, 2);

        let mut ctx = SpreadContext::new(&world);
        let cost = ctx.calculate_flow_cost(
            BlockPos::new(1, 64, 0),
            1,
            FlowBudget::new(1, 1),
            Direction::West,
            Direction::West,
        );
        assert_eq!(cost, BLOCKED_COST);
    }

    #[test]
    fn test_fractional_reach() {
        let mut world = floored_world();
        // Reach 4/3: a second step is allowed, a third is not.
        world.fill(
            BlockPos::new(-3, 63, 0),
            BlockPos::new(-3, 63, 0),
            vanilla_blocks::AIR,
        );
        let thick = FluidType {
            flow_decay_per_block: 3,
            ..vanilla::WATER
        };
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &thick),
            [true, false, false, false]
        );

        world.fill(
            BlockPos::new(-3, 63, 0),
            BlockPos::new(-3, 63, 0),
            vanilla_blocks::STONE,
        );
        world.fill(
            BlockPos::new(-4, 63, 0),
            BlockPos::new(-4, 63, 0),
            vanilla_blocks::AIR,
        );
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &thick),
            [true; 4]
        );
    }

    #[test]
    fn test_reach_below_one_still_looks_one_step_out() {
        let mut world = floored_world();
        world.fill(
            BlockPos::new(-2, 63, 0),
            BlockPos::new(-2, 63, 0),
            vanilla_blocks::AIR,
        );
        let sludge = FluidType {
            flow_decay_per_block: 5,
            ..vanilla::LAVA
        };
        assert_eq!(
            get_optimal_flow_directions(&world, ORIGIN, &sludge),
            [true, false, false, false]
        );
    }

    #[test]
    fn test_depth_ceiling_stops_the_search() {
        let mut world = World::new(&WorldSettings::default(), FluidRegistry::vanilla());
        // A one-wide corridor running towards +x.
        world.fill(
            BlockPos::new(-2, 63, 0),
            BlockPos::new(30, 63, 0),
            vanilla_blocks::STONE,
        );
        world.fill(
            BlockPos::new(-2, 64, -1),
            BlockPos::new(30, 64, -1),
            vanilla_blocks::STONE,
        );
        world.fill(
            BlockPos::new(-2, 64, 1),
            BlockPos::new(30, 64, 1),
            vanilla_blocks::STONE,
        );
        let unbounded = FlowBudget::new(1000, 1);
        let start = BlockPos::new(1, 64, 0);

        let hole = BlockPos::new(17, 63, 0);
        world.fill(hole, hole, vanilla_blocks::AIR);
        let mut ctx = SpreadContext::new(&world);
        let cost = ctx.calculate_flow_cost(start, 1, unbounded, Direction::West, Direction::West);
        assert_eq!(cost, MAX_FLOW_COST_DEPTH);

        world.fill(hole, hole, vanilla_blocks::STONE);
        world.fill(hole.offset(1, 0, 0), hole.offset(1, 0, 0), vanilla_blocks::AIR);
        let mut ctx = SpreadContext::new(&world);
        let cost = ctx.calculate_flow_cost(start, 1, unbounded, Direction::West, Direction::West);
        assert_eq!(cost, BLOCKED_COST);
    }
}
