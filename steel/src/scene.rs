//! The terrain the driver floods.

use anyhow::bail;
use steel_core::behavior::{FilledBucketBehavior, InteractionResult, ItemBehavior};
use steel_core::world::World;
use steel_registry::{FluidId, vanilla_blocks};
use steel_utils::BlockPos;

/// Height of the upper platform.
pub const PLATFORM_Y: i32 = 63;
/// Height of the floor under the ledge.
pub const BASIN_Y: i32 = 56;

/// Where the water bucket is poured.
pub const WATER_SOURCE: BlockPos = BlockPos::new(-9, PLATFORM_Y + 1, 0);
/// Where the lava source sits.
pub const LAVA_SOURCE: BlockPos = BlockPos::new(4, PLATFORM_Y + 1, 0);

/// Builds a platform with a ledge on its -x side over a wider basin, plants
/// some grass for the water to wash away and pours both liquids.
pub fn build(world: &mut World) -> anyhow::Result<()> {
    world.fill(
        BlockPos::new(-10, PLATFORM_Y, -12),
        BlockPos::new(12, PLATFORM_Y, 12),
        vanilla_blocks::STONE,
    );
    world.fill(
        BlockPos::new(-32, BASIN_Y, -32),
        BlockPos::new(32, BASIN_Y, 32),
        vanilla_blocks::STONE,
    );
    world.fill(
        BlockPos::new(-8, PLATFORM_Y + 1, -3),
        BlockPos::new(-6, PLATFORM_Y + 1, 3),
        vanilla_blocks::SHORT_GRASS,
    );

    let bucket = FilledBucketBehavior::new(FluidId::WATER);
    if bucket.use_on(world, WATER_SOURCE) != InteractionResult::Success {
        bail!("could not pour water at {WATER_SOURCE}");
    }
    if !world.place_fluid_source(LAVA_SOURCE, FluidId::LAVA) {
        bail!("could not place lava at {LAVA_SOURCE}");
    }
    Ok(())
}
