//! Non-liquid blocks and the capability flags the fluid simulation reads.
//!
//! Placement rules, drops and tool checks live elsewhere; this table only
//! carries what decides whether a liquid can occupy or pass a position.

/// A reference to a static block definition.
pub type BlockRef = &'static Block;

/// Capability flags for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockConfig {
    /// The block is empty space.
    pub is_air: bool,
    /// The block occupies its whole cell and supports what sits on it.
    pub solid: bool,
    /// Light and vision pass through the block.
    pub transparent: bool,
    /// A liquid may overwrite the block, breaking it first if it is not air.
    pub replaceable: bool,
}

/// A block definition.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Namespaced identifier, e.g. `minecraft:stone`.
    pub key: &'static str,
    /// Capability flags.
    pub config: BlockConfig,
}

impl Block {
    /// Returns true if a liquid may flow into this block.
    #[must_use]
    pub const fn can_be_flowed_into(&self) -> bool {
        self.config.is_air || self.config.replaceable
    }
}

const SOLID: BlockConfig = BlockConfig {
    is_air: false,
    solid: true,
    transparent: false,
    replaceable: false,
};

/// Vanilla block definitions used by the simulation.
pub mod vanilla_blocks {
    use super::{Block, BlockConfig, BlockRef, SOLID};

    /// Empty space.
    pub const AIR: BlockRef = &Block {
        key: "minecraft:air",
        config: BlockConfig {
            is_air: true,
            solid: false,
            transparent: true,
            replaceable: true,
        },
    };

    /// Stone, the product of lava flowing into water.
    pub const STONE: BlockRef = &Block {
        key: "minecraft:stone",
        config: SOLID,
    };

    /// Cobblestone, the product of flowing lava touching water.
    pub const COBBLESTONE: BlockRef = &Block {
        key: "minecraft:cobblestone",
        config: SOLID,
    };

    /// Obsidian, the product of a lava source touching water.
    pub const OBSIDIAN: BlockRef = &Block {
        key: "minecraft:obsidian",
        config: SOLID,
    };

    /// Dirt.
    pub const DIRT: BlockRef = &Block {
        key: "minecraft:dirt",
        config: SOLID,
    };

    /// Glass: solid for flow purposes but transparent.
    pub const GLASS: BlockRef = &Block {
        key: "minecraft:glass",
        config: BlockConfig {
            is_air: false,
            solid: true,
            transparent: true,
            replaceable: false,
        },
    };

    /// Short grass: an obstruction liquids wash away.
    pub const SHORT_GRASS: BlockRef = &Block {
        key: "minecraft:short_grass",
        config: BlockConfig {
            is_air: false,
            solid: false,
            transparent: true,
            replaceable: true,
        },
    };

    /// A fence post: not solid, but liquids cannot enter it.
    pub const OAK_FENCE: BlockRef = &Block {
        key: "minecraft:oak_fence",
        config: BlockConfig {
            is_air: false,
            solid: false,
            transparent: true,
            replaceable: false,
        },
    };
}
