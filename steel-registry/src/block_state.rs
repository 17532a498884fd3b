//! The contents of one grid position.

use std::fmt;

use crate::blocks::{BlockRef, vanilla_blocks};
use crate::fluid::{FluidId, FluidState};

/// What occupies a grid position: either a plain block or a liquid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockState {
    /// A non-liquid block (including air).
    Block(BlockRef),
    /// A liquid cell.
    Fluid(FluidState),
}

impl BlockState {
    /// Empty space.
    pub const AIR: BlockState = BlockState::Block(vanilla_blocks::AIR);

    /// Returns true if the position is empty space.
    #[must_use]
    pub fn is_air(&self) -> bool {
        matches!(self, Self::Block(block) if block.config.is_air)
    }

    /// Returns true if a liquid may flow into this position.
    ///
    /// Liquid cells always report true; whether a specific liquid may replace
    /// them is decided by the fluid code.
    #[must_use]
    pub fn can_be_flowed_into(&self) -> bool {
        match self {
            Self::Block(block) => block.can_be_flowed_into(),
            Self::Fluid(_) => true,
        }
    }

    /// Returns true if the position is a solid, supporting block.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        match self {
            Self::Block(block) => block.config.solid,
            Self::Fluid(_) => false,
        }
    }

    /// Returns true if light passes through the position.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        match self {
            Self::Block(block) => block.config.transparent,
            Self::Fluid(_) => true,
        }
    }

    /// Returns the liquid cell, if any.
    #[must_use]
    pub const fn fluid_state(&self) -> Option<FluidState> {
        match self {
            Self::Fluid(state) => Some(*state),
            Self::Block(_) => None,
        }
    }

    /// Returns the liquid type identity, if any.
    #[must_use]
    pub const fn fluid_id(&self) -> Option<FluidId> {
        match self {
            Self::Fluid(state) => Some(state.fluid),
            Self::Block(_) => None,
        }
    }

    /// Returns true if the position holds a liquid source of any type.
    #[must_use]
    pub const fn is_fluid_source(&self) -> bool {
        matches!(self, Self::Fluid(state) if state.is_source())
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(block) => f.write_str(block.key),
            Self::Fluid(state) => write!(
                f,
                "fluid#{}[decay={},falling={}]",
                state.fluid.0, state.decay, state.falling
            ),
        }
    }
}

impl From<BlockRef> for BlockState {
    fn from(block: BlockRef) -> Self {
        Self::Block(block)
    }
}

impl From<FluidState> for BlockState {
    fn from(state: FluidState) -> Self {
        Self::Fluid(state)
    }
}
