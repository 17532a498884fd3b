use super::FluidId;

/// The state of one liquid cell: its type, decay and whether it is falling.
///
/// Persisted as 4 bits of metadata, see [`FluidState::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FluidState {
    /// Liquid type identity.
    pub fluid: FluidId,
    /// Distance from the nearest source, 0..=7.
    pub decay: u8,
    /// Receiving liquid from directly above.
    pub falling: bool,
}

impl FluidState {
    /// Mask of the decay bits.
    pub const DECAY_MASK: u8 = 0x07;
    /// The falling bit.
    pub const FALLING_BIT: u8 = 0x08;
    /// Mask of every meaningful metadata bit.
    pub const STATE_MASK: u8 = 0b1111;
    /// Largest storable decay.
    pub const MAX_DECAY: u8 = 7;

    /// A source cell: decay 0, not falling.
    #[must_use]
    pub const fn source(fluid: FluidId) -> Self {
        Self {
            fluid,
            decay: 0,
            falling: false,
        }
    }

    /// A freshly produced cell. Falling cells always store decay 0.
    #[must_use]
    pub const fn new(fluid: FluidId, decay: u8, falling: bool) -> Self {
        Self {
            fluid,
            decay: if falling { 0 } else { decay & Self::DECAY_MASK },
            falling,
        }
    }

    /// Returns true for a decay-0, non-falling cell.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        self.decay == 0 && !self.falling
    }

    /// Decay used in comparisons: falling cells count as full strength.
    #[must_use]
    pub const fn effective_decay(&self) -> u8 {
        if self.falling { 0 } else { self.decay }
    }

    /// Fraction of the block filled by the liquid.
    #[must_use]
    pub fn height_percent(&self) -> f32 {
        f32::from(self.effective_decay() + 1) / 9.0
    }

    /// Packs the state into its 4-bit persisted form.
    #[must_use]
    pub const fn encode(&self) -> u8 {
        (self.decay & Self::DECAY_MASK) | if self.falling { Self::FALLING_BIT } else { 0 }
    }

    /// Unpacks a 4-bit persisted form. Bits above the mask are ignored.
    ///
    /// The stored decay is kept as-is even for falling cells.
    #[must_use]
    pub const fn decode(fluid: FluidId, meta: u8) -> Self {
        Self {
            fluid,
            decay: meta & Self::DECAY_MASK,
            falling: meta & Self::FALLING_BIT != 0,
        }
    }
}
