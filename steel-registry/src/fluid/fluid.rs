use crate::sound_events::SoundEvent;

/// Liquid type identity.
///
/// Two cells are the "same liquid" for flow purposes iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FluidId(pub u8);

impl FluidId {
    /// Water.
    pub const WATER: FluidId = FluidId(1);
    /// Lava.
    pub const LAVA: FluidId = FluidId(2);
}

/// The behaviour category of a liquid type.
///
/// The simulation engine is shared; the category only selects the
/// type-specific hooks (hardening, reactions when spreading).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidKind {
    /// Water-like: never hardens, reacts with lava flowing into it.
    Water,
    /// Lava-like: hardens next to water, turns water it flows into into stone.
    Lava,
}

/// Per-type tuning values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidType {
    /// Type identity.
    pub id: FluidId,
    /// Namespaced name, e.g. `minecraft:water`.
    pub key: &'static str,
    /// Behaviour category.
    pub kind: FluidKind,
    /// Ticks between scheduled updates.
    pub tick_rate: u32,
    /// Decay gained per block of horizontal spread. Higher values shrink reach.
    pub flow_decay_per_block: u8,
    /// Whether two adjacent sources over a floor create a new source.
    pub source_conversion: bool,
    /// Visual form of a source cell.
    pub still_form: &'static str,
    /// Visual form of a flowing cell.
    pub flowing_form: &'static str,
    /// Played when the liquid is scooped into a bucket.
    pub bucket_fill_sound: SoundEvent,
    /// Played when the liquid is poured from a bucket.
    pub bucket_empty_sound: SoundEvent,
}

impl FluidType {
    /// Default horizontal search budget before dividing by the decay per block.
    pub const BASE_FLOW_REACH: u32 = 4;

    /// Largest decay per block that still lets a source spread one block.
    pub const MAX_FLOW_DECAY_PER_BLOCK: u8 = 7;

    /// How far (in blocks) the spread search looks for a drop-off.
    ///
    /// The reach is fractional: with a decay of 3 per block it is 4/3, so the
    /// search takes a second step but never a third.
    #[must_use]
    pub fn max_reach(&self) -> f64 {
        f64::from(Self::BASE_FLOW_REACH) / f64::from(self.flow_decay_per_block)
    }

    /// Checks the tuning can drive the simulation.
    ///
    /// A decay of 0 per block would turn every spread cell into a source.
    pub fn validate_tuning(&self) -> Result<(), &'static str> {
        if self.tick_rate == 0 {
            return Err("Fluid tick rate must be at least 1");
        }
        if !(1..=Self::MAX_FLOW_DECAY_PER_BLOCK).contains(&self.flow_decay_per_block) {
            return Err("Flow decay per block must be in range 1..=7");
        }
        Ok(())
    }
}
