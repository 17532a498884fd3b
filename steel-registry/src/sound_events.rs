//! Sound event identifiers handed to the audio collaborator.
//!
//! The simulation never interprets these; it only forwards them together with
//! a position and payload.

/// A sound event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundEvent {
    /// Numeric id.
    pub id: u16,
    /// Namespaced name.
    pub key: &'static str,
}

/// Lava and water reacting.
pub const FIZZ: SoundEvent = SoundEvent {
    id: 1501,
    key: "minecraft:block.lava.extinguish",
};

/// Scooping water into a bucket.
pub const BUCKET_FILL_WATER: SoundEvent = SoundEvent {
    id: 1601,
    key: "minecraft:item.bucket.fill",
};

/// Pouring water out of a bucket.
pub const BUCKET_EMPTY_WATER: SoundEvent = SoundEvent {
    id: 1602,
    key: "minecraft:item.bucket.empty",
};

/// Scooping lava into a bucket.
pub const BUCKET_FILL_LAVA: SoundEvent = SoundEvent {
    id: 1603,
    key: "minecraft:item.bucket.fill_lava",
};

/// Pouring lava out of a bucket.
pub const BUCKET_EMPTY_LAVA: SoundEvent = SoundEvent {
    id: 1604,
    key: "minecraft:item.bucket.empty_lava",
};
