//! Vanilla liquid types with their default tuning.

use super::{FluidId, FluidKind, FluidType};
use crate::sound_events;

/// Water: fast, reaches 4 blocks to find a drop-off, forms new sources.
pub const WATER: FluidType = FluidType {
    id: FluidId::WATER,
    key: "minecraft:water",
    kind: FluidKind::Water,
    tick_rate: 5,
    flow_decay_per_block: 1,
    source_conversion: true,
    still_form: "minecraft:water",
    flowing_form: "minecraft:flowing_water",
    bucket_fill_sound: sound_events::BUCKET_FILL_WATER,
    bucket_empty_sound: sound_events::BUCKET_EMPTY_WATER,
};

/// Lava: slow, loses 2 decay per block, never forms new sources.
pub const LAVA: FluidType = FluidType {
    id: FluidId::LAVA,
    key: "minecraft:lava",
    kind: FluidKind::Lava,
    tick_rate: 30,
    flow_decay_per_block: 2,
    source_conversion: false,
    still_form: "minecraft:lava",
    flowing_form: "minecraft:flowing_lava",
    bucket_fill_sound: sound_events::BUCKET_FILL_LAVA,
    bucket_empty_sound: sound_events::BUCKET_EMPTY_LAVA,
};
