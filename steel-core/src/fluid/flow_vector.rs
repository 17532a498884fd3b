//! Flow vectors: the direction a liquid cell pushes entities in.

use rustc_hash::FxHashMap;
use steel_registry::FluidState;
use steel_utils::math::Vector3;
use steel_utils::{BlockPos, Direction};

use super::flowing::{can_flow_into, effective_flow_decay};
use crate::world::LevelAccessor;

/// Downward bias added to falling columns hemmed in at their sides.
const FALLING_PUSH: Vector3<f64> = Vector3::new(0.0, -6.0, 0.0);

/// Flow vectors computed since the surroundings of their cell last changed.
///
/// Owned by the world, which calls [`FlowVectorCache::invalidate_around`] on
/// every write.
#[derive(Debug, Default)]
pub struct FlowVectorCache {
    vectors: FxHashMap<BlockPos, Vector3<f64>>,
}

impl FlowVectorCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached vector at `pos`.
    #[must_use]
    pub fn get(&self, pos: BlockPos) -> Option<Vector3<f64>> {
        self.vectors.get(&pos).copied()
    }

    /// Caches the vector at `pos`.
    pub fn insert(&mut self, pos: BlockPos, vector: Vector3<f64>) {
        self.vectors.insert(pos, vector);
    }

    /// Drops every cached vector whose inputs include `pos`.
    ///
    /// A flow vector reads the cell, its horizontal neighbours and the cells
    /// just above and below those, so the 3x3x3 block around `pos` is cleared.
    pub fn invalidate_around(&mut self, pos: BlockPos) {
        if self.vectors.is_empty() {
            return;
        }
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    self.vectors.remove(&pos.offset(dx, dy, dz));
                }
            }
        }
    }

    /// Number of cached vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Something that liquids can push around.
pub trait CurrentAffected {
    /// Returns true if flowing liquid moves this entity.
    fn can_be_moved_by_currents(&self) -> bool;
}

/// Returns the normalized flow vector of the liquid at `pos`.
///
/// Positions without liquid have a zero vector, which is not cached.
pub fn get_flow_vector<W: LevelAccessor + ?Sized>(world: &mut W, pos: BlockPos) -> Vector3<f64> {
    let Some(cell) = world.get_cell(pos).fluid_state() else {
        return Vector3::ZERO;
    };
    if let Some(vector) = world.flow_vectors().get(pos) {
        return vector;
    }

    let vector = compute_flow_vector(world, pos, cell);
    world.flow_vectors().insert(pos, vector);
    vector
}

fn compute_flow_vector<W: LevelAccessor + ?Sized>(
    world: &W,
    pos: BlockPos,
    cell: FluidState,
) -> Vector3<f64> {
    let decay = i32::from(cell.effective_decay());
    let mut vector = Vector3::ZERO;

    for direction in Direction::HORIZONTAL {
        let side_pos = direction.relative(pos);
        let side = world.get_cell(side_pos);
        let side_decay = effective_flow_decay(side, cell.fluid);

        let real_decay = if side_decay < 0 {
            if !side.can_be_flowed_into() {
                continue;
            }
            // Pulled towards a ledge the liquid could pour over.
            let below_decay = effective_flow_decay(world.get_cell(side_pos.below()), cell.fluid);
            if below_decay < 0 {
                continue;
            }
            i32::from(below_decay) - (decay - 8)
        } else {
            i32::from(side_decay) - decay
        };

        let (dx, _, dz) = direction.offset();
        vector += Vector3::new(f64::from(dx * real_decay), 0.0, f64::from(dz * real_decay));
    }

    if cell.falling
        && Direction::HORIZONTAL.into_iter().any(|direction| {
            let side = direction.relative(pos);
            !can_flow_into(world.get_cell(side)) || !can_flow_into(world.get_cell(side.above()))
        })
    {
        vector = vector.normalize() + FALLING_PUSH;
    }

    vector.normalize()
}

/// Adds the flow vector at `pos` to `velocity` if `entity` is moved by currents.
pub fn add_velocity_to_entity<W, E>(
    world: &mut W,
    pos: BlockPos,
    entity: &E,
    velocity: &mut Vector3<f64>,
) where
    W: LevelAccessor + ?Sized,
    E: CurrentAffected + ?Sized,
{
    if entity.can_be_moved_by_currents() {
        *velocity += get_flow_vector(world, pos);
    }
}
