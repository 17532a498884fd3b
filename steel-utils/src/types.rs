// Wrapper types making it harder to accidentaly use the wrong underlying type.

use std::fmt::{self, Display};

use bitflags::bitflags;

use crate::direction::Direction;
use crate::math::Vector3;

// A block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    const PACKED_X_BITS: u32 = 26;
    const PACKED_Z_BITS: u32 = 26;
    const PACKED_Y_BITS: u32 = 12;
    const Y_OFFSET: u32 = 0;
    const Z_OFFSET: u32 = Self::PACKED_Y_BITS;
    const X_OFFSET: u32 = Self::PACKED_Y_BITS + Self::PACKED_Z_BITS;

    /// Creates a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The x coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    /// The y coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    /// The z coordinate.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.z
    }

    /// Returns the position offset by the given deltas.
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.0.x + dx, self.0.y + dy, self.0.z + dz)
    }

    /// Returns the neighbouring position in `direction`.
    #[must_use]
    pub fn relative(&self, direction: Direction) -> Self {
        direction.relative(*self)
    }

    /// The position directly above.
    #[must_use]
    pub const fn above(&self) -> Self {
        self.offset(0, 1, 0)
    }

    /// The position directly below.
    #[must_use]
    pub const fn below(&self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The centre of the block in world space.
    #[must_use]
    pub fn center(&self) -> Vector3<f64> {
        Vector3::<f64>::from(self.0) + Vector3::new(0.5, 0.5, 0.5)
    }

    /// Packs the position into a single `i64` (26 bits x, 26 bits z, 12 bits y).
    ///
    /// Stable for every position with `|x|, |z| < 2^25` and `|y| < 2^11`.
    #[must_use]
    pub const fn as_long(&self) -> i64 {
        let x = (self.0.x as i64) & ((1 << Self::PACKED_X_BITS) - 1);
        let y = (self.0.y as i64) & ((1 << Self::PACKED_Y_BITS) - 1);
        let z = (self.0.z as i64) & ((1 << Self::PACKED_Z_BITS) - 1);
        (x << Self::X_OFFSET) | (z << Self::Z_OFFSET) | (y << Self::Y_OFFSET)
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

bitflags! {
    /// Flags controlling the side effects of a block write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u8 {
        /// Notify the written position and its six neighbours.
        const UPDATE_NEIGHBORS = 0b0001;
        /// Queue the position for a light recalculation.
        const UPDATE_LIGHT = 0b0010;
        /// Both of the above.
        const UPDATE_ALL = Self::UPDATE_NEIGHBORS.bits() | Self::UPDATE_LIGHT.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_long_distinct_neighbours() {
        let pos = BlockPos::new(5, 64, -5);
        let mut keys: Vec<i64> = Direction::ALL
            .iter()
            .map(|d| pos.relative(*d).as_long())
            .collect();
        keys.push(pos.as_long());
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn test_center() {
        let c = BlockPos::new(1, 2, -3).center();
        assert_eq!(c, Vector3::new(1.5, 2.5, -2.5));
    }
}
