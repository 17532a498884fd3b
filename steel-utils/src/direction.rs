//! Cardinal directions.

use crate::BlockPos;

/// The six axis-aligned directions.
///
/// The first four ordinals are the horizontal directions in the order the fluid
/// code indexes them (`-x`, `+x`, `-z`, `+z`), so that `ordinal ^ 1` is always
/// the opposite horizontal direction.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards negative x - ordinal 0
    West = 0,
    /// Towards positive x - ordinal 1
    East = 1,
    /// Towards negative z - ordinal 2
    North = 2,
    /// Towards positive z - ordinal 3
    South = 3,
    /// Towards negative y - ordinal 4
    Down = 4,
    /// Towards positive y - ordinal 5
    Up = 5,
}

impl Direction {
    /// All six directions in array form for iteration.
    pub const ALL: [Direction; 6] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::Down,
        Direction::Up,
    ];

    /// The four horizontal directions, indexed by [`Direction::ordinal`].
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Returns the ordinal of this direction.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::West => Self::East,
            Self::East => Self::West,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Returns true for the four horizontal directions.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Self::Down | Self::Up)
    }

    /// Gets the offset in the given direction.
    ///
    /// Returns (dx, dy, dz) for this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
        }
    }

    /// Returns a new `BlockPos` relative to the given position in this direction.
    #[must_use]
    pub const fn relative(self, pos: BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.offset();
        pos.offset(dx, dy, dz)
    }
}
