//! Shared primitives for the Steel fluid simulation: positions, directions,
//! vectors and block update flags.

pub mod direction;
pub mod math;
pub mod types;

pub use direction::Direction;
pub use types::{BlockPos, UpdateFlags};
