//! Item behavior implementations.

mod bucket;

pub use bucket::{EmptyBucketBehavior, FilledBucketBehavior};
