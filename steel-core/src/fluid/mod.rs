//! Fluid behavior system.
//!
//! This module handles liquid mechanics: decay, falling, spreading, source
//! formation, hardening and the flow vectors that push entities around.

mod flow_vector;
pub mod flowing;
mod lava;
mod spread_context;
mod water;

pub use flow_vector::{CurrentAffected, FlowVectorCache, add_velocity_to_entity, get_flow_vector};
pub use flowing::{
    can_flow_into, effective_flow_decay, flow_into_block, liquid_collide, on_neighbor_changed,
    tick,
};
pub use spread_context::{BLOCKED_COST, MAX_FLOW_COST_DEPTH, get_optimal_flow_directions};
pub use water::is_water;
