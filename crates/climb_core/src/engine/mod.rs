pub mod body; // Limb slots and body center
pub mod graph; // Movement graph builder
pub mod instructions; // Step → sentence formatting
pub mod limb_assigner; // Greedy limb selection state machine
pub mod pipeline; // plan_climb(): the four stages in sequence
pub mod planner; // Band-to-band cheapest route

pub use body::{BodyCenter, BodyState, Limb};
pub use graph::{build_graph, move_cost, Edge, GraphNode, MovementGraph, PathCost};
pub use instructions::{generate_instructions, Instruction};
pub use limb_assigner::{assign_limbs, assign_limbs_with, height_factor, Step};
pub use pipeline::{plan_climb, RoutePlan};
pub use planner::{
    candidate_sets, plan_route, plan_route_with_band, PlannedRoute, RouteStatus,
    DEFAULT_CANDIDATE_BAND,
};

#[cfg(test)]
mod proptests;
