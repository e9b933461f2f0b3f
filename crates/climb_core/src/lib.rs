//! # climb_core - Deterministic Climbing Route Planner
//!
//! Plans a path up a wall of holds and tells the climber which limb to put
//! on each hold.
//!
//! ## Pipeline
//! HoldSet → MovementGraph → PlannedRoute → Steps → Instructions
//!
//! Each stage is a pure function of its inputs:
//! - [`build_graph`]: directed graph of upward moves
//! - [`plan_route`]: cheapest path from the bottom band to the top band
//! - [`assign_limbs`]: greedy limb choice over a body state
//! - [`generate_instructions`]: one sentence per step
//!
//! [`plan_climb`] runs them in sequence and turns empty results into
//! [`PlanError`]s.

// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod render;

pub use api::{plan_route_json, plan_route_json_envelope, RouteDocument, RouteRequest};
pub use config::PlannerConfig;
pub use engine::{
    assign_limbs, assign_limbs_with, build_graph, generate_instructions, plan_climb, plan_route, BodyState,
    Instruction, Limb, MovementGraph, PlannedRoute, RoutePlan, RouteStatus, Step,
};
pub use error::{PlanError, Result};
pub use models::{Hold, HoldColor, HoldId, HoldRecord, HoldSet, HoldSize, HoldType};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
