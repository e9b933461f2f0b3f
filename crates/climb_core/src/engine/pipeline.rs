//! End-to-end planning: HoldSet → graph → route → limbs → instructions.
//!
//! Every call builds its own graph and body state; nothing is shared between
//! calls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::graph::build_graph;
use super::instructions::{generate_instructions, Instruction};
use super::limb_assigner::{assign_limbs_with, Step};
use super::planner::{plan_route_with_band, PlannedRoute};
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::models::HoldSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoutePlan {
    pub route: PlannedRoute,
    pub steps: Vec<Step>,
    pub instructions: Vec<Instruction>,
}

pub fn plan_climb(holds: &HoldSet, config: &PlannerConfig) -> Result<RoutePlan> {
    config.validate()?;

    if holds.len() < config.route.min_holds {
        warn!(found = holds.len(), required = config.route.min_holds, "not enough holds");
        return Err(PlanError::InsufficientHolds {
            found: holds.len(),
            required: config.route.min_holds,
        });
    }

    let graph = build_graph(holds, config.graph.horizontal_weight)?;
    let route = plan_route_with_band(&graph, config.route.candidate_band);

    if !route.found() {
        return Err(PlanError::NoPathFound {
            holds: holds.len(),
            low_candidates: route.low_candidates.len(),
            high_candidates: route.high_candidates.len(),
        });
    }

    let steps = assign_limbs_with(&route.path, holds, &config.limbs);
    let instructions = generate_instructions(&steps);

    info!(
        holds = holds.len(),
        steps = steps.len(),
        cost = route.cost,
        "climb planned"
    );

    Ok(RoutePlan { route, steps, instructions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::body::Limb;
    use crate::engine::planner::RouteStatus;
    use crate::models::Hold;

    fn plain(points: &[(u32, f64, f64)]) -> HoldSet {
        HoldSet::from_holds(points.iter().map(|&(id, x, y)| Hold::new(id, x, y)).collect())
            .expect("valid holds")
    }

    #[test]
    fn test_demo_wall_plans() {
        let plan = plan_climb(&HoldSet::demo_wall(), &PlannerConfig::default()).expect("plan");
        assert_eq!(plan.route.status, RouteStatus::Found);
        assert_eq!(plan.steps.len(), plan.route.path.len());
        assert_eq!(plan.instructions.len(), plan.route.path.len());
        // Cheapest band-to-band climb: green crimp (y=900) up to the orange jug
        // (y=350), 550 vertical + 1.2 * 75 horizontal at best.
        assert_eq!(plan.route.path.first(), Some(&2));
        assert_eq!(plan.route.path.last(), Some(&9));
        assert!((plan.route.cost - 640.0).abs() < 1e-6);
        assert_eq!(plan.instructions[0].limb, Limb::LeftHand);
    }

    #[test]
    fn test_too_few_holds() {
        let err = plan_climb(&plain(&[(0, 0.0, 0.0)]), &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlanError::InsufficientHolds { found: 1, required: 2 }));

        let err = plan_climb(&HoldSet::default(), &PlannerConfig::single_hold()).unwrap_err();
        assert!(matches!(err, PlanError::InsufficientHolds { found: 0, required: 1 }));
    }

    #[test]
    fn test_single_hold_when_allowed() {
        let plan = plan_climb(&plain(&[(9, 10.0, 10.0)]), &PlannerConfig::single_hold())
            .expect("plan");
        assert_eq!(plan.route.status, RouteStatus::SingleHold);
        assert_eq!(plan.route.cost, 0.0);
        assert_eq!(plan.instructions.len(), 1);
        assert_eq!(plan.instructions[0].limb, Limb::LeftHand);
    }

    #[test]
    fn test_flat_pair_reports_candidate_counts() {
        let err = plan_climb(&plain(&[(1, 0.0, 500.0), (2, 300.0, 500.0)]), &PlannerConfig::default())
            .unwrap_err();
        match err {
            PlanError::NoPathFound { holds, low_candidates, high_candidates } => {
                assert_eq!((holds, low_candidates, high_candidates), (2, 2, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_surfaces_first() {
        let mut cfg = PlannerConfig::default();
        cfg.limbs.bias = -1.0;
        let err = plan_climb(&HoldSet::demo_wall(), &cfg).unwrap_err();
        assert!(matches!(err, PlanError::InvalidConfig(_)));
    }
}
