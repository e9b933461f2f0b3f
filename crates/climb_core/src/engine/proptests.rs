//! Property-based tests for the planning pipeline

use proptest::prelude::*;

use super::*;
use crate::models::{Hold, HoldId, HoldSet};

/// Hold sets of 1..=7 holds on a 25 px grid; ids follow supplied order.
fn hold_set_strategy() -> impl Strategy<Value = HoldSet> {
    prop::collection::vec((0u32..=20, 0u32..=40), 1..=7).prop_map(|cells| {
        let holds = cells
            .into_iter()
            .enumerate()
            .map(|(i, (cx, cy))| Hold::new(i as HoldId, cx as f64 * 25.0, cy as f64 * 25.0))
            .collect();
        HoldSet::from_holds(holds).expect("generated holds are valid")
    })
}

fn weight_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), Just(1.2), Just(2.0)]
}

/// Cost of every simple path from a low candidate to a distinct high candidate.
fn brute_force_costs(graph: &MovementGraph) -> Vec<f64> {
    fn walk(graph: &MovementGraph, at: usize, high: &[usize], trail: &mut Vec<usize>, out: &mut Vec<f64>) {
        if trail.len() > 1 && high.contains(&at) {
            out.push(graph.index_path_cost(trail));
        }
        for edge in graph.successors(at) {
            trail.push(edge.to);
            walk(graph, edge.to, high, trail, out);
            trail.pop();
        }
    }

    let (low, high) = candidate_sets(graph, DEFAULT_CANDIDATE_BAND);
    let mut out = Vec::new();
    for &s in &low {
        walk(graph, s, &high, &mut vec![s], &mut out);
    }
    out
}

proptest! {
    /// Property: the planned route is no more expensive than any band-to-band path
    #[test]
    fn prop_route_is_optimal(holds in hold_set_strategy(), weight in weight_strategy()) {
        let graph = build_graph(&holds, weight).expect("graph");
        let route = plan_route(&graph);
        let costs = brute_force_costs(&graph);

        match route.status {
            RouteStatus::Found => {
                for cost in &costs {
                    prop_assert!(route.cost <= cost + 1e-9);
                }
                prop_assert!(route.path.len() >= 2);
            }
            RouteStatus::SingleHold => prop_assert_eq!(holds.len(), 1),
            RouteStatus::NoPathFound => prop_assert!(costs.is_empty()),
        }
    }

    /// Property: consecutive route holds are graph edges
    #[test]
    fn prop_route_follows_edges(holds in hold_set_strategy(), weight in weight_strategy()) {
        let graph = build_graph(&holds, weight).expect("graph");
        let route = plan_route(&graph);
        for pair in route.path.windows(2) {
            prop_assert!(graph.has_edge(pair[0], pair[1]));
        }
        let mut ids = route.path.clone();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), route.path.len());
    }

    /// Property: limb assignment is a pure function of its inputs
    #[test]
    fn prop_assignment_deterministic(holds in hold_set_strategy()) {
        let path: Vec<HoldId> = holds.iter().map(|h| h.id).collect();
        let a = serde_json::to_string(&assign_limbs(&path, &holds)).expect("json");
        let b = serde_json::to_string(&assign_limbs(&path, &holds)).expect("json");
        prop_assert_eq!(a, b);
    }

    /// Property: steps are numbered 1..=N and start with left hand, right hand
    #[test]
    fn prop_step_numbering_and_bootstrap(holds in hold_set_strategy()) {
        let path: Vec<HoldId> = holds.iter().map(|h| h.id).collect();
        let instructions = generate_instructions(&assign_limbs(&path, &holds));

        let numbers: Vec<usize> = instructions.iter().map(|i| i.step).collect();
        prop_assert_eq!(numbers, (1..=path.len()).collect::<Vec<_>>());
        prop_assert_eq!(instructions[0].limb, Limb::LeftHand);
        if instructions.len() > 1 {
            prop_assert_eq!(instructions[1].limb, Limb::RightHand);
        }
    }

    /// Property: a placed limb never moves while another limb is off the wall
    #[test]
    fn prop_unoccupied_limbs_first(holds in hold_set_strategy()) {
        let path: Vec<HoldId> = holds.iter().map(|h| h.id).collect();
        let steps = assign_limbs(&path, &holds);
        for pair in steps.windows(2).skip(1) {
            let before = &pair[0].body;
            let chosen = pair[1].limb;
            if before.unoccupied().next().is_some() {
                prop_assert!(!before.is_occupied(chosen));
            }
        }
    }
}
