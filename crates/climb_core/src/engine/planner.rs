//! Route Planner
//!
//! Cheapest path from the start band (bottom of the wall) to the finish band
//! (top of the wall) of a [`MovementGraph`].
//!
//! ## Candidate bands
//! With `span = bottom - top` over every node:
//! - low set: `y >= bottom - band * span`
//! - high set: `y <= top + band * span`
//!
//! ## Search
//! Every `(s, t)` pair with `s` low and `t` high gets its own Dijkstra run
//! over exact `f64` edge weights ([`PathCost`]). The cheapest path over all
//! pairs wins.
//!
//! ## Tie-break
//! Pairs are enumerated low-major, each set in HoldSet order. A later pair
//! only replaces the current best when strictly cheaper, so among equal-cost
//! routes the earliest pair wins.

use pathfinding::directed::dijkstra::dijkstra;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::graph::{MovementGraph, PathCost};
use crate::models::HoldId;

/// Default start/finish band width as a fraction of the vertical range.
pub const DEFAULT_CANDIDATE_BAND: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// A path of two or more holds connects the bands
    Found,
    /// The graph holds a single node; the route is that hold at zero cost
    SingleHold,
    /// No low/high pair is connected
    NoPathFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlannedRoute {
    pub path: Vec<HoldId>,
    pub cost: f64,
    pub status: RouteStatus,
    pub low_candidates: Vec<HoldId>,
    pub high_candidates: Vec<HoldId>,
}

impl PlannedRoute {
    pub fn found(&self) -> bool {
        self.status != RouteStatus::NoPathFound
    }
}

/// Node indices of the low and high candidate sets, each in node order.
pub fn candidate_sets(graph: &MovementGraph, band: f64) -> (Vec<usize>, Vec<usize>) {
    let Some((top, bottom)) = graph.vertical_range() else {
        return (Vec::new(), Vec::new());
    };
    let span = bottom - top;
    let low_limit = bottom - band * span;
    let high_limit = top + band * span;

    let low = (0..graph.node_count()).filter(|&i| graph.node(i).y >= low_limit).collect();
    let high = (0..graph.node_count()).filter(|&i| graph.node(i).y <= high_limit).collect();
    (low, high)
}

/// Plan with the default candidate band.
pub fn plan_route(graph: &MovementGraph) -> PlannedRoute {
    plan_route_with_band(graph, DEFAULT_CANDIDATE_BAND)
}

pub fn plan_route_with_band(graph: &MovementGraph, band: f64) -> PlannedRoute {
    let (low, high) = candidate_sets(graph, band);
    let ids = |set: &[usize]| set.iter().map(|&i| graph.node(i).id).collect::<Vec<_>>();
    let low_candidates = ids(&low);
    let high_candidates = ids(&high);

    debug!(
        low = low_candidates.len(),
        high = high_candidates.len(),
        "route candidates selected"
    );

    if graph.node_count() == 1 {
        return PlannedRoute {
            path: vec![graph.node(0).id],
            cost: 0.0,
            status: RouteStatus::SingleHold,
            low_candidates,
            high_candidates,
        };
    }

    let mut best: Option<(Vec<usize>, f64)> = None;
    for &s in &low {
        for &t in &high {
            // Edges only climb, so t must sit strictly above s.
            if s == t || graph.node(t).y >= graph.node(s).y {
                continue;
            }

            let Some((path, PathCost(cost))) = dijkstra(
                &s,
                |&i| graph.successors(i).iter().map(|e| (e.to, e.cost())),
                |&i| i == t,
            ) else {
                continue;
            };

            if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
                best = Some((path, cost));
            }
        }
    }

    match best {
        Some((path, cost)) => {
            let path: Vec<HoldId> = path.into_iter().map(|i| graph.node(i).id).collect();
            info!(holds = path.len(), cost, "route found");
            PlannedRoute {
                path,
                cost,
                status: RouteStatus::Found,
                low_candidates,
                high_candidates,
            }
        }
        None => {
            info!(
                low = low_candidates.len(),
                high = high_candidates.len(),
                "no path between candidate bands"
            );
            PlannedRoute {
                path: Vec::new(),
                cost: 0.0,
                status: RouteStatus::NoPathFound,
                low_candidates,
                high_candidates,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::graph::{build_graph, move_cost};
    use crate::models::{Hold, HoldSet};

    fn graph_of(points: &[(HoldId, f64, f64)], weight: f64) -> (HoldSet, MovementGraph) {
        let set =
            HoldSet::from_holds(points.iter().map(|&(id, x, y)| Hold::new(id, x, y)).collect())
                .expect("valid holds");
        let graph = build_graph(&set, weight).expect("graph");
        (set, graph)
    }

    /// Every simple path between the bands, with its cost.
    fn all_band_paths(graph: &MovementGraph) -> Vec<(Vec<HoldId>, f64)> {
        fn walk(
            graph: &MovementGraph,
            at: usize,
            targets: &[usize],
            trail: &mut Vec<usize>,
            out: &mut Vec<(Vec<HoldId>, f64)>,
        ) {
            if trail.len() > 1 && targets.contains(&at) {
                let ids = trail.iter().map(|&i| graph.node(i).id).collect();
                out.push((ids, graph.index_path_cost(trail)));
            }
            for edge in graph.successors(at) {
                trail.push(edge.to);
                walk(graph, edge.to, targets, trail, out);
                trail.pop();
            }
        }

        let (low, high) = candidate_sets(graph, DEFAULT_CANDIDATE_BAND);
        let mut out = Vec::new();
        for &s in &low {
            let mut trail = vec![s];
            walk(graph, s, &high, &mut trail, &mut out);
        }
        out
    }

    #[test]
    fn test_four_hold_scenario_matches_hand_computed_minimum() {
        let (set, graph) = graph_of(
            &[(1, 450.0, 1050.0), (2, 400.0, 900.0), (3, 500.0, 850.0), (4, 425.0, 750.0)],
            1.2,
        );
        let route = plan_route(&graph);
        assert_eq!(route.status, RouteStatus::Found);

        // Bands: span 300, low y >= 990 -> {1}, high y <= 810 -> {4}.
        assert_eq!(route.low_candidates, vec![1]);
        assert_eq!(route.high_candidates, vec![4]);

        // 1->4 direct: 300 + 1.2*25 = 330
        // 1->2->4:     (150 + 60) + (150 + 30) = 390
        // 1->3->4:     (200 + 60) + (100 + 90) = 450
        // 1->2->3->4:  210 + (50 + 120) + 190 = 570
        let cost = |ids: &[HoldId]| -> f64 {
            ids.windows(2)
                .map(|p| {
                    move_cost(set.get(p[0]).expect("hold"), set.get(p[1]).expect("hold"), 1.2)
                })
                .sum()
        };
        let candidates: [&[HoldId]; 4] = [&[1, 4], &[1, 2, 4], &[1, 3, 4], &[1, 2, 3, 4]];
        let expected = candidates
            .iter()
            .min_by(|a, b| cost(a).total_cmp(&cost(b)))
            .expect("non-empty");

        assert_eq!(route.path, expected.to_vec());
        assert_eq!(route.path, vec![1, 4]);
        assert!((route.cost - 330.0).abs() < 1e-9);
        assert!((cost(&[1, 2, 3, 4]) - 570.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_is_minimal_over_all_simple_paths() {
        let (_, graph) = graph_of(
            &[
                (0, 275.0, 1050.0),
                (1, 450.0, 1050.0),
                (2, 400.0, 900.0),
                (3, 500.0, 850.0),
                (4, 425.0, 750.0),
                (5, 475.0, 650.0),
                (6, 375.0, 600.0),
                (7, 450.0, 500.0),
                (8, 540.0, 450.0),
                (9, 475.0, 350.0),
                (10, 400.0, 200.0),
            ],
            1.2,
        );
        let route = plan_route(&graph);
        assert!(route.found());
        for (path, cost) in all_band_paths(&graph) {
            assert!(route.cost <= cost + 1e-9, "{:?} costs {} < {}", path, cost, route.cost);
        }
        assert_eq!(graph.path_cost(&route.path).map(|c| (c - route.cost).abs() < 1e-9), Some(true));
    }

    #[test]
    fn test_consecutive_holds_are_edges() {
        let (_, graph) = graph_of(
            &[(0, 0.0, 1000.0), (1, 300.0, 800.0), (2, 100.0, 600.0), (3, 0.0, 0.0)],
            3.0,
        );
        let route = plan_route(&graph);
        assert!(route.found());
        for pair in route.path.windows(2) {
            assert!(graph.has_edge(pair[0], pair[1]));
        }
    }

    #[test]
    fn test_same_height_pair_has_no_path() {
        let (_, graph) = graph_of(&[(1, 100.0, 500.0), (2, 300.0, 500.0)], 1.2);
        let route = plan_route(&graph);
        assert_eq!(route.status, RouteStatus::NoPathFound);
        assert!(!route.found());
        assert!(route.path.is_empty());
        // Zero span puts both holds in both bands.
        assert_eq!(route.low_candidates, vec![1, 2]);
        assert_eq!(route.high_candidates, vec![1, 2]);
    }

    #[test]
    fn test_single_hold_is_trivial_route() {
        let (_, graph) = graph_of(&[(7, 10.0, 10.0)], 1.2);
        let route = plan_route(&graph);
        assert_eq!(route.status, RouteStatus::SingleHold);
        assert!(route.found());
        assert_eq!(route.path.len(), 1);
        assert_eq!(route.path, vec![7]);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_empty_graph_has_no_path() {
        let (_, graph) = graph_of(&[], 1.2);
        let route = plan_route(&graph);
        assert_eq!(route.status, RouteStatus::NoPathFound);
        assert!(route.low_candidates.is_empty());
        assert!(route.high_candidates.is_empty());
    }

    #[test]
    fn test_equal_cost_routes_break_to_earliest_pair() {
        // Mirror-image starts: 0 and 1 reach 2 at the same cost.
        let (_, graph) = graph_of(&[(0, 0.0, 100.0), (1, 200.0, 100.0), (2, 100.0, 0.0)], 1.0);
        let route = plan_route(&graph);
        assert_eq!(route.path, vec![0, 2]);

        let (_, graph) = graph_of(&[(1, 200.0, 100.0), (0, 0.0, 100.0), (2, 100.0, 0.0)], 1.0);
        let route = plan_route(&graph);
        assert_eq!(route.path, vec![1, 2]);
    }

    #[test]
    fn test_huge_coordinates_plan_without_overflow() {
        let (_, graph) = graph_of(&[(0, 0.0, 1e13), (1, 0.0, 5e12), (2, 0.0, 0.0)], 1.2);
        let route = plan_route(&graph);
        assert_eq!(route.status, RouteStatus::Found);
        assert_eq!(route.path.first(), Some(&0));
        assert_eq!(route.path.last(), Some(&2));
        assert_eq!(route.cost, 1e13);
    }

    #[test]
    fn test_sub_micro_pixel_differences_are_respected() {
        // Via hold 1 costs 2e-7 more than the direct move.
        let (_, graph) = graph_of(
            &[(0, 0.0, 100.0), (1, 1e-7, 50.0), (2, 0.0, 0.0)],
            1.0,
        );
        let route = plan_route(&graph);
        assert_eq!(route.path, vec![0, 2]);
        assert_eq!(route.cost, 100.0);
    }

    #[test]
    fn test_wider_band_widens_candidates() {
        let (_, graph) = graph_of(
            &[(0, 0.0, 1000.0), (1, 0.0, 700.0), (2, 0.0, 300.0), (3, 0.0, 0.0)],
            1.2,
        );
        let (low, high) = candidate_sets(&graph, 0.2);
        assert_eq!((low.len(), high.len()), (1, 1));
        let (low, high) = candidate_sets(&graph, 0.5);
        assert_eq!((low.len(), high.len()), (2, 2));
    }

    #[test]
    fn test_lateral_penalty_changes_route() {
        // Straight up via a far-right hold vs a zig-zag through a centre hold.
        let points = [(0, 0.0, 1000.0), (1, 0.0, 500.0), (2, 400.0, 450.0), (3, 0.0, 0.0)];
        let (_, cheap_lateral) = graph_of(&points, 0.0);
        let (_, costly_lateral) = graph_of(&points, 5.0);
        let a = plan_route(&cheap_lateral);
        let b = plan_route(&costly_lateral);
        assert!(a.found() && b.found());
        assert!(b.path.iter().all(|&id| id != 2));
        assert!(a.cost <= b.cost);
    }
}
