//! Movement Graph
//!
//! Directed graph of feasible upward moves between holds.
//!
//! - one node per hold, in HoldSet order
//! - an edge `src → dst` exists iff `dst` is strictly higher (smaller `y`)
//! - weight = `|Δy| + horizontal_weight · |Δx|`
//!
//! The result is a DAG layered by height. It is rebuilt from scratch for every
//! HoldSet and never mutated afterwards.

use std::cmp::Ordering;
use std::ops::Add;

use fxhash::FxHashMap;
use pathfinding::num_traits::Zero;
use serde::Serialize;
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{Hold, HoldId, HoldSet};

/// Path cost in pixels, totally ordered for the shortest-path search.
///
/// Weights are finite and non-negative, so sums only grow; a sum too large
/// for `f64` saturates to infinity and still compares above every finite cost.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PathCost(pub f64);

impl PartialEq for PathCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathCost {}

impl PartialOrd for PathCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for PathCost {
    type Output = PathCost;

    fn add(self, rhs: PathCost) -> PathCost {
        PathCost(self.0 + rhs.0)
    }
}

impl Zero for PathCost {
    fn zero() -> Self {
        PathCost(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: HoldId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    /// Target node index
    pub to: usize,
    pub weight: f64,
}

impl Edge {
    #[inline]
    pub fn cost(&self) -> PathCost {
        PathCost(self.weight)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovementGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<Vec<Edge>>,
    #[serde(skip)]
    index: FxHashMap<HoldId, usize>,
    horizontal_weight: f64,
}

/// Cost of moving from `src` to `dst`, regardless of direction.
#[inline]
pub fn move_cost(src: &Hold, dst: &Hold, horizontal_weight: f64) -> f64 {
    (dst.y - src.y).abs() + horizontal_weight * (dst.x - src.x).abs()
}

/// Build the movement graph for `holds`.
///
/// Fails only if `horizontal_weight` is negative or not finite, which would
/// break the non-negative weight requirement of Dijkstra.
pub fn build_graph(holds: &HoldSet, horizontal_weight: f64) -> Result<MovementGraph> {
    if !horizontal_weight.is_finite() || horizontal_weight < 0.0 {
        return Err(PlanError::InvalidConfig(format!(
            "horizontal weight must be finite and >= 0, got {}",
            horizontal_weight
        )));
    }

    let nodes: Vec<GraphNode> =
        holds.iter().map(|h| GraphNode { id: h.id, x: h.x, y: h.y }).collect();
    let index = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

    let edges: Vec<Vec<Edge>> = holds
        .iter()
        .map(|src| {
            holds
                .iter()
                .enumerate()
                .filter(|(_, dst)| dst.is_above(src))
                .map(|(to, dst)| Edge { to, weight: move_cost(src, dst, horizontal_weight) })
                .collect()
        })
        .collect();

    let graph = MovementGraph { nodes, edges, index, horizontal_weight };
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        horizontal_weight,
        "movement graph built"
    );
    Ok(graph)
}

impl MovementGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn horizontal_weight(&self) -> f64 {
        self.horizontal_weight
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &GraphNode {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: HoldId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Out-edges of node `idx`, in ascending target order.
    pub fn successors(&self, idx: usize) -> &[Edge] {
        &self.edges[idx]
    }

    pub fn edge_weight(&self, src: HoldId, dst: HoldId) -> Option<f64> {
        let from = self.index_of(src)?;
        let to = self.index_of(dst)?;
        self.edges[from].iter().find(|e| e.to == to).map(|e| e.weight)
    }

    pub fn has_edge(&self, src: HoldId, dst: HoldId) -> bool {
        self.edge_weight(src, dst).is_some()
    }

    /// Total weight of a path given as hold ids; `None` if any step is not an
    /// edge. A one-hold path costs zero.
    pub fn path_cost(&self, path: &[HoldId]) -> Option<f64> {
        if let [only] = path {
            return self.index_of(*only).map(|_| 0.0);
        }
        path.windows(2).map(|pair| self.edge_weight(pair[0], pair[1])).sum()
    }

    /// `(top_y, bottom_y)` over all nodes.
    pub fn vertical_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.nodes.iter();
        let first = iter.next()?;
        Some(iter.fold((first.y, first.y), |(top, bottom), n| (top.min(n.y), bottom.max(n.y))))
    }

    #[cfg(test)]
    pub(crate) fn index_path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .map(|pair| {
                self.edges[pair[0]]
                    .iter()
                    .find(|e| e.to == pair[1])
                    .map_or(f64::INFINITY, |e| e.weight)
            })
            .sum()
    }
}
