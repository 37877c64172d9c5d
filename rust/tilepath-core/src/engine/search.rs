use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::heap::{HeapKind, PriorityHeap};
use super::heuristics::Heuristic;
use crate::errors::GraphError;
use crate::graph::{Graph, VertexId};
use crate::models::Positioned;

/// Anything A* can expand: a node type and its weighted successors.
pub trait NeighborSource {
    type Node: Copy + Eq + Hash;

    /// Append `(successor, weight)` pairs of `node` to `out`. Weights must be
    /// finite and non-negative. The caller clears `out` before each call.
    fn neighbors(&self, node: Self::Node, out: &mut Vec<(Self::Node, f64)>);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Frontier drained without reaching the target.
    Exhausted,
    /// Expansion budget ran out first.
    ExpansionLimit,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: u64,
    pub pushed: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<N> {
    /// Source to target inclusive; `None` when not found.
    pub path: Option<Vec<N>>,
    pub cost: f64,
    pub reason: Option<NotFoundReason>,
    pub stats: SearchStats,
}

impl<N> SearchOutcome<N> {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    fn not_found(reason: NotFoundReason, stats: SearchStats) -> Self {
        Self { path: None, cost: f64::INFINITY, reason: Some(reason), stats }
    }
}

#[derive(Copy, Clone, Debug)]
struct Frontier<N> {
    f: f64,
    h: f64,
    g: f64,
    node: N,
}

// Ordered on (f, h) only; the heap's insertion sequence settles remaining ties.
impl<N> PartialEq for Frontier<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Frontier<N> {}

impl<N> PartialOrd for Frontier<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Frontier<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then_with(|| self.h.total_cmp(&other.h))
    }
}

pub struct AStar<'a, S, H>
where
    S: NeighborSource,
    H: Fn(S::Node, S::Node) -> f64,
{
    source: &'a S,
    heuristic: H,
    max_expansions: u64,
}

impl<'a, S, H> AStar<'a, S, H>
where
    S: NeighborSource,
    H: Fn(S::Node, S::Node) -> f64,
{
    pub fn new(source: &'a S, heuristic: H) -> Self {
        Self { source, heuristic, max_expansions: u64::MAX }
    }

    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn find_path(&self, start: S::Node, goal: S::Node) -> SearchOutcome<S::Node> {
        let mut stats = SearchStats::default();
        if start == goal {
            return SearchOutcome { path: Some(vec![start]), cost: 0.0, reason: None, stats };
        }

        let mut open = PriorityHeap::new(HeapKind::Min);
        let mut g_score: FxHashMap<S::Node, f64> = FxHashMap::default();
        let mut came_from: FxHashMap<S::Node, S::Node> = FxHashMap::default();
        let mut buf: Vec<(S::Node, f64)> = Vec::with_capacity(8);

        let h0 = (self.heuristic)(start, goal);
        g_score.insert(start, 0.0);
        open.insert(Frontier { f: h0, h: h0, g: 0.0, node: start });
        stats.pushed += 1;

        while let Some(cur) = open.extract_top() {
            // Discard stale
            if g_score.get(&cur.node).map(|&best| cur.g > best).unwrap_or(false) {
                continue;
            }
            if cur.node == goal {
                let path = reconstruct(&came_from, start, goal);
                debug!(
                    expanded = stats.expanded,
                    pushed = stats.pushed,
                    cost = cur.g,
                    steps = path.len(),
                    "path found"
                );
                return SearchOutcome { path: Some(path), cost: cur.g, reason: None, stats };
            }
            if stats.expanded >= self.max_expansions {
                warn!(
                    max_expansions = self.max_expansions,
                    pushed = stats.pushed,
                    "expansion budget exhausted"
                );
                return SearchOutcome::not_found(NotFoundReason::ExpansionLimit, stats);
            }
            stats.expanded += 1;

            buf.clear();
            self.source.neighbors(cur.node, &mut buf);
            for &(next, weight) in buf.iter() {
                debug_assert!(weight.is_finite() && weight >= 0.0, "edge weight {weight}");
                let tentative_g = cur.g + weight;
                let improves = g_score.get(&next).map(|&best| tentative_g < best).unwrap_or(true);
                if improves {
                    g_score.insert(next, tentative_g);
                    came_from.insert(next, cur.node);
                    let h = (self.heuristic)(next, goal);
                    open.insert(Frontier { f: tentative_g + h, h, g: tentative_g, node: next });
                    stats.pushed += 1;
                }
            }
        }

        debug!(expanded = stats.expanded, pushed = stats.pushed, "frontier exhausted");
        SearchOutcome::not_found(NotFoundReason::Exhausted, stats)
    }
}

fn reconstruct<N: Copy + Eq + Hash>(came_from: &FxHashMap<N, N>, start: N, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        match came_from.get(&cur) {
            Some(&prev) => {
                path.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// A* over a positioned [`Graph`] with one of the library heuristics.
///
/// Both handles must belong to `graph`. An unreachable target is a normal
/// not-found outcome, never an error.
pub fn search_graph<V, E>(
    graph: &Graph<V, E>,
    source: VertexId,
    target: VertexId,
    heuristic: Heuristic,
    max_expansions: u64,
) -> Result<SearchOutcome<VertexId>, GraphError>
where
    V: Positioned + Eq + Hash + Clone,
{
    let goal_data = graph.data(target).ok_or(GraphError::MissingVertex(target))?;
    graph.data(source).ok_or(GraphError::MissingVertex(source))?;
    let h = |n: VertexId, _goal: VertexId| {
        graph.data(n).map(|d| heuristic.estimate(d, goal_data)).unwrap_or(0.0)
    };
    Ok(AStar::new(graph, h).with_max_expansions(max_expansions).find_path(source, target))
}
