use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::errors::GraphError;
use crate::graph::{Graph, VertexId};
use crate::models::Positioned;

#[inline]
fn deltas<P: Positioned + ?Sized>(a: &P, b: &P) -> (f64, f64) {
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    ((ax - bx).abs(), (ay - by).abs())
}

pub fn euclidean<P: Positioned + ?Sized>(a: &P, b: &P) -> f64 {
    let (dx, dy) = deltas(a, b);
    (dx * dx + dy * dy).sqrt()
}

/// Cheaper monotonic surrogate of [`euclidean`]. Only admissible against
/// squared edge costs; linear step costs make it overestimate.
pub fn squared_euclidean<P: Positioned + ?Sized>(a: &P, b: &P) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx * dx + dy * dy
}

pub fn manhattan<P: Positioned + ?Sized>(a: &P, b: &P) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx + dy
}

/// Largest single-axis distance (Chebyshev).
pub fn chebyshev<P: Positioned + ?Sized>(a: &P, b: &P) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.max(dy)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Always zero; turns A* into Dijkstra.
    Zero,
    Euclidean,
    SquaredEuclidean,
    Manhattan,
    Chebyshev,
}

impl Heuristic {
    pub fn estimate<P: Positioned + ?Sized>(self, a: &P, b: &P) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Euclidean => euclidean(a, b),
            Heuristic::SquaredEuclidean => squared_euclidean(a, b),
            Heuristic::Manhattan => manhattan(a, b),
            Heuristic::Chebyshev => chebyshev(a, b),
        }
    }

    /// Estimate between two graph vertices. Fails on a handle the graph does not hold.
    pub fn between<V, E>(
        self,
        graph: &Graph<V, E>,
        a: VertexId,
        b: VertexId,
    ) -> Result<f64, GraphError>
    where
        V: Positioned + Eq + Hash + Clone,
    {
        let va = graph.data(a).ok_or(GraphError::MissingVertex(a))?;
        let vb = graph.data(b).ok_or(GraphError::MissingVertex(b))?;
        Ok(self.estimate(va, vb))
    }

    /// Whether the estimate never exceeds the cost of a path made of unit
    /// steps under the given adjacency (diagonals costing √2).
    pub fn admissible_for(self, diagonal_moves: bool) -> bool {
        match self {
            Heuristic::Zero | Heuristic::Euclidean | Heuristic::Chebyshev => true,
            Heuristic::Manhattan => !diagonal_moves,
            Heuristic::SquaredEuclidean => false,
        }
    }
}
