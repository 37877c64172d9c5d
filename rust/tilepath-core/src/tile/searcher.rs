use std::cell::Cell;
use std::f64::consts::SQRT_2;

use tracing::{debug, warn};

use super::handler::TileHandler;
use super::movement::Direction;
use super::path::TilePath;
use crate::engine::search::{AStar, NeighborSource};
use crate::graph::{Graph, VertexId};
use crate::models::Point;
use crate::options::SearchOptions;

/// Finds tile paths on a single floor.
pub trait TilePathSearcher<C: ?Sized> {
    fn floor(&self) -> i32;

    /// Path from `from` to `to` for `traveler`, consulting `handler` for
    /// passability and entry costs. Never fails: out-of-bounds endpoints and
    /// unreachable targets come back as a not-found path.
    fn find_path(
        &self,
        from: Point,
        to: Point,
        traveler: &C,
        handler: &dyn TileHandler<C>,
    ) -> TilePath;
}

/// Searcher backed by a vertex-per-tile [`Graph`] of one floor.
///
/// Adjacency is not stored: edges are generated during each search from the
/// handler, so one searcher serves any traveler. The vertex set only depends
/// on the floor's dimensions, which is why a searcher must be rebuilt when
/// those change.
#[derive(Clone, Debug)]
pub struct TileGraphSearcher {
    floor: i32,
    width: i32,
    height: i32,
    options: SearchOptions,
    graph: Graph<Point, ()>,
}

impl TileGraphSearcher {
    pub fn new(floor: i32, width: i32, height: i32, options: SearchOptions) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = (width as usize).saturating_mul(height as usize);
        let mut graph = Graph::with_capacity(cells);
        for y in 0..height {
            for x in 0..width {
                graph.get_or_add_vertex(Point::new(x, y));
            }
        }
        debug!(floor, width, height, vertices = graph.vertex_count(), "built floor graph");
        Self { floor, width, height, options, graph }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Lower bound on any step the search will take.
    fn step_floor<C: ?Sized>(&self, traveler: &C, handler: &dyn TileHandler<C>) -> f64 {
        let configured = self.options.min_step_cost;
        let floor = match handler.min_entry_cost(self.floor, traveler) {
            Some(cheapest) if cheapest < configured => cheapest,
            _ => configured,
        };
        if floor.is_finite() && floor > 0.0 {
            floor
        } else {
            0.0
        }
    }
}

impl<C: ?Sized> TilePathSearcher<C> for TileGraphSearcher {
    fn floor(&self) -> i32 {
        self.floor
    }

    fn find_path(
        &self,
        from: Point,
        to: Point,
        traveler: &C,
        handler: &dyn TileHandler<C>,
    ) -> TilePath {
        let (Some(start), Some(goal)) = (self.graph.vertex_id(&from), self.graph.vertex_id(&to))
        else {
            debug!(floor = self.floor, ?from, ?to, "endpoint outside floor bounds");
            return TilePath::not_found(self.floor);
        };
        if from == to {
            return TilePath::found_start_is_target(self.floor);
        }
        if !handler.is_passable(self.floor, to, traveler) {
            debug!(floor = self.floor, ?to, "target tile impassable");
            return TilePath::not_found(self.floor);
        }

        let step_floor = self.step_floor(traveler, handler);
        let view = FloorView {
            searcher: self,
            traveler,
            handler,
            step_floor,
            raised: Cell::new(false),
        };
        let heuristic = self.options.effective_heuristic();
        let h = |a: VertexId, b: VertexId| match (self.graph.data(a), self.graph.data(b)) {
            (Some(pa), Some(pb)) => heuristic.estimate(pa, pb) * step_floor,
            _ => 0.0,
        };
        let outcome = AStar::new(&view, h)
            .with_max_expansions(self.options.max_expansions)
            .find_path(start, goal);

        match outcome.path {
            Some(ids) => {
                let steps: Vec<Point> =
                    ids.iter().filter_map(|&id| self.graph.data(id).copied()).collect();
                TilePath::found(self.floor, steps, outcome.cost)
            }
            None => {
                debug!(
                    floor = self.floor,
                    ?from,
                    ?to,
                    reason = ?outcome.reason,
                    expanded = outcome.stats.expanded,
                    "no tile path"
                );
                TilePath::not_found(self.floor)
            }
        }
    }
}

struct FloorView<'a, C: ?Sized> {
    searcher: &'a TileGraphSearcher,
    traveler: &'a C,
    handler: &'a dyn TileHandler<C>,
    step_floor: f64,
    raised: Cell<bool>,
}

impl<'a, C: ?Sized> FloorView<'a, C> {
    fn passable(&self, p: Point) -> bool {
        self.searcher.in_bounds(p)
            && self.handler.is_passable(self.searcher.floor, p, self.traveler)
    }

    /// Entry cost of `q`, raised to the step floor. `None` for unusable costs.
    fn cost(&self, q: Point) -> Option<f64> {
        let cost = self.handler.entry_cost(self.searcher.floor, q, self.traveler);
        if !cost.is_finite() || cost < 0.0 {
            return None;
        }
        if cost < self.step_floor {
            if !self.raised.replace(true) {
                warn!(
                    floor = self.searcher.floor,
                    cost,
                    step_floor = self.step_floor,
                    "entry cost below step floor, raising it"
                );
            }
            return Some(self.step_floor);
        }
        Some(cost)
    }
}

impl<'a, C: ?Sized> NeighborSource for FloorView<'a, C> {
    type Node = VertexId;

    fn neighbors(&self, node: VertexId, out: &mut Vec<(VertexId, f64)>) {
        let graph = &self.searcher.graph;
        let opts = &self.searcher.options;
        let Some(&p) = graph.data(node) else {
            return;
        };
        for &dir in Direction::moves(opts.movement) {
            let (dx, dy) = dir.delta();
            let q = p.offset(dx, dy);
            let Some(qid) = graph.vertex_id(&q) else {
                continue;
            };
            if !self.handler.is_passable(self.searcher.floor, q, self.traveler) {
                continue;
            }
            if dir.is_diagonal()
                && !opts.allow_corner_cutting
                && !(self.passable(p.offset(dx, 0)) && self.passable(p.offset(0, dy)))
            {
                continue;
            }
            let Some(cost) = self.cost(q) else {
                continue;
            };
            out.push((qid, if dir.is_diagonal() { cost * SQRT_2 } else { cost }));
        }
    }
}
