use rustc_hash::FxHashMap;

use super::map::TileMap;
use crate::models::{Point, TileIndex};

/// Traversal oracle consulted while generating tile edges.
///
/// `C` is whatever describes the traveler (size, abilities, faction...);
/// both answers may depend on it.
pub trait TileHandler<C: ?Sized> {
    fn is_passable(&self, floor: i32, tile: Point, traveler: &C) -> bool;

    /// Cost of stepping onto `tile`. Only asked for passable tiles. Costs
    /// below the searcher's step-cost floor are raised to it.
    fn entry_cost(&self, floor: i32, tile: Point, traveler: &C) -> f64;

    /// Lowest entry cost this handler can report on `floor`, when known.
    /// The searcher lowers its step-cost floor to it so the heuristic stays
    /// admissible for cheap tiles.
    fn min_entry_cost(&self, _floor: i32, _traveler: &C) -> Option<f64> {
        None
    }
}

impl<C: ?Sized, T: TileHandler<C> + ?Sized> TileHandler<C> for &T {
    fn is_passable(&self, floor: i32, tile: Point, traveler: &C) -> bool {
        (**self).is_passable(floor, tile, traveler)
    }

    fn entry_cost(&self, floor: i32, tile: Point, traveler: &C) -> f64 {
        (**self).entry_cost(floor, tile, traveler)
    }

    fn min_entry_cost(&self, floor: i32, traveler: &C) -> Option<f64> {
        (**self).min_entry_cost(floor, traveler)
    }
}

/// Reads tile indices straight from a [`TileMap`] and prices them from a table.
/// Indices with no entry fall back to `default_cost`; `None` means impassable.
pub struct TileMapTileHandler<'a> {
    map: &'a TileMap,
    costs: FxHashMap<TileIndex, Option<f64>>,
    default_cost: Option<f64>,
}

impl<'a> TileMapTileHandler<'a> {
    pub fn new(map: &'a TileMap) -> Self {
        Self { map, costs: FxHashMap::default(), default_cost: Some(1.0) }
    }

    pub fn with_cost(mut self, tile: TileIndex, cost: f64) -> Self {
        self.costs.insert(tile, Some(cost));
        self
    }

    pub fn with_blocked(mut self, tile: TileIndex) -> Self {
        self.costs.insert(tile, None);
        self
    }

    pub fn with_default_cost(mut self, cost: Option<f64>) -> Self {
        self.default_cost = cost;
        self
    }

    fn cost_of(&self, floor: i32, tile: Point) -> Option<f64> {
        let index = self.map.tile_at(floor, tile)?;
        match self.costs.get(&index) {
            Some(c) => *c,
            None => self.default_cost,
        }
    }
}

impl<'a, C: ?Sized> TileHandler<C> for TileMapTileHandler<'a> {
    fn is_passable(&self, floor: i32, tile: Point, _traveler: &C) -> bool {
        self.cost_of(floor, tile).is_some()
    }

    fn entry_cost(&self, floor: i32, tile: Point, _traveler: &C) -> f64 {
        self.cost_of(floor, tile).unwrap_or(f64::INFINITY)
    }

    fn min_entry_cost(&self, _floor: i32, _traveler: &C) -> Option<f64> {
        self.costs
            .values()
            .chain(std::iter::once(&self.default_cost))
            .flatten()
            .copied()
            .filter(|c| c.is_finite())
            .reduce(f64::min)
    }
}
