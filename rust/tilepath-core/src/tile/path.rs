use std::ops::Index;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::movement::Direction;
use crate::models::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilePathState {
    Found,
    NotFound,
}

/// Result of one tile search on one floor.
///
/// `steps` holds every tile from start to target inclusive. It is `None`
/// when the path was never searched because the start already is the target,
/// and for not-found paths. The state never changes after construction;
/// [`TilePath::reverse_path`] is the only mutation and it keeps the state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilePath {
    state: TilePathState,
    floor: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

impl TilePath {
    pub fn found(floor: i32, steps: Vec<Point>, cost: f64) -> Self {
        Self { state: TilePathState::Found, floor, steps: Some(steps), cost: Some(cost) }
    }

    pub fn found_start_is_target(floor: i32) -> Self {
        Self { state: TilePathState::Found, floor, steps: None, cost: Some(0.0) }
    }

    pub fn not_found(floor: i32) -> Self {
        Self { state: TilePathState::NotFound, floor, steps: None, cost: None }
    }

    pub fn state(&self) -> TilePathState {
        self.state
    }

    pub fn is_found(&self) -> bool {
        self.state == TilePathState::Found
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Total entry cost of the walk; `None` when not found.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn steps(&self) -> Option<&[Point]> {
        self.steps.as_deref()
    }

    pub fn len(&self) -> usize {
        self.steps.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, step: usize) -> Option<Point> {
        self.steps.as_ref().and_then(|s| s.get(step)).copied()
    }

    pub fn first(&self) -> Option<Point> {
        self.steps.as_ref().and_then(|s| s.first()).copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.steps.as_ref().and_then(|s| s.last()).copied()
    }

    pub fn index_of(&self, tile: Point) -> Option<usize> {
        self.steps.as_ref().and_then(|s| s.iter().position(|&p| p == tile))
    }

    pub fn contains(&self, tile: Point) -> bool {
        self.index_of(tile).is_some()
    }

    /// Direction from step `step` to step `step + 1`; `None` past the last step.
    pub fn dir_to_next(&self, step: usize) -> Direction {
        match (self.get(step), step.checked_add(1).and_then(|n| self.get(n))) {
            (Some(a), Some(b)) => Direction::from_delta(b.x - a.x, b.y - a.y),
            _ => Direction::None,
        }
    }

    /// Direction onward from `tile`, located by its first occurrence in the path.
    pub fn dir_to_next_from(&self, tile: Point) -> Direction {
        self.index_of(tile).map(|i| self.dir_to_next(i)).unwrap_or(Direction::None)
    }

    /// Direction of every step in order; `len() - 1` items.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps
            .iter()
            .flatten()
            .tuple_windows()
            .map(|(a, b)| Direction::from_delta(b.x - a.x, b.y - a.y))
    }

    /// Reverse step order in place so a cached path can be walked backward.
    pub fn reverse_path(&mut self) {
        if let Some(steps) = self.steps.as_mut() {
            steps.reverse();
        }
    }
}

impl Index<usize> for TilePath {
    type Output = Point;

    fn index(&self, step: usize) -> &Point {
        match self.steps.as_ref() {
            Some(steps) => &steps[step],
            None => panic!("tile path has no steps (index {step})"),
        }
    }
}
