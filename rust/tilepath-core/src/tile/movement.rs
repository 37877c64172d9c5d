//! Compass directions between adjacent tiles.
//!
//! Tile rows grow downward: north is `dy = -1`, east is `dx = +1`.

use serde::{Deserialize, Serialize};

use crate::options::Movement;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

// Deterministic expansion order: cardinals first, then diagonals.
pub const CARDINALS: [Direction; 4] =
    [Direction::North, Direction::South, Direction::East, Direction::West];
pub const ALL_MOVES: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

impl Direction {
    /// Direction given by the signs of a step delta; `None` for no movement.
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, 0) => Direction::None,
            (0, -1) => Direction::North,
            (1, -1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (0, 1) => Direction::South,
            (-1, 1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            _ => Direction::NorthWest,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    pub fn opposite(self) -> Self {
        let (dx, dy) = self.delta();
        Self::from_delta(-dx, -dy)
    }

    /// Steps a searcher may take under the given adjacency.
    pub fn moves(movement: Movement) -> &'static [Direction] {
        match movement {
            Movement::FourWay => &CARDINALS,
            Movement::EightWay => &ALL_MOVES,
        }
    }
}
