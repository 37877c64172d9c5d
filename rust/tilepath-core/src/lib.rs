//! Tile-based, multi-floor pathfinding built on a generic weighted-graph A*.
//!
//! Layering, leaf to root: [`engine::heap`] → [`graph`] → [`engine::heuristics`]
//! → [`engine::search`] → [`tile::searcher`] → [`tile::provider`] →
//! [`tile::path`] / [`tile::segment`]. [`tile::inserter`] writes tile blocks
//! into a [`tile::map::TileMap`] that the searchers read through a
//! [`tile::handler::TileHandler`].
//!
//! Everything here is single-threaded and synchronous; callers sharing a
//! provider or segment across threads must serialize access themselves.

pub mod engine;
pub mod errors;
pub mod graph;
pub mod models;
pub mod options;
pub mod tile;

pub use engine::{HeapKind, Heuristic, NeighborSource, PriorityHeap, SearchOutcome, SearchStats};
pub use errors::{GraphError, InsertError, MatrixError, ViolationKind};
pub use graph::{Graph, VertexId};
pub use models::{Point, TileIndex};
pub use options::{Movement, ProviderConfig, SearchOptions};
pub use tile::{
    Direction, MultiFloorPathSearcherProvider, TileGraphSearcher, TileHandler, TileMap,
    TileMapFloor, TileMatrix, TileMatrixMapInserter, TilePath, TilePathSearcher, TilePathSegment,
    TilePathState, Waypoint,
};
