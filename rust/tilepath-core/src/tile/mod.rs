pub mod handler;
pub mod inserter;
pub mod map;
pub mod movement;
pub mod path;
pub mod provider;
pub mod searcher;
pub mod segment;

pub use handler::{TileHandler, TileMapTileHandler};
pub use inserter::TileMatrixMapInserter;
pub use map::{TileMap, TileMapFloor, TileMatrix};
pub use movement::Direction;
pub use path::{TilePath, TilePathState};
pub use provider::MultiFloorPathSearcherProvider;
pub use searcher::{TileGraphSearcher, TilePathSearcher};
pub use segment::{
    FloorPathService, PathRequest, SegmentEnd, TilePathBuildService, TilePathSegment, Waypoint,
    WaypointMoved,
};
