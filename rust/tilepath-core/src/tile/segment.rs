//! Cached path between two waypoints.
//!
//! A segment builds its [`TilePath`] lazily and keeps it until told
//! otherwise. Movement of an endpoint arrives as an explicit
//! [`WaypointMoved`] message from whoever owns the waypoints; there is no
//! subscription to tear down.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::handler::TileHandler;
use super::path::TilePath;
use super::provider::MultiFloorPathSearcherProvider;
use super::searcher::TilePathSearcher;
use crate::models::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Point,
    pub floor: i32,
}

impl Waypoint {
    pub const fn new(x: i32, y: i32, floor: i32) -> Self {
        Self { position: Point::new(x, y), floor }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentEnd {
    #[default]
    From,
    To,
}

/// Notification that one endpoint of a segment changed position or floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WaypointMoved {
    pub end: SegmentEnd,
    pub waypoint: Waypoint,
}

/// What a build service needs to know about a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathRequest {
    pub from: Point,
    pub to: Point,
    pub floor: i32,
}

pub trait TilePathBuildService {
    fn build_tile_path(&self, request: &PathRequest) -> TilePath;
}

/// Routes requests through a [`MultiFloorPathSearcherProvider`] for a fixed
/// traveler and tile handler. An unknown floor yields a not-found path.
pub struct FloorPathService<C, H> {
    provider: Rc<MultiFloorPathSearcherProvider>,
    handler: H,
    traveler: C,
}

impl<C, H: TileHandler<C>> FloorPathService<C, H> {
    pub fn new(provider: Rc<MultiFloorPathSearcherProvider>, handler: H, traveler: C) -> Self {
        Self { provider, handler, traveler }
    }

    pub fn provider(&self) -> &Rc<MultiFloorPathSearcherProvider> {
        &self.provider
    }
}

impl<C, H: TileHandler<C>> TilePathBuildService for FloorPathService<C, H> {
    fn build_tile_path(&self, request: &PathRequest) -> TilePath {
        match self.provider.get_tile_path_searcher(request.floor) {
            Some(searcher) => {
                searcher.find_path(request.from, request.to, &self.traveler, &self.handler)
            }
            None => {
                debug!(floor = request.floor, "no searcher for floor");
                TilePath::not_found(request.floor)
            }
        }
    }
}

type BuildListener<'s> = Box<dyn FnMut(&TilePath) + 's>;

pub struct TilePathSegment<'s> {
    service: Rc<dyn TilePathBuildService + 's>,
    from: Waypoint,
    to: Waypoint,
    preferred: SegmentEnd,
    cached: Option<TilePath>,
    builds: u64,
    on_built: Option<BuildListener<'s>>,
}

impl<'s> TilePathSegment<'s> {
    pub fn new(service: Rc<dyn TilePathBuildService + 's>, from: Waypoint, to: Waypoint) -> Self {
        Self {
            service,
            from,
            to,
            preferred: SegmentEnd::From,
            cached: None,
            builds: 0,
            on_built: None,
        }
    }

    pub fn from(&self) -> Waypoint {
        self.from
    }

    pub fn to(&self) -> Waypoint {
        self.to
    }

    pub fn preferred_waypoint(&self) -> SegmentEnd {
        self.preferred
    }

    /// Choose which endpoint's floor governs the search. Takes effect on the next build.
    pub fn set_preferred_waypoint(&mut self, end: SegmentEnd) {
        self.preferred = end;
    }

    pub fn floor_number(&self) -> i32 {
        match self.preferred {
            SegmentEnd::From => self.from.floor,
            SegmentEnd::To => self.to.floor,
        }
    }

    pub fn request(&self) -> PathRequest {
        PathRequest { from: self.from.position, to: self.to.position, floor: self.floor_number() }
    }

    /// Called with every freshly built path.
    pub fn set_build_listener(&mut self, listener: impl FnMut(&TilePath) + 's) {
        self.on_built = Some(Box::new(listener));
    }

    pub fn is_tile_path_cached(&self) -> bool {
        self.cached.is_some()
    }

    pub fn cached_tile_path(&self) -> Option<&TilePath> {
        self.cached.as_ref()
    }

    /// Number of builds performed so far.
    pub fn build_count(&self) -> u64 {
        self.builds
    }

    pub fn get_tile_path(&mut self) -> &TilePath {
        self.cache_tile_path();
        let floor = self.floor_number();
        self.cached.get_or_insert_with(|| TilePath::not_found(floor))
    }

    /// Build and store the path unless one is cached; returns whether a build ran.
    pub fn cache_tile_path(&mut self) -> bool {
        if self.cached.is_some() {
            return false;
        }
        let request = self.request();
        let path = self.service.build_tile_path(&request);
        self.builds += 1;
        debug!(
            floor = request.floor,
            from = ?request.from,
            to = ?request.to,
            found = path.is_found(),
            steps = path.len(),
            "segment path built"
        );
        if let Some(listener) = self.on_built.as_mut() {
            listener(&path);
        }
        self.cached = Some(path);
        true
    }

    pub fn invalidate_cached_tile_path(&mut self) {
        self.cached = None;
    }

    /// Apply an endpoint move. A cached path is rebuilt right away; an
    /// uncached segment stays lazy.
    pub fn on_endpoint_moved(&mut self, moved: WaypointMoved) {
        match moved.end {
            SegmentEnd::From => self.from = moved.waypoint,
            SegmentEnd::To => self.to = moved.waypoint,
        }
        if self.cached.is_some() {
            self.invalidate_cached_tile_path();
            self.cache_tile_path();
        }
    }
}

impl fmt::Debug for TilePathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TilePathSegment")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("preferred", &self.preferred)
            .field("cached", &self.cached)
            .field("builds", &self.builds)
            .finish()
    }
}
