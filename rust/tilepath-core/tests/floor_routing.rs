use std::rc::Rc;

use tilepath_core::tile::{FloorPathService, SegmentEnd, TileMapTileHandler, WaypointMoved};
use tilepath_core::{
    Direction, MultiFloorPathSearcherProvider, Point, ProviderConfig, SearchOptions, TileHandler,
    TileMap, TileMatrix, TileMatrixMapInserter, TilePath, TilePathSearcher, TilePathSegment,
    TilePathState, Waypoint,
};

const GRASS: u16 = 0;
const WALL: u16 = 1;
const WATER: u16 = 2;

struct Traveler {
    can_swim: bool,
}

/// Walls block everyone; water only lets swimmers through, slowly.
struct Terrain<'a> {
    map: &'a TileMap,
}

impl TileHandler<Traveler> for Terrain<'_> {
    fn is_passable(&self, floor: i32, tile: Point, traveler: &Traveler) -> bool {
        match self.map.tile_at(floor, tile) {
            Some(GRASS) => true,
            Some(WATER) => traveler.can_swim,
            _ => false,
        }
    }

    fn entry_cost(&self, floor: i32, tile: Point, _traveler: &Traveler) -> f64 {
        match self.map.tile_at(floor, tile) {
            Some(WATER) => 4.0,
            _ => 1.0,
        }
    }
}

/// 10x8, two floors. Floor 0 has a river down column 5.
fn river_map() -> TileMap {
    let mut map = TileMap::with_floors(10, 8, 2, GRASS);
    let river = TileMatrix::filled(1, 8, WATER);
    TileMatrixMapInserter::new(0).insert_at(Point::new(5, 0), &river, &mut map).unwrap();
    map
}

fn provider(map: &TileMap, options: SearchOptions) -> MultiFloorPathSearcherProvider {
    MultiFloorPathSearcherProvider::from_map(map, options, ProviderConfig::default())
}

#[test]
fn traveler_context_decides_river_crossing() {
    let map = river_map();
    let p = provider(&map, SearchOptions::four_way());
    let searcher = p.get_tile_path_searcher(0).unwrap();
    let terrain = Terrain { map: &map };

    let (from, to) = (Point::new(0, 3), Point::new(9, 3));
    let walker = searcher.find_path(from, to, &Traveler { can_swim: false }, &terrain);
    assert_eq!(walker.state(), TilePathState::NotFound);

    let swimmer = searcher.find_path(from, to, &Traveler { can_swim: true }, &terrain);
    assert!(swimmer.is_found());
    assert_eq!(swimmer.len(), 10);
    // Nine steps, one of them into water
    assert_eq!(swimmer.cost(), Some(8.0 + 4.0));
    assert!(swimmer.directions().all(|d| d == Direction::East));
}

#[test]
fn searcher_routes_around_inserted_wall() {
    let mut map = TileMap::with_floors(7, 5, 1, GRASS);
    let p = provider(&map, SearchOptions::four_way());
    let before = p.get_tile_path_searcher(0).unwrap();
    {
        let handler = TileMapTileHandler::new(&map).with_blocked(WALL);
        let direct = before.find_path(Point::new(0, 2), Point::new(6, 2), &(), &handler);
        assert_eq!(direct.len(), 7);
    }

    // Wall across rows 0..4 of column 3, leaving row 4 open
    let wall = TileMatrix::filled(1, 4, WALL);
    TileMatrixMapInserter::new(0).insert_at(Point::new(3, 0), &wall, &mut map).unwrap();
    assert!(p.invalidate_floor(0));

    let after = p.get_tile_path_searcher(0).unwrap();
    assert!(!Rc::ptr_eq(&before, &after));
    let handler = TileMapTileHandler::new(&map).with_blocked(WALL);
    let detour = after.find_path(Point::new(0, 2), Point::new(6, 2), &(), &handler);
    assert!(detour.is_found());
    assert!(detour.contains(Point::new(3, 4)));
    assert_eq!(detour.cost(), Some(10.0));
    for step in detour.steps().unwrap() {
        assert_ne!(map.tile_at(0, *step), Some(WALL));
    }
}

#[test]
fn degenerate_and_out_of_bounds_requests() {
    let map = river_map();
    let p = provider(&map, SearchOptions::default());
    let s = p.get_tile_path_searcher(1).unwrap();
    let terrain = Terrain { map: &map };
    let t = Traveler { can_swim: false };

    let same = s.find_path(Point::new(2, 2), Point::new(2, 2), &t, &terrain);
    assert_eq!(same, TilePath::found_start_is_target(1));
    assert_eq!(same.dir_to_next(0), Direction::None);

    let off = s.find_path(Point::new(2, 2), Point::new(10, 2), &t, &terrain);
    assert_eq!(off.state(), TilePathState::NotFound);
    assert_eq!(off.floor(), 1);
}

#[test]
fn expansion_budget_turns_into_not_found() {
    let map = TileMap::with_floors(30, 30, 1, GRASS);
    let tight = SearchOptions { max_expansions: 5, ..SearchOptions::four_way() };
    let p = provider(&map, tight);
    let handler = TileMapTileHandler::new(&map);
    let s = p.get_tile_path_searcher(0).unwrap();
    assert!(!s.find_path(Point::new(0, 0), Point::new(29, 29), &(), &handler).is_found());
    // Short hops stay within budget
    assert!(s.find_path(Point::new(0, 0), Point::new(2, 0), &(), &handler).is_found());
}

#[test]
fn segment_follows_moving_waypoints() {
    let map = river_map();
    let p = Rc::new(provider(&map, SearchOptions::default()));
    let walker = Traveler { can_swim: false };
    let service = Rc::new(FloorPathService::new(p, Terrain { map: &map }, walker));
    let mut seg = TilePathSegment::new(service, Waypoint::new(0, 0, 0), Waypoint::new(4, 4, 0));

    assert!(!seg.is_tile_path_cached());
    let first = seg.get_tile_path().clone();
    assert!(first.is_found());
    assert_eq!(first.last(), Some(Point::new(4, 4)));
    assert!(seg.is_tile_path_cached());

    // Target moves while cached: rebuilt on the spot
    seg.on_endpoint_moved(WaypointMoved { end: SegmentEnd::To, waypoint: Waypoint::new(4, 7, 0) });
    assert!(seg.is_tile_path_cached());
    assert_eq!(seg.build_count(), 2);
    let second = seg.cached_tile_path().unwrap();
    assert_ne!(second, &first);
    assert_eq!(second.last(), Some(Point::new(4, 7)));

    // Target moves across the river: non-swimmer cannot follow
    seg.on_endpoint_moved(WaypointMoved { end: SegmentEnd::To, waypoint: Waypoint::new(8, 7, 0) });
    assert_eq!(seg.cached_tile_path().unwrap().state(), TilePathState::NotFound);

    seg.invalidate_cached_tile_path();
    assert!(!seg.is_tile_path_cached());
    assert_eq!(seg.build_count(), 3);
}

#[test]
fn segment_on_unknown_floor_is_not_found() {
    let map = river_map();
    let p = Rc::new(provider(&map, SearchOptions::default()));
    let service = Rc::new(FloorPathService::new(p, TileMapTileHandler::new(&map), ()));
    let mut seg = TilePathSegment::new(service, Waypoint::new(0, 0, 0), Waypoint::new(3, 3, 9));

    assert!(seg.get_tile_path().is_found());
    seg.set_preferred_waypoint(SegmentEnd::To);
    seg.invalidate_cached_tile_path();
    let path = seg.get_tile_path();
    assert_eq!(path.state(), TilePathState::NotFound);
    assert_eq!(path.floor(), 9);
}
