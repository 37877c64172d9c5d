use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::MatrixError;
use crate::models::{Point, TileIndex};

/// Number of cells in a `width` x `height` grid; negative sides count as zero.
fn area(width: i32, height: i32) -> usize {
    let w = usize::try_from(width).unwrap_or(0);
    let h = usize::try_from(height).unwrap_or(0);
    w.saturating_mul(h)
}

/// Row-major offset of an in-bounds cell.
#[inline]
fn offset(width: i32, x: i32, y: i32) -> usize {
    y as usize * width as usize + x as usize
}

/// A rectangular block of tile indices, stored row-major.
///
/// `tiles.len() == width * height` always holds; deserialized input that
/// breaks it is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTileMatrix")]
pub struct TileMatrix {
    width: i32,
    height: i32,
    tiles: Vec<TileIndex>,
}

#[derive(Deserialize)]
struct RawTileMatrix {
    width: i32,
    height: i32,
    tiles: Vec<TileIndex>,
}

impl TryFrom<RawTileMatrix> for TileMatrix {
    type Error = MatrixError;

    fn try_from(raw: RawTileMatrix) -> Result<Self, MatrixError> {
        let RawTileMatrix { width, height, tiles } = raw;
        if width < 0 || height < 0 {
            return Err(MatrixError::NegativeSize { width, height });
        }
        let expected = area(width, height);
        if tiles.len() != expected {
            return Err(MatrixError::TileCount { width, height, expected, actual: tiles.len() });
        }
        Ok(Self { width, height, tiles })
    }
}

impl TileMatrix {
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: i32, height: i32, tile: TileIndex) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self { width, height, tiles: vec![tile; area(width, height)] }
    }

    /// Build from rows of equal length.
    pub fn from_rows(rows: &[Vec<TileIndex>]) -> Result<Self, MatrixError> {
        if !rows.iter().map(Vec::len).all_equal() {
            return Err(MatrixError::Ragged);
        }
        let row_len = rows.first().map(Vec::len).unwrap_or(0);
        let width = i32::try_from(row_len).map_err(|_| MatrixError::TooLarge(row_len))?;
        let height = i32::try_from(rows.len()).map_err(|_| MatrixError::TooLarge(rows.len()))?;
        let tiles: Vec<TileIndex> = rows.iter().flatten().copied().collect();
        Ok(Self { width, height, tiles })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileIndex> {
        if !self.contains(x, y) {
            return None;
        }
        self.tiles.get(offset(self.width, x, y)).copied()
    }

    pub fn set(&mut self, x: i32, y: i32, tile: TileIndex) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        match self.tiles.get_mut(offset(self.width, x, y)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileIndex]> + '_ {
        self.tiles.chunks(self.width.max(1) as usize).take(self.height as usize)
    }
}

/// One floor's tile layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMapFloor {
    number: i32,
    width: i32,
    height: i32,
    tiles: Vec<TileIndex>,
}

impl TileMapFloor {
    fn new(number: i32, width: i32, height: i32, fill: TileIndex) -> Self {
        Self { number, width, height, tiles: vec![fill; area(width, height)] }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    pub fn tile_at(&self, p: Point) -> Option<TileIndex> {
        if !self.in_bounds(p) {
            return None;
        }
        self.tiles.get(offset(self.width, p.x, p.y)).copied()
    }

    pub fn set_tile(&mut self, p: Point, tile: TileIndex) -> bool {
        if !self.in_bounds(p) {
            return false;
        }
        match self.tiles.get_mut(offset(self.width, p.x, p.y)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }
}

/// A multi-floor tile map. Every floor shares the map's dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: i32,
    height: i32,
    tile_size: (u32, u32),
    floors: BTreeMap<i32, TileMapFloor>,
}

impl TileMap {
    pub fn new(width: i32, height: i32, tile_size: (u32, u32)) -> Self {
        Self { width: width.max(0), height: height.max(0), tile_size, floors: BTreeMap::new() }
    }

    /// Map with floors `0..floors`, every tile set to `fill`.
    pub fn with_floors(width: i32, height: i32, floors: i32, fill: TileIndex) -> Self {
        let mut map = Self::new(width, height, (32, 32));
        for n in 0..floors {
            map.add_floor(n, fill);
        }
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> (u32, u32) {
        self.tile_size
    }

    /// Add (or reset) floor `number`, filled with `fill`.
    pub fn add_floor(&mut self, number: i32, fill: TileIndex) -> &mut TileMapFloor {
        let floor = TileMapFloor::new(number, self.width, self.height, fill);
        match self.floors.entry(number) {
            Entry::Occupied(mut e) => {
                *e.get_mut() = floor;
                e.into_mut()
            }
            Entry::Vacant(e) => e.insert(floor),
        }
    }

    pub fn floor(&self, number: i32) -> Option<&TileMapFloor> {
        self.floors.get(&number)
    }

    pub fn floor_mut(&mut self, number: i32) -> Option<&mut TileMapFloor> {
        self.floors.get_mut(&number)
    }

    pub fn floors(&self) -> impl Iterator<Item = &TileMapFloor> + '_ {
        self.floors.values()
    }

    pub fn tile_at(&self, floor: i32, p: Point) -> Option<TileIndex> {
        self.floor(floor).and_then(|f| f.tile_at(p))
    }

    pub fn set_tile(&mut self, floor: i32, p: Point, tile: TileIndex) -> bool {
        self.floor_mut(floor).map(|f| f.set_tile(p, tile)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matrix_from_rows_rejects_ragged() {
        let m = TileMatrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.size(), (3, 2));
        assert_eq!(m.get(2, 1), Some(6));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(TileMatrix::from_rows(&[vec![1, 2], vec![3]]), Err(MatrixError::Ragged));
        assert!(TileMatrix::from_rows(&[]).unwrap().is_empty());
        let rows: Vec<&[TileIndex]> = m.rows().collect();
        assert_eq!(rows, vec![&[1u16, 2, 3][..], &[4u16, 5, 6][..]]);
    }

    #[test]
    fn matrix_set_checks_bounds() {
        let mut m = TileMatrix::new(2, 2);
        assert!(m.set(1, 1, 9));
        assert!(!m.set(-1, 0, 9));
        assert_eq!(m.get(1, 1), Some(9));
        assert!(TileMatrix::new(-3, 2).is_empty());
    }

    #[test]
    fn deserialized_matrix_must_match_its_size() {
        let short = serde_json::from_value::<TileMatrix>(json!({
            "width": 3, "height": 3, "tiles": [1]
        }));
        assert!(short.is_err());
        let long = serde_json::from_value::<TileMatrix>(json!({
            "width": 2, "height": 1, "tiles": [7, 7, 9, 9]
        }));
        assert!(long.is_err());
        let negative = serde_json::from_value::<TileMatrix>(json!({
            "width": -1, "height": 0, "tiles": []
        }));
        assert!(negative.is_err());

        let mut ok: TileMatrix = serde_json::from_value(json!({
            "width": 3, "height": 3, "tiles": [0, 0, 0, 0, 0, 0, 0, 0, 0]
        }))
        .unwrap();
        assert!(ok.set(2, 2, 5));
        assert_eq!(ok.get(2, 2), Some(5));
        let back: TileMatrix = serde_json::from_value(serde_json::to_value(&ok).unwrap()).unwrap();
        assert_eq!(back, ok);
    }

    #[test]
    fn floors_share_map_dimensions() {
        let mut map = TileMap::with_floors(4, 3, 2, 1);
        assert_eq!(map.floors().count(), 2);
        let f = map.floor(1).unwrap();
        assert_eq!((f.width(), f.height(), f.number()), (4, 3, 1));
        assert_eq!(map.tile_at(0, Point::new(3, 2)), Some(1));
        assert_eq!(map.tile_at(0, Point::new(4, 2)), None);
        assert_eq!(map.tile_at(5, Point::new(0, 0)), None);
        assert!(map.set_tile(1, Point::new(0, 0), 7));
        assert!(!map.set_tile(9, Point::new(0, 0), 7));
        assert_eq!(map.tile_at(1, Point::new(0, 0)), Some(7));
        assert_eq!(map.tile_size(), (32, 32));
    }
}
