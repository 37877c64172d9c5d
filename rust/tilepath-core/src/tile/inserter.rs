use tracing::debug;

use super::map::{TileMap, TileMatrix};
use crate::errors::InsertError;
use crate::models::Point;

/// Copies a [`TileMatrix`] into one floor of a [`TileMap`].
///
/// All bounds are checked before the first write, so a rejected insert leaves
/// the map untouched. Searchers built for the floor are not told about the
/// change; invalidate them in the provider afterward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileMatrixMapInserter {
    floor: i32,
}

impl TileMatrixMapInserter {
    pub fn new(floor: i32) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Overwrite the cells of `map` covered by `matrix` placed with its
    /// top-left corner at `position`. A matrix without cells is a no-op once
    /// the position has been validated.
    pub fn insert_at(
        &self,
        position: Point,
        matrix: &TileMatrix,
        map: &mut TileMap,
    ) -> Result<(), InsertError> {
        let (width, height) = (map.width(), map.height());
        let floor = map
            .floor_mut(self.floor)
            .ok_or(InsertError::MissingFloor { floor: self.floor })?;

        if position.x < 0 || position.x >= width {
            return Err(InsertError::XOutOfRange { x: position.x, width });
        }
        if position.y < 0 || position.y >= height {
            return Err(InsertError::YOutOfRange { y: position.y, height });
        }
        let end_x = position.x + matrix.width();
        if end_x > width {
            return Err(InsertError::MatrixExceedsWidth { end_x, width });
        }
        let end_y = position.y + matrix.height();
        if end_y > height {
            return Err(InsertError::MatrixExceedsHeight { end_y, height });
        }

        for dy in 0..matrix.height() {
            for dx in 0..matrix.width() {
                if let Some(tile) = matrix.get(dx, dy) {
                    floor.set_tile(position.offset(dx, dy), tile);
                }
            }
        }
        debug!(
            floor = self.floor,
            x = position.x,
            y = position.y,
            w = matrix.width(),
            h = matrix.height(),
            "inserted tile matrix"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ViolationKind;
    use serde_json::json;

    #[test]
    fn copies_cells_at_offset() {
        let mut map = TileMap::with_floors(5, 4, 2, 0);
        let m = TileMatrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        TileMatrixMapInserter::new(1).insert_at(Point::new(3, 2), &m, &mut map).unwrap();
        assert_eq!(map.tile_at(1, Point::new(3, 2)), Some(1));
        assert_eq!(map.tile_at(1, Point::new(4, 2)), Some(2));
        assert_eq!(map.tile_at(1, Point::new(3, 3)), Some(3));
        assert_eq!(map.tile_at(1, Point::new(4, 3)), Some(4));
        assert_eq!(map.tile_at(1, Point::new(2, 2)), Some(0));
        // Other floors untouched
        assert_eq!(map.tile_at(0, Point::new(3, 2)), Some(0));
    }

    #[test]
    fn empty_matrix_is_a_no_op() {
        let mut map = TileMap::with_floors(4, 4, 1, 0);
        let before = map.clone();
        let inserter = TileMatrixMapInserter::new(0);
        inserter.insert_at(Point::new(1, 1), &TileMatrix::new(0, 3), &mut map).unwrap();
        inserter.insert_at(Point::new(3, 3), &TileMatrix::new(0, 0), &mut map).unwrap();
        assert_eq!(map, before);
        // Position is still validated
        let err = inserter
            .insert_at(Point::new(4, 0), &TileMatrix::new(0, 0), &mut map)
            .unwrap_err();
        assert_eq!(err, InsertError::XOutOfRange { x: 4, width: 4 });
    }

    #[test]
    fn rejects_missing_floor() {
        let mut map = TileMap::with_floors(4, 4, 1, 0);
        let err = TileMatrixMapInserter::new(3)
            .insert_at(Point::new(0, 0), &TileMatrix::new(1, 1), &mut map)
            .unwrap_err();
        assert_eq!(err, InsertError::MissingFloor { floor: 3 });
        assert_eq!(err.kind(), ViolationKind::ArgumentAbsent);
    }

    #[test]
    fn failed_insert_writes_nothing() {
        let mut map = TileMap::with_floors(4, 4, 1, 0);
        let before = map.clone();
        let m = TileMatrix::filled(2, 5, 7);
        assert!(TileMatrixMapInserter::new(0).insert_at(Point::new(0, 0), &m, &mut map).is_err());
        assert_eq!(map, before);
    }

    #[test]
    fn writes_stay_inside_the_validated_rectangle() {
        let mut map = TileMap::with_floors(4, 4, 1, 0);
        let m: TileMatrix = serde_json::from_value(json!({
            "width": 2, "height": 1, "tiles": [7, 9]
        }))
        .unwrap();
        TileMatrixMapInserter::new(0).insert_at(Point::new(0, 0), &m, &mut map).unwrap();
        assert_eq!(map.tile_at(0, Point::new(0, 0)), Some(7));
        assert_eq!(map.tile_at(0, Point::new(1, 0)), Some(9));
        assert_eq!(map.tile_at(0, Point::new(0, 1)), Some(0));
        assert_eq!(map.tile_at(0, Point::new(1, 1)), Some(0));
        // Oversized tile payloads never reach the inserter
        let oversized = serde_json::from_value::<TileMatrix>(json!({
            "width": 2, "height": 1, "tiles": [7, 7, 9, 9]
        }));
        assert!(oversized.is_err());
    }
}
