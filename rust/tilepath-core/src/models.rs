use serde::{Deserialize, Serialize};

/// Index into a tile set; the value stored in each cell of a floor.
pub type TileIndex = u16;

/// A tile coordinate on one floor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(i32, i32)> for Point {
    fn from(p: (i32, i32)) -> Self {
        Point { x: p.0, y: p.1 }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Vertex payloads that sit somewhere on a 2D plane. Heuristics only see this.
pub trait Positioned {
    fn position(&self) -> (f64, f64);
}

impl Positioned for Point {
    fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl Positioned for (f64, f64) {
    fn position(&self) -> (f64, f64) {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn point_serializes_as_xy_object() {
        let v = serde_json::to_value(Point::new(3, -2)).unwrap();
        assert_eq!(v, json!({"x": 3, "y": -2}));
        assert_eq!(v["x"], Value::from(3));
    }

    #[test]
    fn offset_and_tuple_conversions() {
        let p = Point::new(1, 1).offset(-1, 2);
        assert_eq!(p, Point::new(0, 3));
        let t: (i32, i32) = p.into();
        assert_eq!(Point::from(t), p);
    }
}
