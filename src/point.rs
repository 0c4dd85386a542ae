//! Integer 2D points and the Euclidean metric over them.

use std::fmt;

/// A point placed on the canvas, in screen coordinates.
///
/// Equality is exact coordinate match, never proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        distance(self, other)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
///
/// Differences are taken in `i64` and squared in `f64`, so no pair of `i32`
/// coordinates can overflow.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = (i64::from(a.x) - i64::from(b.x)) as f64;
    let dy = (i64::from(a.y) - i64::from(b.y)) as f64;
    (dx * dx + dy * dy).sqrt()
}
