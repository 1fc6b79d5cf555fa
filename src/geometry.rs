//! Geometric primitives for drawables.
//!
//! Plain vertex data handed to the rendering layer. Coordinates are in data
//! space; no transform is attached here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Swap the coordinates (used for horizontal layouts).
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Swap x and y of both endpoints.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.start.transposed(), self.end.transposed())
    }

    /// Both endpoints.
    #[must_use]
    pub const fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }
}

/// A closed polygon given by its vertices in drawing order.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    /// Vertices in drawing order.
    pub vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Build a polygon from parallel coordinate lists.
    ///
    /// Extra coordinates on the longer list are ignored.
    #[must_use]
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::new(xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect())
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Swap x and y of every vertex.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::new(self.vertices.iter().map(|p| p.transposed()).collect())
    }
}
