//! Hexagon collection drawn from a binning result.

use crate::geometry::{Point, Polygon};
use crate::hexbin::{HexbinResult, Marginals};
use crate::style::Rgba;

/// Receiver of the per-cell aggregates, typically a colormap normalization.
pub trait ArraySink {
    /// Take the aggregate of every drawn hexagon, in drawing order.
    fn set_array(&mut self, values: &[f64]);
}

impl ArraySink for Vec<f64> {
    fn set_array(&mut self, values: &[f64]) {
        self.clear();
        self.extend_from_slice(values);
    }
}

/// Hexagons with one aggregate each.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCollection {
    polygons: Vec<Polygon>,
    offsets: Vec<Point>,
    values: Vec<f64>,
    edge_color: Rgba,
    marginals: Option<Marginals>,
    corners: [Point; 2],
}

impl HexCollection {
    /// Build the hexagon outlines of every retained cell.
    #[must_use]
    pub fn new(result: &HexbinResult) -> Self {
        Self {
            polygons: result.hexagons(),
            offsets: result.bins().iter().map(|b| b.center).collect(),
            values: result.values(),
            edge_color: Rgba::WHITE,
            marginals: result.marginals().cloned(),
            corners: result.extent_corners(),
        }
    }

    /// Set the hexagon edge color.
    #[must_use]
    pub fn edge_color(mut self, color: Rgba) -> Self {
        self.edge_color = color;
        self
    }

    /// Hexagon outlines in data space.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Hexagon centers in data space.
    #[must_use]
    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    /// Aggregates, one per hexagon.
    #[must_use]
    pub fn array(&self) -> &[f64] {
        &self.values
    }

    /// Hand the aggregates to a color mapping.
    pub fn feed<S: ArraySink + ?Sized>(&self, sink: &mut S) {
        sink.set_array(&self.values);
    }

    /// Edge color.
    #[must_use]
    pub fn edge(&self) -> Rgba {
        self.edge_color
    }

    /// Marginal bars, if they were computed.
    #[must_use]
    pub fn marginals(&self) -> Option<&Marginals> {
        self.marginals.as_ref()
    }

    /// Corners of the binned rectangle, the collection's data limits.
    #[must_use]
    pub fn corners(&self) -> [Point; 2] {
        self.corners
    }

    /// Number of hexagons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Whether there are no hexagons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
