//! Hexagonal binning of scattered 2-D points.
//!
//! Points are normalized into grid units and assigned to the nearest point
//! of two interleaved sublattices, whose union tiles the plane with regular
//! hexagons. Each cell counts its points, or collects a value per point and
//! reduces them with a [`Reducer`]. Binning on a log axis happens in
//! `log10` space and cell centers are mapped back to data space.
//!
//! # Example
//!
//! ```
//! use trueno_axes::hexbin::{GridSize, HexBinner, HexbinConfig};
//! use trueno_axes::geometry::Point;
//!
//! let points: Vec<Point> = (0..100)
//!     .map(|i| Point::new(f64::from(i % 10), f64::from(i / 10)))
//!     .collect();
//! let binner = HexBinner::new(
//!     HexbinConfig::new().grid_size(GridSize::Explicit { nx: 4, ny: 4 }).min_count(0),
//! )
//! .unwrap();
//! let result = binner.bin(&points, None).unwrap();
//! assert_eq!(result.total_count(), 100);
//! ```
//!
//! # References
//!
//! - Carr, D. B., Littlefield, R. J., Nicholson, W. L., & Littlefield, J. S.
//!   (1987). "Scatterplot Matrix Techniques for Large N." *Journal of the
//!   American Statistical Association*, 82(398), 424-436.

mod lattice;
mod marginals;
mod reduce;
mod scaling;

pub use lattice::{CellId, HexLattice, Sublattice, HEXAGON_OFFSETS};
pub use marginals::{MarginalBar, Marginals};
pub use reduce::{ReduceFn, Reducer};
pub use scaling::BinScale;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{check_lengths, Error, Result};
use crate::extent::{Interval, DEGENERATE_EXPANDER};
use crate::geometry::{Point, Polygon};
use crate::scale::{AxisScale, LinearScale, Scale};

/// Default number of hexagons along x.
pub const DEFAULT_GRID_SIZE: usize = 100;

/// Fraction of the x span added on each side so that points on the upper
/// boundary still land inside the lattice.
pub const X_PADDING: f64 = 1e-9;

/// Number of hexagons in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GridSize {
    /// `nx` hexagons along x; the y count is chosen so hexagons are roughly
    /// regular (`ny = floor(nx / sqrt(3))`).
    Square(usize),
    /// Explicit counts in both directions.
    Explicit {
        /// Hexagons along x.
        nx: usize,
        /// Hexagons along y.
        ny: usize,
    },
}

impl Default for GridSize {
    fn default() -> Self {
        Self::Square(DEFAULT_GRID_SIZE)
    }
}

impl GridSize {
    /// Resolve to `(nx, ny)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either count is zero.
    pub fn resolve(self) -> Result<(usize, usize)> {
        let (nx, ny) = match self {
            Self::Square(nx) => (nx, (nx as f64 / 3f64.sqrt()) as usize),
            Self::Explicit { nx, ny } => (nx, ny),
        };
        if nx == 0 || ny == 0 {
            return Err(Error::invalid(format!(
                "hexbin grid must have at least one cell per axis, got {nx}x{ny}"
            )));
        }
        Ok((nx, ny))
    }
}

/// Builder-style configuration for [`HexBinner`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HexbinConfig {
    grid: GridSize,
    extent: Option<(Interval, Interval)>,
    x_scale: AxisScale,
    y_scale: AxisScale,
    #[cfg_attr(feature = "serde", serde(skip))]
    reducer: Reducer,
    min_count: Option<usize>,
    bins: BinScale,
    marginals: bool,
}

impl HexbinConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of hexagons.
    #[must_use]
    pub fn grid_size(mut self, grid: GridSize) -> Self {
        self.grid = grid;
        self
    }

    /// Bin over a fixed data-space rectangle instead of the data's extent.
    #[must_use]
    pub fn extent(mut self, x: (f64, f64), y: (f64, f64)) -> Self {
        self.extent = Some((Interval::new(x.0, x.1), Interval::new(y.0, y.1)));
        self
    }

    /// Set the layout space of both axes.
    #[must_use]
    pub fn scales(mut self, x: AxisScale, y: AxisScale) -> Self {
        self.x_scale = x;
        self.y_scale = y;
        self
    }

    /// Set the reduction applied to per-point values.
    #[must_use]
    pub fn reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Only keep cells holding more than `min_count` points.
    #[must_use]
    pub fn min_count(mut self, min_count: usize) -> Self {
        self.min_count = Some(min_count);
        self
    }

    /// Set the rescaling applied to aggregates.
    #[must_use]
    pub fn bins(mut self, bins: BinScale) -> Self {
        self.bins = bins;
        self
    }

    /// Also compute marginal bars along each axis.
    #[must_use]
    pub fn marginals(mut self, enabled: bool) -> Self {
        self.marginals = enabled;
        self
    }

    /// Layout space of the x axis.
    #[must_use]
    pub fn x_scale(&self) -> AxisScale {
        self.x_scale
    }

    /// Layout space of the y axis.
    #[must_use]
    pub fn y_scale(&self) -> AxisScale {
        self.y_scale
    }

    fn validate_extent(&self) -> Result<()> {
        let Some((x, y)) = self.extent else {
            return Ok(());
        };
        for (interval, axis, scale) in [(x, "x", self.x_scale), (y, "y", self.y_scale)] {
            if !interval.is_finite() || interval.min >= interval.max {
                return Err(Error::invalid(format!(
                    "hexbin {axis} extent must be finite and increasing, got ({}, {})",
                    interval.min, interval.max
                )));
            }
            scale.validate(&[interval.min, interval.max], axis)?;
        }
        Ok(())
    }
}

/// One retained cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HexBin {
    /// Lattice address.
    pub cell: CellId,
    /// Cell center in data space.
    pub center: Point,
    /// Points assigned to the cell.
    pub count: usize,
    /// Aggregate after reduction and bin scaling.
    pub value: f64,
}

/// Retained cells plus the grid geometry needed to draw them.
#[derive(Debug, Clone)]
pub struct HexbinResult {
    bins: Vec<HexBin>,
    lattice: HexLattice,
    x_grid: LinearScale,
    y_grid: LinearScale,
    x_scale: AxisScale,
    y_scale: AxisScale,
    marginals: Option<Marginals>,
}

impl HexbinResult {
    /// Retained cells in lattice storage order.
    #[must_use]
    pub fn bins(&self) -> &[HexBin] {
        &self.bins
    }

    /// Consume the result, keeping only the cells.
    #[must_use]
    pub fn into_bins(self) -> Vec<HexBin> {
        self.bins
    }

    /// Aggregate of every retained cell, in the order of [`Self::bins`].
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.value).collect()
    }

    /// Sum of the point counts of the retained cells.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Lattice the points were binned on.
    #[must_use]
    pub fn lattice(&self) -> HexLattice {
        self.lattice
    }

    /// Width and height of one grid cell in layout space.
    #[must_use]
    pub fn cell_size(&self) -> (f64, f64) {
        (1.0 / self.x_grid.slope(), 1.0 / self.y_grid.slope())
    }

    /// Lower-left and upper-right corners of the padded binning rectangle,
    /// in data space.
    #[must_use]
    pub fn extent_corners(&self) -> [Point; 2] {
        let (x0, x1) = self.x_grid.domain();
        let (y0, y1) = self.y_grid.domain();
        [
            Point::new(self.x_scale.inverse(x0), self.y_scale.inverse(y0)),
            Point::new(self.x_scale.inverse(x1), self.y_scale.inverse(y1)),
        ]
    }

    /// Marginal bars, if they were requested.
    #[must_use]
    pub fn marginals(&self) -> Option<&Marginals> {
        self.marginals.as_ref()
    }

    /// Hexagon outline of a cell in data space.
    ///
    /// Vertices are placed in layout space and mapped back per vertex, so
    /// hexagons on a log axis are regular on screen rather than in data.
    #[must_use]
    pub fn hexagon(&self, cell: CellId) -> Polygon {
        let (gx, gy) = HexLattice::center(cell);
        let cx = self.x_grid.invert(gx);
        let cy = self.y_grid.invert(gy);
        let (sx, sy) = self.cell_size();
        Polygon::new(
            HEXAGON_OFFSETS
                .iter()
                .map(|&(ox, oy)| {
                    Point::new(
                        self.x_scale.inverse(cx + sx * ox),
                        self.y_scale.inverse(cy + sy * oy),
                    )
                })
                .collect(),
        )
    }

    /// Hexagon outlines of every retained cell.
    #[must_use]
    pub fn hexagons(&self) -> Vec<Polygon> {
        self.bins.iter().map(|b| self.hexagon(b.cell)).collect()
    }
}

enum Accumulator {
    Counts(Vec<usize>),
    Values(Vec<Vec<f64>>),
}

impl Accumulator {
    fn new(cells: usize, with_values: bool) -> Self {
        if with_values {
            Self::Values(vec![Vec::new(); cells])
        } else {
            Self::Counts(vec![0; cells])
        }
    }

    fn push(&mut self, index: usize, value: Option<f64>) {
        match self {
            Self::Counts(counts) => counts[index] += 1,
            Self::Values(values) => values[index].push(value.unwrap_or(f64::NAN)),
        }
    }

    /// `(index, count, aggregate)` of every cell that survives thresholding.
    fn aggregate(&self, reducer: &Reducer, min_count: Option<usize>) -> Vec<(usize, usize, f64)> {
        match self {
            Self::Counts(counts) => counts
                .iter()
                .enumerate()
                .filter(|&(_, &c)| min_count.map_or(true, |m| c > m))
                .map(|(i, &c)| (i, c, c as f64))
                .collect(),
            Self::Values(values) => {
                let threshold = min_count.unwrap_or(0);
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.len() > threshold)
                    .map(|(i, v)| (i, v.len(), reducer.reduce(v)))
                    .filter(|(_, _, agg)| !agg.is_nan())
                    .collect()
            }
        }
    }
}

/// Bins points onto a hexagonal lattice.
#[derive(Debug, Clone)]
pub struct HexBinner {
    config: HexbinConfig,
    nx: usize,
    ny: usize,
}

impl HexBinner {
    /// Create a binner from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero grid size, an empty or inverted extent,
    /// a non-positive extent on a log axis, or invalid bin scaling.
    pub fn new(config: HexbinConfig) -> Result<Self> {
        let (nx, ny) = config.grid.resolve()?;
        config.validate_extent()?;
        config.bins.validate()?;
        Ok(Self { config, nx, ny })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &HexbinConfig {
        &self.config
    }

    /// Hexagons along x and y.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Bin `points`, optionally with one value per point.
    ///
    /// # Errors
    ///
    /// See [`HexBinner::bin_xy`].
    pub fn bin(&self, points: &[Point], values: Option<&[f64]>) -> Result<HexbinResult> {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        self.bin_xy(&xs, &ys, values)
    }

    /// Bin points given as separate coordinate slices.
    ///
    /// Without `values` each cell's aggregate is its point count; with
    /// `values` it is the configured reduction of the values of its points.
    /// Points with a non-finite coordinate are removed before anything else,
    /// so they neither count nor trip the log-axis check. Points whose
    /// nearest cell lies outside the lattice are dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::DataLengthMismatch`] if the slices differ in length.
    /// - [`Error::ScaleDomain`] for non-positive values on a log axis.
    /// - [`Error::EmptyData`] if there is no finite point and no explicit
    ///   extent to bin over.
    pub fn bin_xy(&self, xs: &[f64], ys: &[f64], values: Option<&[f64]>) -> Result<HexbinResult> {
        check_lengths(xs.len(), ys.len())?;
        if let Some(values) = values {
            check_lengths(xs.len(), values.len())?;
        }
        debug!(
            points = xs.len(),
            nx = self.nx,
            ny = self.ny,
            with_values = values.is_some(),
            "hexbin"
        );

        let (xs, ys, values) = finite_points(xs, ys, values);
        let values = values.as_deref();

        let config = &self.config;
        let tx = config.x_scale.forward_all(&xs, "x")?;
        let ty = config.y_scale.forward_all(&ys, "y")?;

        let (x_extent, y_extent) = self.layout_extent(&tx, &ty)?;
        let pad = X_PADDING * x_extent.span();
        let x_extent = Interval::new(x_extent.min - pad, x_extent.max + pad);

        let x_grid = LinearScale::new((x_extent.min, x_extent.max), (0.0, self.nx as f64))?;
        let y_grid = LinearScale::new((y_extent.min, y_extent.max), (0.0, self.ny as f64))?;
        let lattice = HexLattice::new(self.nx, self.ny);

        let mut acc = Accumulator::new(lattice.len(), values.is_some());
        let mut dropped = 0usize;
        for (i, (&x, &y)) in tx.iter().zip(&ty).enumerate() {
            match lattice.assign(x_grid.scale(x), y_grid.scale(y)) {
                Some(cell) => acc.push(lattice.index(cell), values.map(|v| v[i])),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, "points outside the hexagonal grid");
        }

        let kept = acc.aggregate(&config.reducer, config.min_count);
        trace!(cells = lattice.len(), kept = kept.len(), "hexbin thresholded");

        let mut aggregates: Vec<f64> = kept.iter().map(|&(_, _, agg)| agg).collect();
        config.bins.apply(&mut aggregates);

        let mut bins = Vec::with_capacity(kept.len());
        for (&(index, count, _), value) in kept.iter().zip(aggregates) {
            let Some(cell) = lattice.cell(index) else {
                continue;
            };
            let (gx, gy) = HexLattice::center(cell);
            let center = Point::new(
                config.x_scale.inverse(x_grid.invert(gx)),
                config.y_scale.inverse(y_grid.invert(gy)),
            );
            bins.push(HexBin {
                cell,
                center,
                count,
                value,
            });
        }

        let marginals = config.marginals.then(|| Marginals {
            x: marginals::coarse_bars(&tx, values, x_extent, self.nx, &config.reducer, config.x_scale),
            y: marginals::coarse_bars(&ty, values, y_extent, self.nx, &config.reducer, config.y_scale),
        });

        Ok(HexbinResult {
            bins,
            lattice,
            x_grid,
            y_grid,
            x_scale: config.x_scale,
            y_scale: config.y_scale,
            marginals,
        })
    }

    /// Binning rectangle in layout space, before padding.
    fn layout_extent(&self, tx: &[f64], ty: &[f64]) -> Result<(Interval, Interval)> {
        let config = &self.config;
        if let Some((x, y)) = config.extent {
            let layout = |i: Interval, scale: AxisScale| {
                Interval::new(scale.forward(i.min), scale.forward(i.max))
            };
            return Ok((layout(x, config.x_scale), layout(y, config.y_scale)));
        }

        let finite = |v: &[f64]| -> Option<Interval> {
            v.iter().filter(|c| c.is_finite()).fold(None, |acc: Option<Interval>, &c| {
                Some(acc.map_or(Interval::new(c, c), |i| {
                    Interval::new(i.min.min(c), i.max.max(c))
                }))
            })
        };
        match (finite(tx), finite(ty)) {
            (Some(x), Some(y)) => Ok((
                x.nonsingular(DEGENERATE_EXPANDER),
                y.nonsingular(DEGENERATE_EXPANDER),
            )),
            _ => Err(Error::EmptyData),
        }
    }
}

/// Keep only the points whose coordinates are both finite.
fn finite_points(
    xs: &[f64],
    ys: &[f64],
    values: Option<&[f64]>,
) -> (Vec<f64>, Vec<f64>, Option<Vec<f64>>) {
    let keep: Vec<usize> = (0..xs.len())
        .filter(|&i| xs[i].is_finite() && ys[i].is_finite())
        .collect();
    if keep.len() < xs.len() {
        debug!(removed = xs.len() - keep.len(), "non-finite points removed");
    }
    (
        keep.iter().map(|&i| xs[i]).collect(),
        keep.iter().map(|&i| ys[i]).collect(),
        values.map(|v| keep.iter().map(|&i| v[i]).collect()),
    )
}
