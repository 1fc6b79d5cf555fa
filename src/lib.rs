//! # Trueno-Axes
//!
//! Data-extent tracking, robust box-plot statistics and hexagonal binning
//! for 2-D plotting surfaces.
//!
//! Trueno-axes computes what a plotting surface needs before anything is
//! drawn. It keeps track of the data limits and derives the visible range
//! from them, summarizes samples into box-plot statistics, and aggregates
//! scattered points on a hexagonal lattice. Results come out as plain
//! vertex lists.
//!
//! ## Features
//!
//! - **Autoscaling**: bounding boxes, margins, log axes and degenerate spans
//! - **Box plots**: linear-interpolated quartiles, IQR whiskers, outliers,
//!   Gaussian or bootstrap notches
//! - **Hex binning**: two interleaved sublattices, pluggable reducers,
//!   count thresholds, log axes and marginal bars
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_axes::prelude::*;
//!
//! let stat = compute_boxplot_stat(
//!     &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
//!     &BoxplotParams::new(),
//! )?;
//! assert_eq!(stat.median, 5.5);
//!
//! let mut axes = Axes::new();
//! let view = axes.boxplot(
//!     BoxPlot::new().data(vec![1.0, 2.0, 3.0, 40.0]),
//!     &mut PlotStyleContext::new(),
//! )?;
//! assert_eq!(view.y.max, 40.0);
//! # Ok::<(), trueno_axes::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize statistics, bins and option records
//! - `parallel`: Compute box-plot statistics for groups in parallel with rayon
//! - `full`: All features enabled
//!
//! ## Academic References
//!
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box Plots."
//! - Carr, D. B., et al. (1987). "Scatterplot Matrix Techniques for Large N."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Geometric primitives (points, lines, polygons).
pub mod geometry;

/// Axis scales and data-to-grid mappings.
pub mod scale;

/// Colors and per-surface style state.
pub mod style;

// ============================================================================
// Computation Modules
// ============================================================================

/// Bounding boxes, margins and view derivation.
pub mod extent;

/// Box-plot statistics.
pub mod stats;

/// Hexagonal binning.
pub mod hexbin;

// ============================================================================
// Drawing Modules
// ============================================================================

/// Drawables built from statistics and bins.
pub mod plots;

/// Drawing surface tying extents and artists together.
pub mod axes;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-axes operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_axes::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axes::{Artist, Axes};
    pub use crate::error::{Error, Result};
    pub use crate::extent::{BoundingBox, ExtentTracker, Interval, MarginPolicy, View};
    pub use crate::geometry::{Line, Point, Polygon};
    pub use crate::hexbin::{BinScale, GridSize, HexBinner, HexbinConfig, HexbinResult, Reducer};
    pub use crate::plots::{BoxPlot, HexCollection};
    pub use crate::scale::{AxisScale, LinearScale, Scale};
    pub use crate::stats::{
        boxplot_stats, compute_boxplot_stat, Bootstrap, BoxplotOptions, BoxplotParams, BoxplotStat,
        SampleInput,
    };
    pub use crate::style::{PlotStyleContext, Rgba};
}

// ============================================================================
// Tests
// ============================================================================
