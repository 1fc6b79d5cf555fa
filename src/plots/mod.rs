//! Drawables built from statistics and bins.
//!
//! Provides builder APIs that turn computed summaries into plain vertex
//! lists for a rendering layer.

mod boxplot;
mod hexbin;

pub use boxplot::{default_width, BoxGlyph, BoxPlot, BuiltBoxPlot};
pub use hexbin::{ArraySink, HexCollection};
