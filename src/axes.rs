//! A minimal drawing surface: data limits, view and the drawn artists.

use tracing::debug;

use crate::error::Result;
use crate::extent::{ExtentTracker, View};
use crate::geometry::Point;
use crate::hexbin::{HexBinner, HexbinConfig};
use crate::plots::{BoxPlot, BuiltBoxPlot, HexCollection};
use crate::style::PlotStyleContext;

/// Something drawn on an [`Axes`].
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// A set of boxes.
    BoxPlot(BuiltBoxPlot),
    /// A hexagon collection.
    Hexbin(HexCollection),
}

/// Drawing surface owning its extent tracker and artists.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    tracker: ExtentTracker,
    artists: Vec<Artist>,
}

impl Axes {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface around a preconfigured tracker.
    #[must_use]
    pub fn with_tracker(tracker: ExtentTracker) -> Self {
        Self {
            tracker,
            artists: Vec::new(),
        }
    }

    /// The surface's extent tracker.
    #[must_use]
    pub fn tracker(&self) -> &ExtentTracker {
        &self.tracker
    }

    /// Mutable access to the extent tracker (margins, scales, limits).
    pub fn tracker_mut(&mut self) -> &mut ExtentTracker {
        &mut self.tracker
    }

    /// Artists in drawing order.
    #[must_use]
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.tracker.view()
    }

    /// Remove every artist and forget the data limits.
    pub fn clear(&mut self) {
        self.artists.clear();
        self.tracker.clear();
    }

    fn prepare(&mut self, style: &mut PlotStyleContext) {
        if !style.is_holding() {
            self.clear();
            style.reset_cycle();
        }
    }

    /// Draw a box plot and autoscale.
    ///
    /// # Errors
    ///
    /// Any error of [`BoxPlot::build`]; the surface is left untouched.
    pub fn boxplot(&mut self, plot: BoxPlot, style: &mut PlotStyleContext) -> Result<View> {
        let mut scratch = style.clone();
        if !scratch.is_holding() {
            scratch.reset_cycle();
        }
        let built = plot.build(&mut scratch)?;
        self.prepare(style);
        *style = scratch;

        debug!(boxes = built.glyphs().len(), "boxplot");
        self.tracker.update(&built.points());
        self.artists.push(Artist::BoxPlot(built));
        Ok(self.tracker.autoscale_view(false))
    }

    /// Bin points onto hexagons, draw them and autoscale tightly.
    ///
    /// Log-scaled binning axes switch the surface's axis to log as well.
    ///
    /// # Errors
    ///
    /// Any error of [`HexBinner::new`] or [`HexBinner::bin_xy`]; the surface
    /// is left untouched.
    pub fn hexbin(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        values: Option<&[f64]>,
        config: HexbinConfig,
        style: &mut PlotStyleContext,
    ) -> Result<View> {
        let binner = HexBinner::new(config)?;
        let result = binner.bin_xy(xs, ys, values)?;
        self.prepare(style);

        let (x_scale, y_scale) = (binner.config().x_scale(), binner.config().y_scale());
        if x_scale.is_log() {
            self.tracker.set_x_scale(x_scale);
        }
        if y_scale.is_log() {
            self.tracker.set_y_scale(y_scale);
        }

        let collection = HexCollection::new(&result);
        let corners: [Point; 2] = collection.corners();
        self.tracker.update(&corners);
        self.artists.push(Artist::Hexbin(collection));
        Ok(self.tracker.autoscale_view(true))
    }
}
