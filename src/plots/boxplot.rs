//! Box plot drawables.
//!
//! Turns [`BoxplotStat`] summaries into vertex lists: a box (notched when a
//! confidence interval is present), a median segment, whiskers with caps and
//! flier points.

use crate::error::{Error, Result};
use crate::geometry::{Line, Point, Polygon};
use crate::stats::{boxplot_stats, BoxplotOptions, BoxplotStat, SampleInput};
use crate::style::{PlotStyleContext, Rgba};

/// Geometry of one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyph {
    /// Center of the box along the position axis.
    pub position: f64,
    /// Full box width.
    pub width: f64,
    /// Box outline, closed explicitly (first vertex repeated last).
    pub outline: Polygon,
    /// Median segment.
    pub median: Line,
    /// Lower and upper whisker.
    pub whiskers: [Line; 2],
    /// Lower and upper cap.
    pub caps: [Line; 2],
    /// Outlier markers.
    pub fliers: Vec<Point>,
}

impl BoxGlyph {
    /// Lay out a vertical box for `stat` centered on `position`.
    ///
    /// Caps span half the box width. A notched box indents to the cap width
    /// at the median.
    #[must_use]
    pub fn new(stat: &BoxplotStat, position: f64, width: f64, show_fliers: bool) -> Self {
        let box_left = position - width * 0.5;
        let box_right = position + width * 0.5;
        let cap_left = position - width * 0.25;
        let cap_right = position + width * 0.25;
        let (q1, med, q3) = (stat.q1, stat.median, stat.q3);

        let (outline, median) = match stat.notch {
            Some(notch) => {
                let xs = [
                    box_left, box_right, box_right, cap_right, box_right, box_right, box_left,
                    box_left, cap_left, box_left, box_left,
                ];
                let ys = [
                    q1, q1, notch.low, med, notch.high, q3, q3, notch.high, med, notch.low, q1,
                ];
                (
                    Polygon::from_xy(&xs, &ys),
                    Line::from_coords(cap_left, med, cap_right, med),
                )
            }
            None => {
                let xs = [box_left, box_right, box_right, box_left, box_left];
                let ys = [q1, q1, q3, q3, q1];
                (
                    Polygon::from_xy(&xs, &ys),
                    Line::from_coords(box_left, med, box_right, med),
                )
            }
        };

        let fliers = if show_fliers {
            stat.outliers().map(|v| Point::new(position, v)).collect()
        } else {
            Vec::new()
        };

        Self {
            position,
            width,
            outline,
            median,
            whiskers: [
                Line::from_coords(position, q1, position, stat.whisker_low),
                Line::from_coords(position, q3, position, stat.whisker_high),
            ],
            caps: [
                Line::from_coords(cap_left, stat.whisker_low, cap_right, stat.whisker_low),
                Line::from_coords(cap_left, stat.whisker_high, cap_right, stat.whisker_high),
            ],
            fliers,
        }
    }

    /// Swap x and y of every vertex, for horizontal boxes.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            position: self.position,
            width: self.width,
            outline: self.outline.transposed(),
            median: self.median.transposed(),
            whiskers: self.whiskers.map(Line::transposed),
            caps: self.caps.map(Line::transposed),
            fliers: self.fliers.iter().map(|p| p.transposed()).collect(),
        }
    }

    /// Every vertex of the glyph.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        let mut points = self.outline.vertices.clone();
        points.extend(self.median.points());
        for line in self.whiskers.iter().chain(&self.caps) {
            points.extend(line.points());
        }
        points.extend(&self.fliers);
        points
    }
}

/// Default box width for a set of positions: 15% of their span, at least
/// 0.15 and at most 0.5.
#[must_use]
pub fn default_width(positions: &[f64]) -> f64 {
    let max = positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = positions.iter().copied().fold(f64::INFINITY, f64::min);
    let distance = if positions.is_empty() { 0.0 } else { max - min };
    (0.15 * distance.max(1.0)).min(0.5)
}

/// Box plot builder.
#[derive(Debug, Clone)]
pub struct BoxPlot {
    input: SampleInput,
    extra_groups: Vec<Vec<f64>>,
    options: BoxplotOptions,
    positions: Option<Vec<f64>>,
    widths: Option<Vec<f64>>,
    vertical: bool,
    show_fliers: bool,
    color: Option<Rgba>,
    median_color: Rgba,
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxPlot {
    /// Create a new box plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: SampleInput::Groups(Vec::new()),
            extra_groups: Vec::new(),
            options: BoxplotOptions::default(),
            positions: None,
            widths: None,
            vertical: true,
            show_fliers: true,
            color: None,
            median_color: Rgba::rgb(255, 127, 14),
        }
    }

    /// Set the datasets.
    #[must_use]
    pub fn data(mut self, input: impl Into<SampleInput>) -> Self {
        self.input = input.into();
        self
    }

    /// Add a single dataset after those set with [`BoxPlot::data`].
    #[must_use]
    pub fn add_group(mut self, data: &[f64]) -> Self {
        self.extra_groups.push(data.to_vec());
        self
    }

    /// Set the statistics options.
    #[must_use]
    pub fn options(mut self, options: BoxplotOptions) -> Self {
        self.options = options;
        self
    }

    /// Place the boxes at explicit positions (default `1..=n`).
    #[must_use]
    pub fn positions(mut self, positions: Vec<f64>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Use one width for every box.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.widths = Some(vec![width]);
        self
    }

    /// Use one width per box.
    #[must_use]
    pub fn widths(mut self, widths: Vec<f64>) -> Self {
        self.widths = Some(widths);
        self
    }

    /// Draw boxes vertically (default) or horizontally.
    #[must_use]
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Show or hide outliers.
    #[must_use]
    pub fn show_fliers(mut self, show: bool) -> Self {
        self.show_fliers = show;
        self
    }

    /// Set the line color (default: next color of the style cycle).
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set median line color.
    #[must_use]
    pub fn median_color(mut self, color: Rgba) -> Self {
        self.median_color = color;
        self
    }

    /// Compute statistics and lay out the boxes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if there are no datasets,
    /// [`Error::InvalidArgument`] if positions or widths do not match the
    /// number of datasets, and any error of [`boxplot_stats`].
    pub fn build(self, style: &mut PlotStyleContext) -> Result<BuiltBoxPlot> {
        let mut groups = self.input.into_groups()?;
        groups.extend(self.extra_groups);
        let stats = boxplot_stats(SampleInput::Groups(groups), &self.options)?;
        let n = stats.len();
        if n == 0 {
            return Err(Error::EmptyData);
        }

        let positions = self.positions.unwrap_or_else(|| (1..=n).map(|p| p as f64).collect());
        if positions.len() != n {
            return Err(Error::invalid(format!(
                "positions and data must have the same length: {} positions for {n} groups",
                positions.len()
            )));
        }

        let widths = match self.widths {
            None => vec![default_width(&positions); n],
            Some(w) if w.len() == 1 => vec![w[0]; n],
            Some(w) if w.len() == n => w,
            Some(w) => {
                return Err(Error::invalid(format!(
                    "widths and data must have the same length: {} widths for {n} groups",
                    w.len()
                )))
            }
        };
        if widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(Error::invalid("box widths must be positive and finite"));
        }

        let glyphs = stats
            .iter()
            .zip(positions.iter().zip(&widths))
            .filter_map(|(stat, (&pos, &width))| {
                let glyph = BoxGlyph::new(stat.as_ref()?, pos, width, self.show_fliers);
                Some(if self.vertical { glyph } else { glyph.transposed() })
            })
            .collect();

        Ok(BuiltBoxPlot {
            stats,
            glyphs,
            vertical: self.vertical,
            color: self.color.unwrap_or_else(|| style.next_color()),
            median_color: self.median_color,
        })
    }
}

/// A laid-out box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltBoxPlot {
    stats: Vec<Option<BoxplotStat>>,
    glyphs: Vec<BoxGlyph>,
    vertical: bool,
    color: Rgba,
    median_color: Rgba,
}

impl BuiltBoxPlot {
    /// Number of datasets, including empty ones.
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.stats.len()
    }

    /// Statistics of a dataset; `None` for an empty dataset.
    #[must_use]
    pub fn stats(&self, index: usize) -> Option<&BoxplotStat> {
        self.stats.get(index)?.as_ref()
    }

    /// One glyph per non-empty dataset.
    #[must_use]
    pub fn glyphs(&self) -> &[BoxGlyph] {
        &self.glyphs
    }

    /// Whether boxes are vertical.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// Line color.
    #[must_use]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Median line color.
    #[must_use]
    pub fn median_color(&self) -> Rgba {
        self.median_color
    }

    /// Every vertex of every glyph.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.glyphs.iter().flat_map(BoxGlyph::points).collect()
    }
}
