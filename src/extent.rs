//! Data-extent tracking and autoscaling.
//!
//! A [`BoundingBox`] accumulates the extent of everything drawn on a surface.
//! [`compute_view`] turns an accumulated box into the visible range of each
//! axis, applying the surface's [`MarginPolicy`] in linear or log space.
//! [`ExtentTracker`] bundles both with the per-surface autoscale state.
//!
//! # Non-finite coordinates
//!
//! Callers are expected to filter NaN and infinite coordinates. When they do
//! not, the box takes on the non-finite value and every view derived from it
//! degrades to a non-finite range. No error is raised; a `tracing` warning is
//! emitted instead so the condition is visible during development.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_lengths, Error, Result};
use crate::geometry::Point;
use crate::scale::AxisScale;

/// Fraction used to widen zero-width spans before margins are applied.
pub const DEGENERATE_EXPANDER: f64 = 0.05;

/// View used for an axis that never received data.
pub const DEFAULT_VIEW: Interval = Interval::new(0.0, 1.0);

/// View used for a log axis that never received a positive value.
pub const DEFAULT_LOG_VIEW: Interval = Interval::new(1.0, 10.0);

/// A closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// Lower end.
    pub min: f64,
    /// Upper end.
    pub max: f64,
}

impl Interval {
    /// Create an interval. No ordering check is made.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the interval (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether both ends are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Widen a zero-width interval so it can be displayed.
    ///
    /// `v` becomes `(v - e|v|, v + e|v|)`, or `(-e, e)` when `v` is zero.
    #[must_use]
    pub fn nonsingular(self, expander: f64) -> Self {
        if self.max - self.min != 0.0 {
            return self;
        }
        if self.min == 0.0 {
            Self::new(-expander, expander)
        } else {
            let delta = expander * self.min.abs();
            Self::new(self.min - delta, self.max + delta)
        }
    }

    /// Grow both ends by `fraction` of the span.
    #[must_use]
    pub fn expand(self, fraction: f64) -> Self {
        let delta = fraction * self.span();
        Self::new(self.min - delta, self.max + delta)
    }

    fn include(self, value: f64) -> Self {
        Self::new(nan_min(self.min, value), nan_max(self.max, value))
    }

    fn hull(self, other: Self) -> Self {
        Self::new(nan_min(self.min, other.min), nan_max(self.max, other.max))
    }
}

// NaN wins: once a NaN enters, it stays.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else if b < a {
        b
    } else {
        a
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else if b > a {
        b
    } else {
        a
    }
}

/// Accumulated extent along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisExtent {
    interval: Option<Interval>,
    min_positive: Option<f64>,
}

impl AxisExtent {
    /// The accumulated interval, or `None` if nothing was added.
    #[must_use]
    pub fn interval(&self) -> Option<Interval> {
        self.interval
    }

    /// Smallest strictly positive value seen.
    #[must_use]
    pub fn min_positive(&self) -> Option<f64> {
        self.min_positive
    }

    /// Whether nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interval.is_none()
    }

    fn include(&mut self, value: f64) {
        self.interval = Some(match self.interval {
            None => Interval::new(value, value),
            Some(current) => current.include(value),
        });
        if value > 0.0 {
            self.min_positive = Some(self.min_positive.map_or(value, |m| m.min(value)));
        }
    }

    fn merge(&mut self, other: &Self) {
        self.interval = match (self.interval, other.interval) {
            (Some(a), Some(b)) => Some(a.hull(b)),
            (a, b) => a.or(b),
        };
        self.min_positive = match (self.min_positive, other.min_positive) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }
}

/// Minimal axis-aligned box containing all accumulated data.
///
/// An empty box is distinct from a zero-width box: it has no interval at all
/// on either axis. The box only grows; [`BoundingBox::reset`] and the
/// `ignore_prior` flag of the extend operations are the only ways to shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    x: AxisExtent,
    y: AxisExtent,
}

impl BoundingBox {
    /// Create an empty box.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a box spanning the given points.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut bbox = Self::empty();
        bbox.extend(points, false);
        bbox
    }

    /// Whether no data has been accumulated on either axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    /// Extent along x.
    #[must_use]
    pub fn x(&self) -> &AxisExtent {
        &self.x
    }

    /// Extent along y.
    #[must_use]
    pub fn y(&self) -> &AxisExtent {
        &self.y
    }

    /// Interval along x, if any.
    #[must_use]
    pub fn x_span(&self) -> Option<Interval> {
        self.x.interval
    }

    /// Interval along y, if any.
    #[must_use]
    pub fn y_span(&self) -> Option<Interval> {
        self.y.interval
    }

    /// Forget all accumulated data.
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// Union a point set into the box.
    ///
    /// With `ignore_prior` the previous content is discarded first, so the
    /// result depends only on `points`.
    pub fn extend(&mut self, points: &[Point], ignore_prior: bool) -> &mut Self {
        if ignore_prior {
            self.reset();
        }
        warn_non_finite(points.iter().any(|p| !p.is_finite()), points.len());
        for p in points {
            self.x.include(p.x);
            self.y.include(p.y);
        }
        self
    }

    /// Union paired coordinate slices into the box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the slices differ in length.
    /// The box is left untouched in that case.
    pub fn extend_xy(&mut self, xs: &[f64], ys: &[f64], ignore_prior: bool) -> Result<&mut Self> {
        check_lengths(xs.len(), ys.len())?;
        if ignore_prior {
            self.reset();
        }
        warn_non_finite(
            xs.iter().chain(ys).any(|v| !v.is_finite()),
            xs.len(),
        );
        for (&x, &y) in xs.iter().zip(ys) {
            self.x.include(x);
            self.y.include(y);
        }
        Ok(self)
    }

    /// Union x values only; the y extent is untouched (reset if `ignore_prior`).
    pub fn extend_x(&mut self, xs: &[f64], ignore_prior: bool) -> &mut Self {
        if ignore_prior {
            self.x = AxisExtent::default();
        }
        warn_non_finite(xs.iter().any(|v| !v.is_finite()), xs.len());
        for &x in xs {
            self.x.include(x);
        }
        self
    }

    /// Union y values only; the x extent is untouched (reset if `ignore_prior`).
    pub fn extend_y(&mut self, ys: &[f64], ignore_prior: bool) -> &mut Self {
        if ignore_prior {
            self.y = AxisExtent::default();
        }
        warn_non_finite(ys.iter().any(|v| !v.is_finite()), ys.len());
        for &y in ys {
            self.y.include(y);
        }
        self
    }

    /// Union another box into this one.
    pub fn union(&mut self, other: &Self) -> &mut Self {
        self.x.merge(&other.x);
        self.y.merge(&other.y);
        self
    }

    /// Whether `point` lies inside the box (inclusive). Always false when empty.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match (self.x.interval, self.y.interval) {
            (Some(x), Some(y)) => x.contains(point.x) && y.contains(point.y),
            _ => false,
        }
    }
}

fn warn_non_finite(found: bool, len: usize) {
    if found {
        tracing::warn!(
            points = len,
            "non-finite coordinate entered the data limits; derived views will be non-finite"
        );
    }
}

/// Fractional margins applied when deriving a view from a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginPolicy {
    x: f64,
    y: f64,
}

impl MarginPolicy {
    /// Create a margin policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either margin is negative or not
    /// finite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        for (axis, m) in [("x", x), ("y", y)] {
            if !m.is_finite() || m < 0.0 {
                return Err(Error::invalid(format!(
                    "{axis} margin must be a finite non-negative fraction, got {m}"
                )));
            }
        }
        Ok(Self { x, y })
    }

    /// Same margin on both axes.
    ///
    /// # Errors
    ///
    /// See [`MarginPolicy::new`].
    pub fn uniform(margin: f64) -> Result<Self> {
        Self::new(margin, margin)
    }

    /// Margin along x.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Margin along y.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Visible range of both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct View {
    /// Visible x range.
    pub x: Interval,
    /// Visible y range.
    pub y: Interval,
}

impl Default for View {
    fn default() -> Self {
        Self {
            x: DEFAULT_VIEW,
            y: DEFAULT_VIEW,
        }
    }
}

/// Derive the visible range of one axis.
#[must_use]
pub fn axis_view(extent: &AxisExtent, margin: f64, scale: AxisScale) -> Interval {
    let Some(interval) = extent.interval else {
        return DEFAULT_VIEW;
    };

    match scale {
        AxisScale::Linear => interval.nonsingular(DEGENERATE_EXPANDER).expand(margin),
        AxisScale::Log => {
            let lo = if interval.min > 0.0 {
                Some(interval.min)
            } else if interval.min.is_nan() {
                Some(f64::NAN)
            } else {
                extent.min_positive
            };
            let Some(lo) = lo else {
                return DEFAULT_LOG_VIEW;
            };
            let logged = Interval::new(scale.forward(lo), scale.forward(interval.max))
                .nonsingular(DEGENERATE_EXPANDER)
                .expand(margin);
            Interval::new(scale.inverse(logged.min), scale.inverse(logged.max))
        }
    }
}

/// Derive the visible range of both axes from an accumulated box.
///
/// Linear axes grow by `margin * span` on each side; log axes do the same in
/// log space. A zero-width span is widened first (see
/// [`Interval::nonsingular`]). An axis without data yields `(0, 1)`.
#[must_use]
pub fn compute_view(
    bbox: &BoundingBox,
    margins: MarginPolicy,
    x_scale: AxisScale,
    y_scale: AxisScale,
) -> View {
    View {
        x: axis_view(&bbox.x, margins.x, x_scale),
        y: axis_view(&bbox.y, margins.y, y_scale),
    }
}

/// Per-surface data limits plus autoscale policy.
///
/// A fresh or cleared tracker is armed to ignore existing limits: the first
/// [`ExtentTracker::update`] replaces the box instead of merging into it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtentTracker {
    data_limits: BoundingBox,
    margins: MarginPolicy,
    x_scale: AxisScale,
    y_scale: AxisScale,
    autoscale_x: bool,
    autoscale_y: bool,
    view: View,
    ignore_existing: bool,
}

impl Default for ExtentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtentTracker {
    /// Create a tracker with zero margins and linear axes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_limits: BoundingBox::empty(),
            margins: MarginPolicy::default(),
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            autoscale_x: true,
            autoscale_y: true,
            view: View::default(),
            ignore_existing: true,
        }
    }

    /// Set the margin policy.
    #[must_use]
    pub fn margins(mut self, margins: MarginPolicy) -> Self {
        self.margins = margins;
        self
    }

    /// Set both axis scales.
    #[must_use]
    pub fn scales(mut self, x: AxisScale, y: AxisScale) -> Self {
        self.x_scale = x;
        self.y_scale = y;
        self
    }

    /// Current margin policy.
    #[must_use]
    pub fn margin_policy(&self) -> MarginPolicy {
        self.margins
    }

    /// Replace the margin policy.
    pub fn set_margins(&mut self, margins: MarginPolicy) {
        self.margins = margins;
    }

    /// Scale of the x axis.
    #[must_use]
    pub fn x_scale(&self) -> AxisScale {
        self.x_scale
    }

    /// Scale of the y axis.
    #[must_use]
    pub fn y_scale(&self) -> AxisScale {
        self.y_scale
    }

    /// Change the x axis scale.
    pub fn set_x_scale(&mut self, scale: AxisScale) {
        self.x_scale = scale;
    }

    /// Change the y axis scale.
    pub fn set_y_scale(&mut self, scale: AxisScale) {
        self.y_scale = scale;
    }

    /// Accumulated data limits.
    #[must_use]
    pub fn data_limits(&self) -> &BoundingBox {
        &self.data_limits
    }

    /// Whether the next update replaces the data limits.
    #[must_use]
    pub fn ignores_existing(&self) -> bool {
        self.ignore_existing
    }

    /// Explicitly extend the data limits.
    pub fn extend(&mut self, points: &[Point], ignore_prior: bool) -> &BoundingBox {
        self.data_limits.extend(points, ignore_prior);
        self.ignore_existing = false;
        &self.data_limits
    }

    /// Extend the data limits, honoring the armed ignore flag.
    pub fn update(&mut self, points: &[Point]) -> &BoundingBox {
        tracing::debug!(points = points.len(), ignore = self.ignore_existing, "update data limits");
        let ignore = self.ignore_existing;
        self.extend(points, ignore)
    }

    /// Extend the data limits from paired coordinates, honoring the armed
    /// ignore flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the slices differ in length.
    pub fn update_xy(&mut self, xs: &[f64], ys: &[f64]) -> Result<&BoundingBox> {
        self.data_limits.extend_xy(xs, ys, self.ignore_existing)?;
        self.ignore_existing = false;
        Ok(&self.data_limits)
    }

    /// Merge another box into the data limits, honoring the armed ignore flag.
    pub fn update_box(&mut self, other: &BoundingBox) -> &BoundingBox {
        if self.ignore_existing {
            self.data_limits.reset();
            self.ignore_existing = false;
        }
        self.data_limits.union(other);
        &self.data_limits
    }

    /// Enable or disable autoscaling per axis.
    pub fn set_autoscale(&mut self, x: bool, y: bool) {
        self.autoscale_x = x;
        self.autoscale_y = y;
    }

    /// Whether x and y are autoscaled.
    #[must_use]
    pub fn autoscale(&self) -> (bool, bool) {
        (self.autoscale_x, self.autoscale_y)
    }

    /// Pin the x view and stop autoscaling x.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the limits are not finite or are
    /// equal, or [`Error::ScaleDomain`] if they are non-positive on a log axis.
    pub fn set_xlim(&mut self, min: f64, max: f64) -> Result<()> {
        self.view.x = checked_limits(min, max, self.x_scale, "x")?;
        self.autoscale_x = false;
        Ok(())
    }

    /// Pin the y view and stop autoscaling y.
    ///
    /// # Errors
    ///
    /// See [`ExtentTracker::set_xlim`].
    pub fn set_ylim(&mut self, min: f64, max: f64) -> Result<()> {
        self.view.y = checked_limits(min, max, self.y_scale, "y")?;
        self.autoscale_y = false;
        Ok(())
    }

    /// View derived from the current limits; `tight` drops the margins.
    #[must_use]
    pub fn compute_view(&self, tight: bool) -> View {
        let margins = if tight {
            MarginPolicy::default()
        } else {
            self.margins
        };
        compute_view(&self.data_limits, margins, self.x_scale, self.y_scale)
    }

    /// Recompute the view for the autoscaled axes and return it.
    pub fn autoscale_view(&mut self, tight: bool) -> View {
        let derived = self.compute_view(tight);
        if self.autoscale_x {
            self.view.x = derived.x;
        }
        if self.autoscale_y {
            self.view.y = derived.y;
        }
        self.view
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Forget all data, re-enable autoscaling and arm the ignore flag.
    pub fn clear(&mut self) {
        self.data_limits.reset();
        self.view = View::default();
        self.autoscale_x = true;
        self.autoscale_y = true;
        self.ignore_existing = true;
    }
}

fn checked_limits(min: f64, max: f64, scale: AxisScale, axis: &str) -> Result<Interval> {
    if !min.is_finite() || !max.is_finite() || min == max {
        return Err(Error::invalid(format!(
            "{axis} limits must be finite and distinct, got ({min}, {max})"
        )));
    }
    scale.validate(&[min, max], axis)?;
    Ok(Interval::new(min, max))
}
