//! Axis scales and data-to-grid mappings.
//!
//! An [`AxisScale`] says in which space an axis is laid out (linear or
//! base-10 logarithmic). [`LinearScale`] maps a continuous domain onto a
//! continuous range and is used to express data in grid units.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Layout space of a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AxisScale {
    /// Values are laid out as-is.
    #[default]
    Linear,
    /// Values are laid out by their base-10 logarithm.
    Log,
}

impl AxisScale {
    /// Whether this is the logarithmic scale.
    #[must_use]
    pub fn is_log(self) -> bool {
        matches!(self, Self::Log)
    }

    /// Map a data value into layout space.
    ///
    /// Non-positive values on a log axis map to `-inf` or NaN; callers that
    /// need a hard failure use [`AxisScale::validate`] first.
    #[must_use]
    pub fn forward(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => value.log10(),
        }
    }

    /// Map a layout-space value back to data space.
    #[must_use]
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => 10f64.powf(value),
        }
    }

    /// Reject values that cannot be laid out on this scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the scale is logarithmic and any value
    /// is not strictly positive.
    pub fn validate(self, values: &[f64], axis: &str) -> Result<()> {
        if self.is_log() && values.iter().any(|&v| v <= 0.0 || v.is_nan()) {
            return Err(Error::ScaleDomain(format!(
                "{axis} contains non-positive values, so can not be log-scaled"
            )));
        }
        Ok(())
    }

    /// Map every value into layout space after validating it.
    ///
    /// # Errors
    ///
    /// See [`AxisScale::validate`].
    pub fn forward_all(self, values: &[f64], axis: &str) -> Result<Vec<f64>> {
        self.validate(values, axis)?;
        Ok(values.iter().map(|&v| self.forward(v)).collect())
    }
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either end is not
    /// finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain must be finite".to_string()));
        }
        if domain.0 == domain.1 {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale from data extent.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self::new((min, max), range).ok()
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Range units per domain unit.
    #[must_use]
    pub fn slope(&self) -> f64 {
        (self.range_max - self.range_min) / (self.domain_max - self.domain_min)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}
