//! Confidence intervals around the median, drawn as box-plot notches.
//!
//! # References
//!
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box
//!   Plots." *The American Statistician*, 32(1), 12-16.
//! - Efron, B. (1979). "Bootstrap Methods: Another Look at the Jackknife."
//!   *The Annals of Statistics*, 7(1), 1-26.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::percentile::{median, percentile, sorted};
use crate::error::{Error, Result};

/// Scale of the Gaussian-based notch half-width, in units of `IQR / sqrt(N)`.
pub const GAUSSIAN_NOTCH_FACTOR: f64 = 1.57;

/// Percentiles of the bootstrapped medians bounding the 95% interval.
pub const BOOTSTRAP_PERCENTILES: [f64; 2] = [2.5, 97.5];

/// A confidence interval around the median.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotchInterval {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl NotchInterval {
    /// Build an interval from two user-supplied values in any order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless exactly two values are given.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        match *values {
            [a, b] => Ok(Self {
                low: a.min(b),
                high: a.max(b),
            }),
            _ => Err(Error::invalid(format!(
                "a notch interval needs exactly two values, got {}",
                values.len()
            ))),
        }
    }

    /// Gaussian asymptotic interval `median ± 1.57 * IQR / sqrt(N)`.
    #[must_use]
    pub fn gaussian(median: f64, iqr: f64, n: usize) -> Self {
        let half = GAUSSIAN_NOTCH_FACTOR * iqr / (n as f64).sqrt();
        Self {
            low: median - half,
            high: median + half,
        }
    }

    /// 95% bootstrap interval of the median.
    ///
    /// Resamples `data` with replacement `iterations` times, takes the median
    /// of every resample and returns the 2.5th and 97.5th percentiles of those
    /// medians.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for an empty sample and
    /// [`Error::InvalidArgument`] if `iterations` is zero.
    pub fn bootstrap<R: Rng + ?Sized>(data: &[f64], iterations: usize, rng: &mut R) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyData);
        }
        if iterations == 0 {
            return Err(Error::invalid("bootstrap iterations must be at least 1"));
        }

        let m = data.len();
        let mut resample = vec![0.0; m];
        let mut estimates = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            for slot in &mut resample {
                *slot = data[rng.random_range(0..m)];
            }
            resample.sort_by(f64::total_cmp);
            estimates.push(median(&resample));
        }

        let estimates = sorted(&estimates);
        Ok(Self {
            low: percentile(&estimates, BOOTSTRAP_PERCENTILES[0]),
            high: percentile(&estimates, BOOTSTRAP_PERCENTILES[1]),
        })
    }

    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}
