//! Robust univariate statistics for box plots.
//!
//! Percentiles, IQR-based whisker trimming, outlier classification and
//! median confidence intervals (Gaussian asymptotic or bootstrap).

mod boxplot;
mod input;
mod notch;
mod percentile;

pub use boxplot::{
    boxplot_stats, compute_boxplot_stat, compute_boxplot_stat_with_rng, Bootstrap, BoxplotOptions,
    BoxplotParams, BoxplotStat, DEFAULT_WHISKER_MULTIPLIER,
};
pub use input::SampleInput;
pub use notch::{NotchInterval, BOOTSTRAP_PERCENTILES, GAUSSIAN_NOTCH_FACTOR};
pub use percentile::{median, percentile, percentiles, sorted};
