//! Box-plot summary statistics.
//!
//! Quartiles by linear interpolation, whiskers trimmed at a multiple of the
//! interquartile range, outliers beyond the whiskers and an optional notch
//! around the median.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::notch::NotchInterval;
use super::percentile::{percentile, sorted};
use super::SampleInput;
use crate::error::{Error, Result};

/// Default whisker reach, in multiples of the interquartile range.
pub const DEFAULT_WHISKER_MULTIPLIER: f64 = 1.5;

/// Bootstrap resampling settings for notch estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bootstrap {
    /// Number of resamples.
    pub iterations: usize,
    /// Seed of the random source.
    pub seed: u64,
}

impl Bootstrap {
    /// Create bootstrap settings.
    #[must_use]
    pub const fn new(iterations: usize, seed: u64) -> Self {
        Self { iterations, seed }
    }
}

/// Parameters for summarizing a single dataset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxplotParams {
    whisker_multiplier: f64,
    notch: bool,
    bootstrap: Option<Bootstrap>,
    user_median: Option<f64>,
    user_notch_interval: Option<Vec<f64>>,
}

impl Default for BoxplotParams {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxplotParams {
    /// Create parameters with a 1.5 IQR whisker and no notch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            whisker_multiplier: DEFAULT_WHISKER_MULTIPLIER,
            notch: false,
            bootstrap: None,
            user_median: None,
            user_notch_interval: None,
        }
    }

    /// Set the whisker reach in multiples of the IQR.
    #[must_use]
    pub fn whisker_multiplier(mut self, multiplier: f64) -> Self {
        self.whisker_multiplier = multiplier;
        self
    }

    /// Compute a notch around the median.
    #[must_use]
    pub fn notch(mut self, notch: bool) -> Self {
        self.notch = notch;
        self
    }

    /// Estimate the notch by bootstrap resampling.
    #[must_use]
    pub fn bootstrap(mut self, bootstrap: Option<Bootstrap>) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Replace the computed median (quartiles are unaffected).
    #[must_use]
    pub fn user_median(mut self, median: Option<f64>) -> Self {
        self.user_median = median;
        self
    }

    /// Use a caller-supplied notch interval; must hold exactly two values.
    #[must_use]
    pub fn user_notch_interval(mut self, interval: Option<Vec<f64>>) -> Self {
        self.user_notch_interval = interval;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.whisker_multiplier.is_finite() || self.whisker_multiplier < 0.0 {
            return Err(Error::invalid(format!(
                "whisker multiplier must be finite and non-negative, got {}",
                self.whisker_multiplier
            )));
        }
        if let Some(b) = self.bootstrap {
            if b.iterations == 0 {
                return Err(Error::invalid("bootstrap iterations must be at least 1"));
            }
        }
        Ok(())
    }
}

/// Summary statistics of one dataset.
///
/// Without a user median, `whisker_low <= q1 <= median <= q3 <= whisker_high`
/// holds and every outlier lies strictly outside the whiskers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxplotStat {
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median, or the user median when one was supplied.
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Interquartile range (Q3 - Q1).
    pub iqr: f64,
    /// Lowest sample inside the lower fence, or Q1.
    pub whisker_low: f64,
    /// Highest sample inside the upper fence, or Q3.
    pub whisker_high: f64,
    /// Samples below the low whisker, ascending.
    pub outliers_low: Vec<f64>,
    /// Samples above the high whisker, ascending.
    pub outliers_high: Vec<f64>,
    /// Confidence interval around the median, when requested.
    pub notch: Option<NotchInterval>,
    /// Number of samples.
    pub count: usize,
}

impl BoxplotStat {
    /// All outliers, low ones first.
    pub fn outliers(&self) -> impl Iterator<Item = f64> + '_ {
        self.outliers_low.iter().chain(&self.outliers_high).copied()
    }

    /// Smallest and largest value drawn for this box (fliers included).
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        let mut lo = self
            .outliers_low
            .first()
            .map_or(self.whisker_low, |&v| v.min(self.whisker_low));
        let mut hi = self
            .outliers_high
            .last()
            .map_or(self.whisker_high, |&v| v.max(self.whisker_high));
        if let Some(n) = self.notch {
            lo = lo.min(n.low);
            hi = hi.max(n.high);
        }
        (lo, hi)
    }
}

/// Summarize one dataset.
///
/// When bootstrap notches are requested the random source is a `StdRng`
/// seeded from [`Bootstrap::seed`], so repeated calls agree.
///
/// # Errors
///
/// Returns [`Error::EmptyData`] for an empty sample and
/// [`Error::InvalidArgument`] for a negative or non-finite whisker
/// multiplier, zero bootstrap iterations or a notch interval that does not
/// hold exactly two values.
pub fn compute_boxplot_stat(sample: &[f64], params: &BoxplotParams) -> Result<BoxplotStat> {
    match params.bootstrap {
        Some(b) => compute_boxplot_stat_with_rng(sample, params, &mut StdRng::seed_from_u64(b.seed)),
        None => summarize::<StdRng>(sample, params, None),
    }
}

/// Summarize one dataset, drawing bootstrap resamples from `rng`.
///
/// The seed stored in the parameters is ignored.
///
/// # Errors
///
/// See [`compute_boxplot_stat`].
pub fn compute_boxplot_stat_with_rng<R: Rng + ?Sized>(
    sample: &[f64],
    params: &BoxplotParams,
    rng: &mut R,
) -> Result<BoxplotStat> {
    summarize(sample, params, Some(rng))
}

fn summarize<R: Rng + ?Sized>(
    sample: &[f64],
    params: &BoxplotParams,
    rng: Option<&mut R>,
) -> Result<BoxplotStat> {
    if sample.is_empty() {
        return Err(Error::EmptyData);
    }
    params.validate()?;
    let user_interval = params
        .user_notch_interval
        .as_deref()
        .map(NotchInterval::from_values)
        .transpose()?;

    let data = sorted(sample);
    let n = data.len();
    let q1 = percentile(&data, 25.0);
    let q3 = percentile(&data, 75.0);
    let median = params.user_median.unwrap_or_else(|| percentile(&data, 50.0));
    let iqr = q3 - q1;

    let hi_fence = q3 + params.whisker_multiplier * iqr;
    let whisker_high = match data.iter().rev().find(|&&v| v <= hi_fence) {
        Some(&v) if v >= q3 => v,
        _ => q3,
    };
    let lo_fence = q1 - params.whisker_multiplier * iqr;
    let whisker_low = match data.iter().find(|&&v| v >= lo_fence) {
        Some(&v) if v <= q1 => v,
        _ => q1,
    };

    let outliers_low: Vec<f64> = data.iter().copied().take_while(|&v| v < whisker_low).collect();
    let outliers_high: Vec<f64> = data.iter().copied().filter(|&v| v > whisker_high).collect();

    let notch = if params.notch {
        Some(match (user_interval, params.bootstrap, rng) {
            (Some(ci), _, _) => ci,
            (None, Some(b), Some(rng)) => NotchInterval::bootstrap(sample, b.iterations, rng)?,
            _ => NotchInterval::gaussian(median, iqr, n),
        })
    } else {
        None
    };

    tracing::trace!(n, q1, median, q3, outliers = outliers_low.len() + outliers_high.len(), "box stats");

    Ok(BoxplotStat {
        q1,
        median,
        q3,
        iqr,
        whisker_low,
        whisker_high,
        outliers_low,
        outliers_high,
        notch,
        count: n,
    })
}

/// Settings for summarizing several datasets at once.
///
/// Per-group overrides, when present, must have one entry per group;
/// `None` entries fall back to the computed value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxplotOptions {
    params: BoxplotParams,
    medians: Option<Vec<Option<f64>>>,
    conf_intervals: Option<Vec<Option<Vec<f64>>>>,
}

impl BoxplotOptions {
    /// Create options with default parameters and no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared parameters for every group.
    #[must_use]
    pub fn params(mut self, params: BoxplotParams) -> Self {
        self.params = params;
        self
    }

    /// Per-group medians.
    #[must_use]
    pub fn medians(mut self, medians: Vec<Option<f64>>) -> Self {
        self.medians = Some(medians);
        self
    }

    /// Per-group notch intervals.
    #[must_use]
    pub fn conf_intervals(mut self, intervals: Vec<Option<Vec<f64>>>) -> Self {
        self.conf_intervals = Some(intervals);
        self
    }

    /// Shared parameters.
    #[must_use]
    pub fn shared(&self) -> &BoxplotParams {
        &self.params
    }

    fn check_group_count(&self, groups: usize) -> Result<()> {
        if let Some(m) = &self.medians {
            if m.len() != groups {
                return Err(Error::invalid(format!(
                    "medians' length must be compatible with the data: {} medians for {groups} groups",
                    m.len()
                )));
            }
        }
        if let Some(c) = &self.conf_intervals {
            if c.len() != groups {
                return Err(Error::invalid(format!(
                    "conf_intervals' length must be compatible with the data: {} intervals for {groups} groups",
                    c.len()
                )));
            }
            if let Some(bad) = c.iter().flatten().find(|ci| ci.len() != 2) {
                return Err(Error::invalid(format!(
                    "each conf_interval, if specified, must have two values, got {}",
                    bad.len()
                )));
            }
        }
        Ok(())
    }

    /// Parameters for group `index`, with its overrides applied.
    ///
    /// Bootstrap seeds are offset by the group index so groups draw
    /// independent resamples regardless of evaluation order.
    #[must_use]
    pub fn params_for(&self, index: usize) -> BoxplotParams {
        let mut params = self.params.clone();
        if let Some(m) = self.medians.as_ref().and_then(|m| m.get(index).copied().flatten()) {
            params.user_median = Some(m);
        }
        if let Some(ci) = self
            .conf_intervals
            .as_ref()
            .and_then(|c| c.get(index).cloned().flatten())
        {
            params.user_notch_interval = Some(ci);
        }
        if let Some(b) = params.bootstrap.as_mut() {
            b.seed = b.seed.wrapping_add(index as u64);
        }
        params
    }
}

/// Summarize every dataset of `input`.
///
/// Returns one entry per group; empty groups are skipped and yield `None`
/// so that positions still line up with the input.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a malformed input shape or
/// override lists whose length differs from the number of groups, and any
/// error of [`compute_boxplot_stat`].
pub fn boxplot_stats(input: SampleInput, options: &BoxplotOptions) -> Result<Vec<Option<BoxplotStat>>> {
    let groups = input.into_groups()?;
    options.check_group_count(groups.len())?;
    tracing::debug!(groups = groups.len(), "computing box plot statistics");

    let summarize_group = |(i, group): (usize, &Vec<f64>)| -> Result<Option<BoxplotStat>> {
        if group.is_empty() {
            return Ok(None);
        }
        compute_boxplot_stat(group, &options.params_for(i)).map(Some)
    };

    #[cfg(feature = "parallel")]
    let stats: Result<Vec<Option<BoxplotStat>>> = {
        use rayon::prelude::*;
        groups.par_iter().enumerate().map(summarize_group).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let stats: Result<Vec<Option<BoxplotStat>>> =
        groups.iter().enumerate().map(summarize_group).collect();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    #[test]
    fn test_known_values() {
        let stat = compute_boxplot_stat(&one_to_ten(), &BoxplotParams::new()).unwrap();
        assert_relative_eq!(stat.q1, 3.25);
        assert_relative_eq!(stat.median, 5.5);
        assert_relative_eq!(stat.q3, 7.75);
        assert_relative_eq!(stat.iqr, 4.5);
        assert_eq!(stat.whisker_low, 1.0);
        assert_eq!(stat.whisker_high, 10.0);
        assert_eq!(stat.outliers().count(), 0);
        assert!(stat.notch.is_none());
        assert_eq!(stat.count, 10);
    }

    #[test]
    fn test_outliers_split() {
        let data = vec![-50.0, 1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let stat = compute_boxplot_stat(&data, &BoxplotParams::new()).unwrap();
        assert_eq!(stat.outliers_low, vec![-50.0]);
        assert_eq!(stat.outliers_high, vec![100.0]);
        assert_eq!(stat.whisker_low, 1.0);
        assert_eq!(stat.whisker_high, 5.0);
        assert_eq!(stat.value_range(), (-50.0, 100.0));
    }

    #[test]
    fn test_zero_multiplier_clamps_whiskers_to_quartiles() {
        let stat =
            compute_boxplot_stat(&one_to_ten(), &BoxplotParams::new().whisker_multiplier(0.0))
                .unwrap();
        // No sample sits exactly on a quartile, so whiskers fall back to them.
        assert_relative_eq!(stat.whisker_low, 3.25);
        assert_relative_eq!(stat.whisker_high, 7.75);
        assert_eq!(stat.outliers_low, vec![1.0, 2.0, 3.0]);
        assert_eq!(stat.outliers_high, vec![8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_single_sample() {
        let stat = compute_boxplot_stat(&[42.0], &BoxplotParams::new().notch(true)).unwrap();
        assert_eq!(stat.median, 42.0);
        assert_eq!(stat.whisker_low, 42.0);
        assert_eq!(stat.whisker_high, 42.0);
        assert_eq!(stat.notch, Some(NotchInterval { low: 42.0, high: 42.0 }));
    }

    #[test]
    fn test_empty_sample_rejected() {
        assert_eq!(compute_boxplot_stat(&[], &BoxplotParams::new()), Err(Error::EmptyData));
    }

    #[test]
    fn test_invalid_params() {
        let data = one_to_ten();
        assert!(compute_boxplot_stat(&data, &BoxplotParams::new().whisker_multiplier(-1.0)).is_err());
        assert!(compute_boxplot_stat(
            &data,
            &BoxplotParams::new().whisker_multiplier(f64::NAN)
        )
        .is_err());
        assert!(compute_boxplot_stat(
            &data,
            &BoxplotParams::new().notch(true).bootstrap(Some(Bootstrap::new(0, 1)))
        )
        .is_err());
        assert!(compute_boxplot_stat(
            &data,
            &BoxplotParams::new().notch(true).user_notch_interval(Some(vec![1.0]))
        )
        .is_err());
    }

    #[test]
    fn test_gaussian_notch() {
        let stat = compute_boxplot_stat(&one_to_ten(), &BoxplotParams::new().notch(true)).unwrap();
        let ci = stat.notch.unwrap();
        let half = 1.57 * 4.5 / 10f64.sqrt();
        assert_relative_eq!(ci.low, 5.5 - half, max_relative = 1e-12);
        assert_relative_eq!(ci.high, 5.5 + half, max_relative = 1e-12);
    }

    #[test]
    fn test_user_median_moves_notch_not_quartiles() {
        let params = BoxplotParams::new().notch(true).user_median(Some(6.0));
        let stat = compute_boxplot_stat(&one_to_ten(), &params).unwrap();
        assert_eq!(stat.median, 6.0);
        assert_relative_eq!(stat.q1, 3.25);
        assert_relative_eq!(stat.q3, 7.75);
        let ci = stat.notch.unwrap();
        assert_relative_eq!((ci.low + ci.high) / 2.0, 6.0, max_relative = 1e-12);
    }

    #[test]
    fn test_user_interval_wins() {
        let params = BoxplotParams::new()
            .notch(true)
            .bootstrap(Some(Bootstrap::new(100, 3)))
            .user_notch_interval(Some(vec![6.0, 4.0]));
        let stat = compute_boxplot_stat(&one_to_ten(), &params).unwrap();
        assert_eq!(stat.notch, Some(NotchInterval { low: 4.0, high: 6.0 }));
    }

    #[test]
    fn test_bootstrap_notch_reproducible() {
        let params = BoxplotParams::new()
            .notch(true)
            .bootstrap(Some(Bootstrap::new(500, 42)));
        let a = compute_boxplot_stat(&one_to_ten(), &params).unwrap();
        let b = compute_boxplot_stat(&one_to_ten(), &params).unwrap();
        assert_eq!(a, b);
        let ci = a.notch.unwrap();
        assert!(ci.low >= 1.0 && ci.high <= 10.0 && ci.low <= ci.high);
    }

    #[test]
    fn test_bootstrap_with_caller_rng() {
        let params = BoxplotParams::new()
            .notch(true)
            .bootstrap(Some(Bootstrap::new(200, 0)));
        let mut rng = StdRng::seed_from_u64(99);
        let stat = compute_boxplot_stat_with_rng(&one_to_ten(), &params, &mut rng).unwrap();
        assert!(stat.notch.is_some());
    }

    #[test]
    fn test_notch_off_ignores_bootstrap() {
        let params = BoxplotParams::new().bootstrap(Some(Bootstrap::new(10, 0)));
        let stat = compute_boxplot_stat(&one_to_ten(), &params).unwrap();
        assert!(stat.notch.is_none());
    }

    #[test]
    fn test_unsorted_input() {
        let data = vec![10.0, 1.0, 7.0, 3.0, 5.0, 2.0, 9.0, 4.0, 8.0, 6.0];
        let a = compute_boxplot_stat(&data, &BoxplotParams::new()).unwrap();
        let b = compute_boxplot_stat(&one_to_ten(), &BoxplotParams::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_boxplot_stats_skips_empty_groups() {
        let input = SampleInput::from(vec![one_to_ten(), vec![], vec![1.0, 2.0]]);
        let stats = boxplot_stats(input, &BoxplotOptions::new()).unwrap();
        assert_eq!(stats.len(), 3);
        assert!(stats[0].is_some());
        assert!(stats[1].is_none());
        assert_eq!(stats[2].as_ref().unwrap().count, 2);
    }

    #[test]
    fn test_boxplot_stats_overrides() {
        let options = BoxplotOptions::new()
            .params(BoxplotParams::new().notch(true))
            .medians(vec![None, Some(1.5)])
            .conf_intervals(vec![Some(vec![5.0, 6.0]), None]);
        let input = SampleInput::from(vec![one_to_ten(), vec![1.0, 2.0, 3.0]]);
        let stats = boxplot_stats(input, &options).unwrap();
        let first = stats[0].as_ref().unwrap();
        let second = stats[1].as_ref().unwrap();
        assert_eq!(first.notch, Some(NotchInterval { low: 5.0, high: 6.0 }));
        assert_eq!(second.median, 1.5);
    }

    #[test]
    fn test_boxplot_stats_override_length_mismatch() {
        let input = || SampleInput::from(vec![one_to_ten(), one_to_ten()]);
        let medians = BoxplotOptions::new().medians(vec![Some(1.0)]);
        assert!(matches!(boxplot_stats(input(), &medians), Err(Error::InvalidArgument(_))));

        let intervals = BoxplotOptions::new().conf_intervals(vec![None, Some(vec![1.0, 2.0, 3.0])]);
        assert!(matches!(boxplot_stats(input(), &intervals), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_params_for_offsets_seed() {
        let options =
            BoxplotOptions::new().params(BoxplotParams::new().bootstrap(Some(Bootstrap::new(5, 10))));
        assert_eq!(options.params_for(0).bootstrap, Some(Bootstrap::new(5, 10)));
        assert_eq!(options.params_for(3).bootstrap, Some(Bootstrap::new(5, 13)));
        assert_eq!(options.shared().whisker_multiplier, DEFAULT_WHISKER_MULTIPLIER);
    }
}
