//! Coarse per-axis bars summarizing the binned points along each axis.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::reduce::Reducer;
use crate::extent::Interval;
use crate::scale::AxisScale;

/// One coarse bar along an axis, bounds in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginalBar {
    /// Lower bound of the bar.
    pub lo: f64,
    /// Upper bound of the bar.
    pub hi: f64,
    /// Reduced value of the points in the bar.
    pub value: f64,
}

/// Marginal bars along both axes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Marginals {
    /// Bars below the x axis.
    pub x: Vec<MarginalBar>,
    /// Bars beside the y axis.
    pub y: Vec<MarginalBar>,
}

/// Split `extent` (layout space) into `bars` equal bars and reduce the
/// values of the coordinates falling in each.
///
/// Coordinates beyond the extent are clipped into the first or last bar.
/// Empty bars and bars reducing to NaN are omitted.
pub(crate) fn coarse_bars(
    coords: &[f64],
    values: Option<&[f64]>,
    extent: Interval,
    bars: usize,
    reducer: &Reducer,
    scale: AxisScale,
) -> Vec<MarginalBar> {
    if bars == 0 {
        return Vec::new();
    }

    let width = extent.span() / bars as f64;
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); bars];
    for (i, &c) in coords.iter().enumerate() {
        if !c.is_finite() {
            continue;
        }
        let slot = ((c - extent.min) / width).floor().clamp(0.0, (bars - 1) as f64) as usize;
        buckets[slot].push(values.map_or(1.0, |v| v[i]));
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, bucket)| !bucket.is_empty())
        .filter_map(|(i, bucket)| {
            let value = reducer.reduce(bucket);
            (!value.is_nan()).then(|| MarginalBar {
                lo: scale.inverse(extent.min + i as f64 * width),
                hi: scale.inverse(extent.min + (i + 1) as f64 * width),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_per_bar() {
        let coords = [0.5, 1.5, 1.6, 3.9];
        let bars = coarse_bars(
            &coords,
            None,
            Interval::new(0.0, 4.0),
            4,
            &Reducer::Sum,
            AxisScale::Linear,
        );
        // Bar [2, 3) is empty and omitted.
        assert_eq!(bars.len(), 3);
        assert_relative_eq!(bars[0].value, 1.0);
        assert_relative_eq!(bars[1].value, 2.0);
        assert_relative_eq!(bars[1].lo, 1.0);
        assert_relative_eq!(bars[1].hi, 2.0);
        assert_relative_eq!(bars[2].lo, 3.0);
    }

    #[test]
    fn test_bar_count_matches_grid_size() {
        // One coordinate per bar: 5 bars share 6 edges from 0 to 100.
        let coords = [10.0, 30.0, 50.0, 70.0, 90.0];
        let bars = coarse_bars(
            &coords,
            None,
            Interval::new(0.0, 100.0),
            5,
            &Reducer::Count,
            AxisScale::Linear,
        );
        assert_eq!(bars.len(), 5);
        let edges: Vec<f64> = bars.iter().map(|b| b.lo).chain(bars.last().map(|b| b.hi)).collect();
        assert_eq!(edges.len(), 6);
        for (edge, expected) in edges.iter().zip([0.0, 20.0, 40.0, 60.0, 80.0, 100.0]) {
            assert_relative_eq!(*edge, expected);
        }
    }

    #[test]
    fn test_values_reduced() {
        let bars = coarse_bars(
            &[0.1, 0.2, 0.9],
            Some(&[2.0, 4.0, 10.0][..]),
            Interval::new(0.0, 1.0),
            2,
            &Reducer::Mean,
            AxisScale::Linear,
        );
        assert_eq!(bars.len(), 2);
        assert_relative_eq!(bars[0].value, 3.0);
        assert_relative_eq!(bars[1].value, 10.0);
    }

    #[test]
    fn test_clips_out_of_extent() {
        let bars = coarse_bars(
            &[-5.0, 50.0],
            None,
            Interval::new(0.0, 10.0),
            5,
            &Reducer::Count,
            AxisScale::Linear,
        );
        assert_eq!(bars.len(), 2);
        assert_relative_eq!(bars[0].lo, 0.0);
        assert_relative_eq!(bars[1].hi, 10.0);
    }

    #[test]
    fn test_log_bounds_in_data_space() {
        let bars = coarse_bars(
            &[0.5],
            None,
            Interval::new(0.0, 2.0),
            2,
            &Reducer::Count,
            AxisScale::Log,
        );
        assert_relative_eq!(bars[0].lo, 1.0);
        assert_relative_eq!(bars[0].hi, 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_nan_bars_omitted() {
        let nan = Reducer::custom(|_| f64::NAN);
        let bars = coarse_bars(&[0.5], None, Interval::new(0.0, 1.0), 1, &nan, AxisScale::Linear);
        assert!(bars.is_empty());
    }
}
