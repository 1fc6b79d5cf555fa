//! End-to-end tests through the public API.
//!
//! Run: cargo test --test integration_test

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use trueno_axes::prelude::*;
use trueno_axes::extent::{compute_view, DEFAULT_LOG_VIEW};
use trueno_axes::hexbin::{CellId, MarginalBar, Sublattice};
use trueno_axes::plots::ArraySink;

// ============================================================================
// Extent Tracker
// ============================================================================

#[test]
fn test_view_with_margin() {
    let bbox = BoundingBox::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
    let view = compute_view(
        &bbox,
        MarginPolicy::uniform(0.05).unwrap(),
        AxisScale::Linear,
        AxisScale::Linear,
    );
    assert_relative_eq!(view.x.min, -0.5);
    assert_relative_eq!(view.x.max, 10.5);
}

#[test]
fn test_tracker_accumulates_then_resets_after_clear() {
    let mut tracker = ExtentTracker::new();
    tracker.update(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    tracker.update(&[Point::new(5.0, -2.0)]);
    let limits = tracker.data_limits();
    assert_eq!(limits.x_span(), Some(Interval::new(0.0, 5.0)));
    assert_eq!(limits.y_span(), Some(Interval::new(-2.0, 1.0)));

    tracker.clear();
    tracker.update(&[Point::new(100.0, 100.0)]);
    assert_eq!(tracker.data_limits().x_span(), Some(Interval::new(100.0, 100.0)));
}

#[test]
fn test_nan_degrades_view_without_error() {
    let mut tracker = ExtentTracker::new();
    tracker.update(&[Point::new(1.0, 1.0), Point::new(f64::NAN, 2.0)]);
    let view = tracker.autoscale_view(false);
    assert!(!view.x.is_finite());
    assert!(view.y.is_finite());
}

#[test]
fn test_log_view_without_positive_data() {
    let tracker = {
        let mut t = ExtentTracker::new().scales(AxisScale::Log, AxisScale::Linear);
        t.update(&[Point::new(-3.0, 1.0), Point::new(0.0, 2.0)]);
        t
    };
    assert_eq!(tracker.compute_view(false).x, DEFAULT_LOG_VIEW);
}

#[test]
fn test_log_view_margin_in_decades() {
    let mut tracker = ExtentTracker::new()
        .scales(AxisScale::Log, AxisScale::Linear)
        .margins(MarginPolicy::new(0.5, 0.0).unwrap());
    tracker.update(&[Point::new(10.0, 0.0), Point::new(100.0, 1.0)]);
    let view = tracker.autoscale_view(false);
    assert_relative_eq!(view.x.min, 10f64.powf(0.5), max_relative = 1e-12);
    assert_relative_eq!(view.x.max, 10f64.powf(2.5), max_relative = 1e-12);
}

// ============================================================================
// Box plots
// ============================================================================

#[test]
fn test_boxplot_known_values() {
    let sample: Vec<f64> = (1..=10).map(f64::from).collect();
    let stat = compute_boxplot_stat(&sample, &BoxplotParams::new().whisker_multiplier(1.5)).unwrap();
    assert_relative_eq!(stat.q1, 3.25);
    assert_relative_eq!(stat.median, 5.5);
    assert_relative_eq!(stat.q3, 7.75);
    assert_eq!(stat.whisker_low, 1.0);
    assert_eq!(stat.whisker_high, 10.0);
    assert!(stat.outliers_low.is_empty() && stat.outliers_high.is_empty());
}

#[test]
fn test_boxplot_empty_sample_is_invalid_argument() {
    let err = compute_boxplot_stat(&[], &BoxplotParams::new()).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_boxplot_notch_interval_wrong_arity() {
    let params = BoxplotParams::new()
        .notch(true)
        .user_notch_interval(Some(vec![1.0, 2.0, 3.0]));
    let err = compute_boxplot_stat(&[1.0, 2.0, 3.0], &params).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_boxplot_bootstrap_zero_iterations_rejected() {
    let params = BoxplotParams::new()
        .notch(true)
        .bootstrap(Some(Bootstrap { iterations: 0, seed: 1 }));
    assert!(compute_boxplot_stat(&[1.0, 2.0], &params).is_err());
}

#[test]
fn test_matrix_input_one_dataset_per_column() {
    // 3 rows x 2 columns, row-major.
    let input = SampleInput::Matrix {
        rows: 3,
        cols: 2,
        data: vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0],
    };
    let stats = boxplot_stats(input, &BoxplotOptions::new()).unwrap();
    assert_eq!(stats.len(), 2);
    assert_relative_eq!(stats[0].as_ref().unwrap().median, 2.0);
    assert_relative_eq!(stats[1].as_ref().unwrap().median, 20.0);
}

#[test]
fn test_per_group_conf_intervals() {
    let options = BoxplotOptions::new()
        .params(BoxplotParams::new().notch(true))
        .conf_intervals(vec![Some(vec![4.0, 3.0]), None]);
    let input = SampleInput::Groups(vec![vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 2.0, 3.0, 4.0, 5.0]]);
    let stats = boxplot_stats(input, &options).unwrap();
    let first = stats[0].as_ref().unwrap().notch.unwrap();
    assert_eq!((first.low, first.high), (3.0, 4.0));
    let second = stats[1].as_ref().unwrap().notch.unwrap();
    assert!(second.low < 3.0 && second.high > 3.0);
}

#[test]
fn test_horizontal_boxplot_on_axes() {
    let mut axes = Axes::new();
    let view = axes
        .boxplot(
            BoxPlot::new().data(vec![1.0, 2.0, 3.0, 4.0, 5.0]).vertical(false),
            &mut PlotStyleContext::new(),
        )
        .unwrap();
    assert_relative_eq!(view.x.min, 1.0);
    assert_relative_eq!(view.x.max, 5.0);
    assert_relative_eq!(view.y.min, 0.925);
    assert_relative_eq!(view.y.max, 1.075);
}

// ============================================================================
// Hex binning
// ============================================================================

#[test]
fn test_hexbin_count_mode_sum_equals_points_in_range() {
    // Every fifth point lies far outside the binned rectangle.
    let xs: Vec<f64> = (0..500)
        .map(|i| if i % 5 == 0 { 50.0 } else { f64::from(i % 31) })
        .collect();
    let ys: Vec<f64> = (0..500).map(|i| f64::from(i % 23)).collect();
    let binner = HexBinner::new(
        HexbinConfig::new()
            .grid_size(GridSize::Explicit { nx: 12, ny: 7 })
            .extent((0.0, 30.0), (0.0, 30.0))
            .min_count(0),
    )
    .unwrap();
    let in_range = xs.iter().filter(|&&x| x <= 30.0).count();
    let result = binner.bin_xy(&xs, &ys, None).unwrap();
    assert_eq!(result.total_count(), in_range);
    let sum: f64 = result.values().iter().sum();
    assert_relative_eq!(sum, in_range as f64);
}

#[test]
fn test_hexbin_values_reduced_per_cell() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(2.0, 2.0)];
    let values = [1.0, 5.0, 3.0, 7.0];
    let config = |reducer| {
        HexbinConfig::new()
            .grid_size(GridSize::Explicit { nx: 2, ny: 2 })
            .reducer(reducer)
    };

    let max = HexBinner::new(config(Reducer::Max)).unwrap().bin(&points, Some(&values[..])).unwrap();
    assert_eq!(max.bins()[0].cell, CellId::new(Sublattice::A, 0, 0));
    assert_relative_eq!(max.bins()[0].value, 5.0);

    let median = HexBinner::new(config(Reducer::Median)).unwrap().bin(&points, Some(&values[..])).unwrap();
    assert_relative_eq!(median.bins()[0].value, 3.0);

    let sum = HexBinner::new(config(Reducer::Sum)).unwrap().bin(&points, Some(&values[..])).unwrap();
    assert_relative_eq!(sum.bins()[1].value, 7.0);
}

#[test]
fn test_hexbin_value_mode_min_count() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(2.0, 2.0)];
    let values = [1.0, 3.0, 7.0];
    let binner = HexBinner::new(
        HexbinConfig::new()
            .grid_size(GridSize::Explicit { nx: 2, ny: 2 })
            .min_count(1),
    )
    .unwrap();
    let result = binner.bin(&points, Some(&values[..])).unwrap();
    assert_eq!(result.bins().len(), 1);
    assert_relative_eq!(result.bins()[0].value, 2.0);
}

#[test]
fn test_hexbin_log_scale_rejects_non_positive() {
    let binner = HexBinner::new(HexbinConfig::new().scales(AxisScale::Log, AxisScale::Log)).unwrap();
    let err = binner.bin_xy(&[1.0, 2.0], &[-1.0, 2.0], None).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_hexbin_quantized_bins() {
    let mut points = vec![Point::new(0.0, 0.0); 10];
    points.push(Point::new(4.0, 4.0));
    let binner = HexBinner::new(
        HexbinConfig::new()
            .grid_size(GridSize::Explicit { nx: 4, ny: 4 })
            .min_count(0)
            .bins(BinScale::Quantized(3)),
    )
    .unwrap();
    let result = binner.bin(&points, None).unwrap();
    // Counts 10 and 1 against edges [1, 5.5].
    assert_eq!(result.values(), vec![2.0, 0.0]);
}

#[test]
fn test_hexbin_marginals_on_log_axis() {
    let xs: Vec<f64> = (0..40).map(|i| 10f64.powf(f64::from(i) / 10.0)).collect();
    let ys: Vec<f64> = (0..40).map(f64::from).collect();
    let binner = HexBinner::new(
        HexbinConfig::new()
            .grid_size(GridSize::Explicit { nx: 4, ny: 2 })
            .scales(AxisScale::Log, AxisScale::Linear)
            .marginals(true)
            .reducer(Reducer::Count),
    )
    .unwrap();
    let result = binner.bin_xy(&xs, &ys, None).unwrap();
    let marginals = result.marginals().unwrap();
    let counted: f64 = marginals.x.iter().map(|b: &MarginalBar| b.value).sum();
    assert_relative_eq!(counted, 40.0);
    assert!(marginals.x.iter().all(|b| b.lo > 0.0 && b.lo < b.hi));
}

#[test]
fn test_hexbin_on_axes_feeds_colormap() {
    let mut axes = Axes::new();
    let xs: Vec<f64> = (0..100).map(|i| f64::from(i) * 0.1).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
    axes.hexbin(
        &xs,
        &ys,
        None,
        HexbinConfig::new().grid_size(GridSize::Square(10)).min_count(0),
        &mut PlotStyleContext::new(),
    )
    .unwrap();

    let Artist::Hexbin(hexes) = &axes.artists()[0] else {
        panic!("expected a hexagon collection");
    };
    let mut sink: Vec<f64> = Vec::new();
    hexes.feed(&mut sink);
    assert_eq!(sink.len(), hexes.len());
    assert_relative_eq!(sink.iter().sum::<f64>(), 100.0);
    sink.set_array(&[1.0]);
    assert_eq!(sink, vec![1.0]);
}
