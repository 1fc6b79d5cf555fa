//! Order statistics with linear interpolation.

/// Copy and sort a sample in ascending order.
///
/// Uses IEEE total ordering, so any NaN sorts to the end instead of
/// poisoning the comparison.
#[must_use]
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Calculate a percentile of sorted data using linear interpolation.
///
/// For percentile `p` on `N` samples the value is interpolated at rank
/// `p / 100 * (N - 1)`. `p` is clamped to `[0, 100]`. Returns NaN for an
/// empty slice.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let k = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let f = k.floor() as usize;
            let c = (k.ceil() as usize).min(n - 1);
            if f == c {
                sorted[f]
            } else {
                let d = k - f as f64;
                sorted[f] + (sorted[c] - sorted[f]) * d
            }
        }
    }
}

/// Calculate several percentiles of sorted data.
#[must_use]
pub fn percentiles(sorted: &[f64], ps: &[f64]) -> Vec<f64> {
    ps.iter().map(|&p| percentile(sorted, p)).collect()
}

/// Median of sorted data.
#[must_use]
pub fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}
