//! Reduction of the values accumulated in one cell to a single aggregate.

use std::fmt;
use std::sync::Arc;

use crate::stats::{median, sorted};

/// Caller-supplied reduction.
pub type ReduceFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// How a cell's values collapse to its aggregate.
///
/// Reducing an empty slice yields NaN for every built-in reducer except
/// [`Reducer::Sum`] and [`Reducer::Count`], which yield 0.
#[derive(Clone, Default)]
pub enum Reducer {
    /// Arithmetic mean.
    #[default]
    Mean,
    /// Sum.
    Sum,
    /// Median (linear interpolation between the two middle values).
    Median,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Number of values.
    Count,
    /// Any pure function of the values.
    Custom(ReduceFn),
}

impl Reducer {
    /// Wrap a closure as a reducer.
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Reduce `values` to a single aggregate.
    #[must_use]
    pub fn reduce(&self, values: &[f64]) -> f64 {
        match self {
            Self::Mean => {
                if values.is_empty() {
                    f64::NAN
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            Self::Sum => values.iter().sum(),
            Self::Median => median(&sorted(values)),
            Self::Min => values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
            Self::Max => values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
            Self::Count => values.len() as f64,
            Self::Custom(f) => f(values),
        }
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => f.write_str("Mean"),
            Self::Sum => f.write_str("Sum"),
            Self::Median => f.write_str("Median"),
            Self::Min => f.write_str("Min"),
            Self::Max => f.write_str("Max"),
            Self::Count => f.write_str("Count"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_reducers() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(Reducer::Mean.reduce(&v), 2.5);
        assert_relative_eq!(Reducer::Sum.reduce(&v), 10.0);
        assert_relative_eq!(Reducer::Median.reduce(&v), 2.5);
        assert_relative_eq!(Reducer::Min.reduce(&v), 1.0);
        assert_relative_eq!(Reducer::Max.reduce(&v), 4.0);
        assert_relative_eq!(Reducer::Count.reduce(&v), 4.0);
    }

    #[test]
    fn test_empty() {
        assert!(Reducer::Mean.reduce(&[]).is_nan());
        assert!(Reducer::Median.reduce(&[]).is_nan());
        assert!(Reducer::Min.reduce(&[]).is_nan());
        assert!(Reducer::Max.reduce(&[]).is_nan());
        assert_eq!(Reducer::Sum.reduce(&[]), 0.0);
        assert_eq!(Reducer::Count.reduce(&[]), 0.0);
    }

    #[test]
    fn test_custom() {
        let range = Reducer::custom(|v| {
            let max = v.iter().copied().fold(f64::MIN, f64::max);
            let min = v.iter().copied().fold(f64::MAX, f64::min);
            max - min
        });
        assert_relative_eq!(range.reduce(&[2.0, 9.0, 5.0]), 7.0);
        assert_eq!(format!("{range:?}"), "Custom(..)");
    }

    #[test]
    fn test_default_is_mean() {
        assert!(matches!(Reducer::default(), Reducer::Mean));
    }
}
