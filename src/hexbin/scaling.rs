//! Post-threshold rescaling of hex-bin aggregates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats::sorted;

/// How aggregates are rescaled before they reach the color mapping.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinScale {
    /// Aggregates are passed through unchanged.
    #[default]
    Linear,
    /// `log10(v + 1)`.
    Log,
    /// Index of each aggregate among `n - 1` equally spaced edges between the
    /// smallest and largest aggregate.
    Quantized(usize),
    /// Index of each aggregate among caller-supplied edges.
    Edges(Vec<f64>),
}

impl BinScale {
    /// Reject settings that cannot produce indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for zero quantization levels or
    /// non-finite edges.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Quantized(0) => Err(Error::invalid("quantized bins need at least one level")),
            Self::Edges(edges) if edges.iter().any(|e| !e.is_finite()) => {
                Err(Error::invalid("bin edges must be finite"))
            }
            _ => Ok(()),
        }
    }

    /// Rescale `values` in place.
    pub fn apply(&self, values: &mut [f64]) {
        match self {
            Self::Linear => {}
            Self::Log => {
                for v in values.iter_mut() {
                    *v = (*v + 1.0).log10();
                }
            }
            Self::Quantized(levels) => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let steps = levels.saturating_sub(1);
                let edges: Vec<f64> = (0..steps)
                    .map(|k| min + (max - min) * k as f64 / steps as f64)
                    .collect();
                index_into(&edges, values);
            }
            Self::Edges(edges) => index_into(&sorted(edges), values),
        }
    }
}

/// Replace each value by the number of edges strictly below it.
fn index_into(edges: &[f64], values: &mut [f64]) {
    for v in values.iter_mut() {
        let value = *v;
        *v = edges.partition_point(|&e| e < value) as f64;
    }
}
