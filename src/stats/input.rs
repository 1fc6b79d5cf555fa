//! Argument shapes accepted for multi-dataset statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One or more datasets, in one of the shapes callers commonly hold them.
///
/// The shape is resolved once by [`SampleInput::into_groups`]; downstream
/// code only ever sees a list of groups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleInput {
    /// A single dataset.
    Single(Vec<f64>),
    /// One dataset per inner vector.
    Groups(Vec<Vec<f64>>),
    /// Row-major 2-D array. A single row or a single column is one dataset;
    /// otherwise every column is a dataset.
    Matrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
        /// `rows * cols` values, row by row.
        data: Vec<f64>,
    },
}

impl SampleInput {
    /// Resolve the shape into a list of datasets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a matrix's data length does not
    /// equal `rows * cols`, or that product overflows.
    pub fn into_groups(self) -> Result<Vec<Vec<f64>>> {
        match self {
            Self::Single(data) => Ok(vec![data]),
            Self::Groups(groups) => Ok(groups),
            Self::Matrix { rows, cols, data } => {
                let needed = rows
                    .checked_mul(cols)
                    .ok_or_else(|| Error::invalid(format!("matrix of {rows}x{cols} is too large")))?;
                if data.len() != needed {
                    return Err(Error::invalid(format!(
                        "matrix of {rows}x{cols} needs {needed} values, got {}",
                        data.len()
                    )));
                }
                if rows == 1 || cols == 1 {
                    return Ok(vec![data]);
                }
                Ok((0..cols)
                    .map(|c| data.iter().skip(c).step_by(cols).copied().collect())
                    .collect())
            }
        }
    }
}

impl From<Vec<f64>> for SampleInput {
    fn from(data: Vec<f64>) -> Self {
        Self::Single(data)
    }
}

impl From<&[f64]> for SampleInput {
    fn from(data: &[f64]) -> Self {
        Self::Single(data.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for SampleInput {
    fn from(groups: Vec<Vec<f64>>) -> Self {
        Self::Groups(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let groups = SampleInput::from(vec![1.0, 2.0]).into_groups().unwrap();
        assert_eq!(groups, vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_groups_pass_through() {
        let input = SampleInput::from(vec![vec![1.0], vec![], vec![2.0, 3.0]]);
        assert_eq!(input.into_groups().unwrap().len(), 3);
    }

    #[test]
    fn test_matrix_columns() {
        let input = SampleInput::Matrix {
            rows: 3,
            cols: 2,
            data: vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0],
        };
        assert_eq!(
            input.into_groups().unwrap(),
            vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]]
        );
    }

    #[test]
    fn test_matrix_single_row_or_column() {
        let row = SampleInput::Matrix {
            rows: 1,
            cols: 3,
            data: vec![1.0, 2.0, 3.0],
        };
        assert_eq!(row.into_groups().unwrap(), vec![vec![1.0, 2.0, 3.0]]);

        let col = SampleInput::Matrix {
            rows: 3,
            cols: 1,
            data: vec![1.0, 2.0, 3.0],
        };
        assert_eq!(col.into_groups().unwrap(), vec![vec![1.0, 2.0, 3.0]]);
    }

    #[test]
    fn test_matrix_shape_mismatch() {
        let input = SampleInput::Matrix {
            rows: 2,
            cols: 2,
            data: vec![1.0, 2.0, 3.0],
        };
        assert!(matches!(input.into_groups(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_matrix_shape_overflow() {
        let input = SampleInput::Matrix {
            rows: usize::MAX,
            cols: 2,
            data: vec![1.0],
        };
        assert!(matches!(input.into_groups(), Err(Error::InvalidArgument(_))));
    }
}
