//! Gauss-Jordan elimination on the augmented matrix `[A | I]`

use crate::error::{MatrixError, Result};
use crate::inverse::{InversionParams, Inverter, Pivoting};
use crate::matrix::Matrix;
use tracing::debug;

/// Default inversion routine
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussJordan;

impl Inverter for GaussJordan {
    fn invert(&self, matrix: &Matrix, params: &InversionParams) -> Result<Matrix> {
        if !matrix.is_square() {
            return Err(MatrixError::dimension_mismatch(
                "square matrix",
                format!("{}x{}", matrix.rows(), matrix.cols()),
            ));
        }

        let n = matrix.rows();
        let width = 2 * n;
        debug!("Inverting {}x{} matrix ({} pivoting)", n, n, params.pivoting);

        let mut augmented: Vec<Vec<f64>> = matrix
            .to_rows()
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                row.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
                row
            })
            .collect();

        for col in 0..n {
            let pivot_row = select_pivot(&augmented, col, params)
                .ok_or(MatrixError::NotInvertible { pivot: col })?;
            augmented.swap(col, pivot_row);

            let pivot = augmented[col][col];
            for value in augmented[col].iter_mut() {
                *value /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = augmented[row][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..width {
                    augmented[row][j] -= factor * augmented[col][j];
                }
            }
        }

        let data: Vec<f64> = augmented
            .into_iter()
            .flat_map(|row| row.into_iter().skip(n))
            .collect();

        Matrix::new(n, n, data)
    }
}

/// Pick the row (at or below `col`) to use as pivot, or `None` if singular
fn select_pivot(augmented: &[Vec<f64>], col: usize, params: &InversionParams) -> Option<usize> {
    let usable = |row: usize| augmented[row][col].abs() > params.tolerance;
    let mut candidates = col..augmented.len();

    match params.pivoting {
        Pivoting::Partial => candidates
            .max_by(|&a, &b| augmented[a][col].abs().total_cmp(&augmented[b][col].abs()))
            .filter(|&row| usable(row)),
        Pivoting::Disabled => candidates.find(|&row| usable(row)),
    }
}
