//! Dense row-major matrix of `f64`
//!
//! This is the value type stored by [`CachedMatrix`](crate::cache::CachedMatrix).
//! Shape checks happen at construction; squareness is only required when the
//! matrix is inverted.

use crate::error::{MatrixError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-dimensional numeric array stored row-major
///
/// Deserialization goes through [`Matrix::new`], so a decoded matrix always
/// has `rows * cols` elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unchecked wire form of [`Matrix`]
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::new(raw.rows, raw.cols, raw.data)
    }
}

/// `rows * cols`, failing instead of overflowing
fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        MatrixError::dimension_mismatch(
            "a representable element count",
            format!("{}x{} overflows usize", rows, cols),
        )
    })
}

impl Matrix {
    /// Create a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(MatrixError::dimension_mismatch(
                format!("{} elements for a {}x{} matrix", expected, rows, cols),
                format!("{} elements", data.len()),
            ));
        }

        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from nested rows, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(element_count(row_count, cols)?);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::dimension_mismatch(
                    format!("{} columns", cols),
                    format!("{} columns in row {}", row.len(), i),
                ));
            }
            data.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    /// Identity matrix of size `n`
    ///
    /// # Panics
    ///
    /// Panics if `n * n` overflows, like `vec!` would.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            rows: n,
            cols: n,
            data,
        }
    }

    /// Matrix of zeros
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows, like `vec!` would.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow a single row
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Row-major element slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Matrix product `self × other`
    pub fn mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(MatrixError::dimension_mismatch(
                format!("{} rows on the right-hand side", self.cols),
                format!("{}x{}", other.rows, other.cols),
            ));
        }

        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    out.data[i * other.cols + j] += a * other.data[k * other.cols + j];
                }
            }
        }

        Ok(out)
    }

    /// Element-wise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Check whether this matrix is the identity within `tolerance`
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.is_square() && self.approx_eq(&Matrix::identity(self.rows), tolerance)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(value: &str) -> Result<Self> {
        Ok(serde_json::from_str(value)?)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(rows)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
