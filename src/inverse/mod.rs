//! # Inversion Routines
//!
//! The cache layer never inverts matrices itself; it calls an [`Inverter`].
//! Anything implementing the trait can be plugged in, including plain
//! closures, which is how tests count invocations.
//!
//! ## Example
//!
//! ```rust
//! use cached_inverse::inverse::{GaussJordan, InversionParams, Inverter};
//! use cached_inverse::Matrix;
//!
//! # fn example() -> cached_inverse::Result<()> {
//! let m = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?;
//! let inv = GaussJordan.invert(&m, &InversionParams::default())?;
//! assert_eq!(inv.to_rows(), vec![vec![0.5, 0.0], vec![0.0, 0.5]]);
//! # Ok(())
//! # }
//! ```

pub mod gauss_jordan;

pub use gauss_jordan::GaussJordan;

use crate::error::Result;
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default pivot magnitude below which a matrix is treated as singular
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Pivot selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pivoting {
    /// Swap in the row with the largest magnitude in the pivot column
    #[default]
    Partial,

    /// Use the first row with a usable pivot
    #[serde(rename = "none")]
    Disabled,
}

impl fmt::Display for Pivoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pivoting::Partial => write!(f, "partial"),
            Pivoting::Disabled => write!(f, "none"),
        }
    }
}

impl FromStr for Pivoting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "partial" => Ok(Pivoting::Partial),
            "none" | "disabled" => Ok(Pivoting::Disabled),
            other => Err(format!("unknown pivoting strategy '{}'", other)),
        }
    }
}

/// Extra parameters passed through verbatim to the inversion routine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InversionParams {
    /// Pivots with absolute value at or below this are treated as zero
    pub tolerance: f64,

    /// Pivot selection strategy
    pub pivoting: Pivoting,
}

impl Default for InversionParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            pivoting: Pivoting::Partial,
        }
    }
}

impl InversionParams {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_pivoting(mut self, pivoting: Pivoting) -> Self {
        self.pivoting = pivoting;
        self
    }
}

/// A routine that inverts a square matrix
///
/// Implementations must fail with
/// [`DimensionMismatch`](crate::MatrixError::DimensionMismatch) for
/// non-square input and [`NotInvertible`](crate::MatrixError::NotInvertible)
/// for singular input. On success the result has the same shape as the input.
pub trait Inverter {
    fn invert(&self, matrix: &Matrix, params: &InversionParams) -> Result<Matrix>;
}

impl<F> Inverter for F
where
    F: Fn(&Matrix, &InversionParams) -> Result<Matrix>,
{
    fn invert(&self, matrix: &Matrix, params: &InversionParams) -> Result<Matrix> {
        self(matrix, params)
    }
}
