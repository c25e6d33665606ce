//! # Cached Inverse (cached-inverse)
//!
//! Memoized matrix inversion: a matrix is wrapped together with its inverse,
//! and the inverse is only recomputed after the matrix changes.
//!
//! ## Features
//!
//! - Explicit two-state cache per matrix (empty / populated)
//! - Invalidation on every value replacement, with no equality checks
//! - Only successful inversions are cached; failures propagate unchanged
//! - Pluggable inversion routine via the [`Inverter`] trait
//! - Gauss-Jordan elimination with partial pivoting as the default routine
//! - Hit/miss statistics and structured `tracing` events
//! - Async, lock-guarded sharing via tokio
//!
//! ## Basic Usage
//!
//! ```rust
//! use cached_inverse::{CacheConfig, CachedMatrix, InverseSolver, Matrix};
//!
//! fn main() -> anyhow::Result<()> {
//!     let solver = InverseSolver::new(CacheConfig::default());
//!     let mut cm = CachedMatrix::new(Matrix::from_rows(vec![
//!         vec![2.0, 0.0],
//!         vec![0.0, 2.0],
//!     ])?);
//!
//!     // First call inverts, second call is a cache hit
//!     let inverse = solver.solve(&mut cm)?;
//!     assert_eq!(inverse.to_rows(), vec![vec![0.5, 0.0], vec![0.0, 0.5]]);
//!     assert_eq!(solver.solve(&mut cm)?, inverse);
//!
//!     // Replacing the value clears the cache
//!     cm.set(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?);
//!     assert!(cm.get_inverse().is_none());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Inversion Routines
//!
//! Any closure with the right signature is an [`Inverter`]:
//!
//! ```rust
//! use cached_inverse::inverse::{GaussJordan, InversionParams, Inverter};
//! use cached_inverse::{solve_with_cache, CachedMatrix, Matrix};
//! use std::cell::Cell;
//!
//! fn main() -> anyhow::Result<()> {
//!     let calls = Cell::new(0);
//!     let counting = |m: &Matrix, p: &InversionParams| -> cached_inverse::Result<Matrix> {
//!         calls.set(calls.get() + 1);
//!         GaussJordan.invert(m, p)
//!     };
//!
//!     let mut cm = CachedMatrix::new(Matrix::identity(3));
//!     let params = InversionParams::default();
//!     solve_with_cache(&mut cm, &counting, &params)?;
//!     solve_with_cache(&mut cm, &counting, &params)?;
//!     assert_eq!(calls.get(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Shared Across Tasks
//!
//! ```no_run
//! use cached_inverse::{CacheConfig, InverseSolver, Matrix, SharedCachedMatrix};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let solver = InverseSolver::new(CacheConfig::from_env()?);
//!     let shared = SharedCachedMatrix::new(Matrix::identity(4));
//!
//!     let inverse = shared.solve(&solver).await?;
//!     println!("{}", inverse);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod inverse;
pub mod matrix;

// Re-export main types for convenience
pub use cache::{
    solve_with_cache, CacheConfig, CacheConfigBuilder, CacheStats, CachedMatrix, InverseSolver,
    SharedCachedMatrix, SolveOutcome,
};
pub use error::{MatrixError, Result};
pub use inverse::{GaussJordan, InversionParams, Inverter, Pivoting};
pub use matrix::Matrix;
