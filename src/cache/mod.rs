//! # Inverse Caching Layer
//!
//! This module memoizes matrix inversion per matrix instance.
//!
//! ## Features
//!
//! - **Explicit state**: [`CachedMatrix`] holds the value and an optional inverse
//! - **Unconditional invalidation**: every `set` clears the cached inverse
//! - **Success-only caching**: failed inversions are never stored
//! - **Pluggable routine**: any [`Inverter`](crate::inverse::Inverter) can compute the inverse
//! - **Metrics**: hit, miss, failure and invalidation counters on [`InverseSolver`]
//! - **Concurrency**: [`SharedCachedMatrix`] guards value and inverse under one lock
//!
//! ## Cache States
//!
//! Each instance is either *empty* or *populated*:
//! - empty → populated: a successful solve stores the inverse
//! - populated → empty: `set` replaces the value
//! - `get` / `get_inverse` never change state
//!
//! ## Example
//!
//! ```rust
//! use cached_inverse::cache::{solve_with_cache, CachedMatrix};
//! use cached_inverse::inverse::{GaussJordan, InversionParams};
//! use cached_inverse::Matrix;
//!
//! # fn example() -> cached_inverse::Result<()> {
//! let mut cm = CachedMatrix::new(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?);
//! let params = InversionParams::default();
//!
//! // Computed and stored
//! let inverse = solve_with_cache(&mut cm, &GaussJordan, &params)?;
//!
//! // Served from the cache
//! assert_eq!(solve_with_cache(&mut cm, &GaussJordan, &params)?, inverse);
//!
//! // Any set invalidates
//! cm.set(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?);
//! assert!(cm.get_inverse().is_none());
//! # Ok(())
//! # }
//! ```

pub mod cached;
pub mod config;
pub mod shared;
pub mod solve;
pub mod stats;

pub use cached::CachedMatrix;
pub use config::{CacheConfig, CacheConfigBuilder};
pub use shared::SharedCachedMatrix;
pub use solve::{solve_with_cache, InverseSolver, SolveOutcome};
pub use stats::CacheStats;
