//! Get-or-compute protocol for cached inverses

use crate::cache::{
    cached::CachedMatrix,
    config::CacheConfig,
    stats::{CacheStats, StatsCounters},
};
use crate::error::Result;
use crate::inverse::{GaussJordan, InversionParams, Inverter};
use crate::matrix::Matrix;
use tracing::{debug, info, warn, Level};

/// Outcome of a single solve, used for accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Answered from the cache
    Hit,
    /// Computed and stored
    Miss,
}

/// Return the inverse of `cached`'s value, computing it only when not cached
///
/// On a cache hit the stored inverse is returned as-is and an info event is
/// logged. On a miss `inverter` is called with `params` unchanged and its
/// result is stored. Inverter errors propagate and leave the cache empty.
pub fn solve_with_cache<I>(
    cached: &mut CachedMatrix,
    inverter: &I,
    params: &InversionParams,
) -> Result<Matrix>
where
    I: Inverter + ?Sized,
{
    solve_logged(cached, inverter, params, Level::INFO).map(|(inverse, _)| inverse)
}

fn solve_logged<I>(
    cached: &mut CachedMatrix,
    inverter: &I,
    params: &InversionParams,
    hit_level: Level,
) -> Result<(Matrix, SolveOutcome)>
where
    I: Inverter + ?Sized,
{
    if let Some(inverse) = cached.get_inverse() {
        if hit_level == Level::INFO {
            info!(matrix_id = %cached.id(), "Cache hit, returning stored inverse");
        } else {
            debug!(matrix_id = %cached.id(), "Cache hit, returning stored inverse");
        }
        return Ok((inverse.clone(), SolveOutcome::Hit));
    }

    debug!(
        matrix_id = %cached.id(),
        version = cached.version(),
        "Cache miss, inverting {}x{} matrix",
        cached.get().rows(),
        cached.get().cols()
    );

    let inverse = inverter.invert(cached.get(), params).map_err(|e| {
        warn!(matrix_id = %cached.id(), "Inversion failed, cache left empty: {}", e);
        e
    })?;
    cached.set_inverse(inverse.clone());

    Ok((inverse, SolveOutcome::Miss))
}

/// Cache solver bundling an inverter, its configuration and statistics
///
/// `solve` takes `&self`, so one solver can serve many matrices.
///
/// ```rust
/// use cached_inverse::{CacheConfig, CachedMatrix, InverseSolver, Matrix};
///
/// # fn example() -> cached_inverse::Result<()> {
/// let solver = InverseSolver::new(CacheConfig::default());
/// let mut cm = CachedMatrix::new(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?);
///
/// let first = solver.solve(&mut cm)?;
/// let second = solver.solve(&mut cm)?;
/// assert_eq!(first, second);
/// assert_eq!(solver.stats().hits, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InverseSolver<I = GaussJordan> {
    config: CacheConfig,
    inverter: I,
    stats: StatsCounters,
}

impl InverseSolver<GaussJordan> {
    /// Create a solver using Gauss-Jordan elimination
    pub fn new(config: CacheConfig) -> Self {
        Self::with_inverter(config, GaussJordan)
    }
}

impl Default for InverseSolver<GaussJordan> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<I: Inverter> InverseSolver<I> {
    /// Create a solver with a custom inversion routine
    pub fn with_inverter(config: CacheConfig, inverter: I) -> Self {
        debug!("Initializing inverse solver with config: {:?}", config);

        Self {
            config,
            inverter,
            stats: StatsCounters::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn inverter(&self) -> &I {
        &self.inverter
    }

    /// Inverse of `cached`'s value, from cache when possible
    pub fn solve(&self, cached: &mut CachedMatrix) -> Result<Matrix> {
        let hit_level = if self.config.log_cache_hits {
            Level::INFO
        } else {
            Level::DEBUG
        };

        match solve_logged(cached, &self.inverter, &self.config.inversion_params(), hit_level) {
            Ok((inverse, SolveOutcome::Hit)) => {
                self.stats.record_hit();
                Ok(inverse)
            }
            Ok((inverse, SolveOutcome::Miss)) => {
                self.stats.record_miss();
                Ok(inverse)
            }
            Err(e) => {
                self.stats.record_failure();
                Err(e)
            }
        }
    }

    /// Replace `cached`'s value, counting an invalidation if an inverse was cached
    pub fn replace(&self, cached: &mut CachedMatrix, new_value: Matrix) {
        if cached.has_inverse() {
            self.stats.record_invalidation();
        }
        cached.set(new_value);
    }

    /// Check that `matrix × inverse` is the identity within `verify_tolerance`
    pub fn verify(&self, matrix: &Matrix, inverse: &Matrix) -> Result<bool> {
        Ok(matrix
            .mul(inverse)?
            .is_identity(self.config.verify_tolerance))
    }

    /// Snapshot of the hit/miss counters
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use std::cell::Cell;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_solve_with_cache_miss_then_hit() {
        let calls = Cell::new(0);
        let counting = |matrix: &Matrix, params: &InversionParams| -> Result<Matrix> {
            calls.set(calls.get() + 1);
            GaussJordan.invert(matrix, params)
        };

        let mut cm = CachedMatrix::new(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));
        let params = InversionParams::default();

        let first = solve_with_cache(&mut cm, &counting, &params).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(cm.get_inverse(), Some(&first));

        let second = solve_with_cache(&mut cm, &counting, &params).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_params_passed_through() {
        let seen = Cell::new(None);
        let recording = |matrix: &Matrix, params: &InversionParams| -> Result<Matrix> {
            seen.set(Some(*params));
            Ok(matrix.clone())
        };

        let params = InversionParams::default().with_tolerance(0.125);
        let mut cm = CachedMatrix::new(Matrix::identity(2));
        solve_with_cache(&mut cm, &recording, &params).unwrap();

        assert_eq!(seen.get(), Some(params));
    }

    #[test]
    fn test_failure_is_not_cached() {
        let mut cm = CachedMatrix::new(m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]));

        let err = solve_with_cache(&mut cm, &GaussJordan, &InversionParams::default()).unwrap_err();
        assert!(matches!(err, MatrixError::NotInvertible { .. }));
        assert!(cm.get_inverse().is_none());
    }

    #[test]
    fn test_solver_stats() {
        let solver = InverseSolver::new(CacheConfig::default());
        let mut cm = CachedMatrix::new(m(vec![vec![4.0, 7.0], vec![2.0, 6.0]]));

        solver.solve(&mut cm).unwrap();
        solver.solve(&mut cm).unwrap();
        solver.replace(&mut cm, m(vec![vec![0.0, 0.0], vec![0.0, 0.0]]));
        assert!(solver.solve(&mut cm).is_err());

        let stats = solver.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.invalidations, 1);

        solver.reset_stats();
        assert_eq!(solver.stats(), CacheStats::default());
    }

    #[test]
    fn test_replace_without_inverse_is_not_an_invalidation() {
        let solver = InverseSolver::new(CacheConfig::default());
        let mut cm = CachedMatrix::new(Matrix::identity(2));

        solver.replace(&mut cm, Matrix::identity(3));
        assert_eq!(solver.stats().invalidations, 0);
        assert_eq!(cm.version(), 2);
    }

    #[test]
    fn test_verify() {
        let solver = InverseSolver::new(CacheConfig::default());
        let a = m(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
        let mut cm = CachedMatrix::new(a.clone());

        let inverse = solver.solve(&mut cm).unwrap();
        assert!(solver.verify(&a, &inverse).unwrap());
        assert!(!solver.verify(&a, &a).unwrap());
        assert!(solver.verify(&a, &Matrix::zeros(3, 3)).is_err());
    }

    #[test]
    fn test_solver_uses_configured_tolerance() {
        let solver = InverseSolver::new(CacheConfig::builder().tolerance(1e-3).build());
        let mut cm = CachedMatrix::new(m(vec![vec![1e-4, 0.0], vec![0.0, 1.0]]));

        assert!(solver.solve(&mut cm).is_err());
        assert!(!cm.has_inverse());
    }
}
