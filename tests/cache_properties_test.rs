//! Integration tests for the inverse cache
//!
//! These tests verify the cache contract end to end:
//! - Cache hits skip the inverter
//! - `set` always invalidates
//! - Inverses round-trip to the identity
//! - Failed inversions are never cached
//! - Instances never share cache state

use cached_inverse::inverse::{GaussJordan, InversionParams, Inverter};
use cached_inverse::{
    solve_with_cache, CacheConfig, CachedMatrix, InverseSolver, Matrix, MatrixError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

/// Random strictly diagonally dominant (hence invertible) matrix
fn random_invertible(rng: &mut StdRng, n: usize) -> Matrix {
    let mut rows = vec![vec![0.0; n]; n];
    for (i, row) in rows.iter_mut().enumerate() {
        for value in row.iter_mut() {
            *value = rng.gen_range(-1.0..1.0);
        }
        row[i] = n as f64 + rng.gen_range(1.0..2.0);
    }
    m(rows)
}

/// Inverter stub that counts how often it runs
struct CountingInverter {
    calls: Cell<usize>,
}

impl CountingInverter {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Inverter for CountingInverter {
    fn invert(&self, matrix: &Matrix, params: &InversionParams) -> cached_inverse::Result<Matrix> {
        self.calls.set(self.calls.get() + 1);
        GaussJordan.invert(matrix, params)
    }
}

#[test]
fn test_cache_hit_skips_inverter() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = InversionParams::default();

    for n in 1..=6 {
        let inverter = CountingInverter::new();
        let mut cm = CachedMatrix::new(random_invertible(&mut rng, n));

        let first = solve_with_cache(&mut cm, &inverter, &params).unwrap();
        let second = solve_with_cache(&mut cm, &inverter, &params).unwrap();

        assert_eq!(inverter.calls(), 1, "{}x{} inverted more than once", n, n);
        // Bit-identical, not merely close
        assert_eq!(first.as_slice(), second.as_slice());
    }
}

#[test]
fn test_set_invalidates() {
    let mut cm = CachedMatrix::new(m(vec![vec![4.0, 7.0], vec![2.0, 6.0]]));
    solve_with_cache(&mut cm, &GaussJordan, &InversionParams::default()).unwrap();
    assert!(cm.get_inverse().is_some());

    cm.set(m(vec![vec![1.0, 0.0], vec![0.0, 1.0]]));
    assert!(cm.get_inverse().is_none());

    // An empty cache stays empty after set
    cm.set(m(vec![vec![1.0, 0.0], vec![0.0, 1.0]]));
    assert!(cm.get_inverse().is_none());
}

#[test]
fn test_round_trip_is_identity() {
    let mut rng = StdRng::seed_from_u64(42);
    let solver = InverseSolver::new(CacheConfig::default());

    for n in [1, 2, 3, 5, 8] {
        let value = random_invertible(&mut rng, n);
        let mut cm = CachedMatrix::new(value.clone());

        let inverse = solver.solve(&mut cm).unwrap();
        assert_eq!(inverse.shape(), value.shape());
        assert!(
            value.mul(&inverse).unwrap().is_identity(1e-9),
            "M x M^-1 is not the identity for n = {}",
            n
        );
        assert!(solver.verify(&value, &inverse).unwrap());
    }
}

#[test]
fn test_failed_inversion_is_not_cached() {
    let inverter = CountingInverter::new();
    let params = InversionParams::default();
    let mut cm = CachedMatrix::new(m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]));

    let err = solve_with_cache(&mut cm, &inverter, &params).unwrap_err();
    assert!(matches!(err, MatrixError::NotInvertible { .. }));
    assert!(cm.get_inverse().is_none());

    // A retry runs the inverter again
    assert!(solve_with_cache(&mut cm, &inverter, &params).is_err());
    assert_eq!(inverter.calls(), 2);
}

#[test]
fn test_non_square_propagates_dimension_mismatch() {
    let mut cm = CachedMatrix::new(Matrix::zeros(2, 3));

    let err = solve_with_cache(&mut cm, &GaussJordan, &InversionParams::default()).unwrap_err();
    assert!(matches!(err, MatrixError::DimensionMismatch { .. }));
    assert!(cm.get_inverse().is_none());
}

#[test]
fn test_custom_error_propagates_unchanged() {
    let failing = |_: &Matrix, _: &InversionParams| -> cached_inverse::Result<Matrix> {
        Err(MatrixError::Other("solver offline".to_string()))
    };
    let mut cm = CachedMatrix::new(Matrix::identity(2));

    let err = solve_with_cache(&mut cm, &failing, &InversionParams::default()).unwrap_err();
    assert_eq!(err, MatrixError::Other("solver offline".to_string()));
    assert!(cm.get_inverse().is_none());
}

#[test]
fn test_instances_are_independent() {
    let initial = m(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
    let params = InversionParams::default();

    let mut a = CachedMatrix::new(initial.clone());
    let mut b = CachedMatrix::new(initial);
    assert_ne!(a.id(), b.id());

    let inverse_a = solve_with_cache(&mut a, &GaussJordan, &params).unwrap();
    assert!(b.get_inverse().is_none());

    let inverse_b = solve_with_cache(&mut b, &GaussJordan, &params).unwrap();
    a.set(Matrix::identity(2));

    assert!(a.get_inverse().is_none());
    assert_eq!(b.get_inverse(), Some(&inverse_b));
    assert_eq!(inverse_a, inverse_b);
}

#[test]
fn test_documented_scenario() {
    let inverter = CountingInverter::new();
    let params = InversionParams::default();
    let mut cx = CachedMatrix::new(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));

    let first = solve_with_cache(&mut cx, &inverter, &params).unwrap();
    assert_eq!(first, m(vec![vec![0.5, 0.0], vec![0.0, 0.5]]));
    assert_eq!(inverter.calls(), 1);

    let again = solve_with_cache(&mut cx, &inverter, &params).unwrap();
    assert_eq!(again, first);
    assert_eq!(inverter.calls(), 1);

    cx.set(m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]));
    assert!(cx.get_inverse().is_none());

    let second = solve_with_cache(&mut cx, &inverter, &params).unwrap();
    assert!(second.approx_eq(&m(vec![vec![-2.0, 1.0], vec![1.5, -0.5]]), 1e-12));
    assert_eq!(inverter.calls(), 2);
}

#[test]
fn test_solver_counts_scenario() {
    let solver = InverseSolver::with_inverter(
        CacheConfig::builder().log_cache_hits(false).build(),
        CountingInverter::new(),
    );
    let mut cx = CachedMatrix::new(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));

    solver.solve(&mut cx).unwrap();
    solver.solve(&mut cx).unwrap();
    solver.replace(&mut cx, m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]));
    solver.solve(&mut cx).unwrap();

    assert_eq!(solver.inverter().calls(), 2);

    let stats = solver.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.invalidations, 1);
    assert_eq!(stats.failures, 0);
}
