//! Lock-guarded [`CachedMatrix`] for concurrent use
//!
//! The value and its cached inverse sit behind one lock, so a `set` on one
//! task can never be observed alongside an inverse computed for the old value.

use crate::cache::{cached::CachedMatrix, solve::InverseSolver};
use crate::error::{MatrixError, Result};
use crate::inverse::Inverter;
use crate::matrix::Matrix;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task;
use tracing::debug;
use uuid::Uuid;

/// Shared handle to a [`CachedMatrix`]
///
/// Cloning the handle shares the same matrix. Use [`SharedCachedMatrix::new`]
/// for an independent instance.
#[derive(Debug, Clone)]
pub struct SharedCachedMatrix {
    inner: Arc<RwLock<CachedMatrix>>,
}

impl SharedCachedMatrix {
    /// Wrap `initial` with an empty cache
    pub fn new(initial: Matrix) -> Self {
        Self::from_cached(CachedMatrix::new(initial))
    }

    /// Share an existing cached matrix, keeping its cache
    pub fn from_cached(cached: CachedMatrix) -> Self {
        debug!(matrix_id = %cached.id(), "Sharing cached matrix");
        Self {
            inner: Arc::new(RwLock::new(cached)),
        }
    }

    /// Replace the value and clear the cached inverse
    pub async fn set(&self, new_value: Matrix) {
        self.inner.write().await.set(new_value);
    }

    /// Copy of the current value
    pub async fn get(&self) -> Matrix {
        self.inner.read().await.get().clone()
    }

    /// Store `inverse` without validation
    pub async fn set_inverse(&self, inverse: Matrix) {
        self.inner.write().await.set_inverse(inverse);
    }

    /// Copy of the cached inverse, if any
    pub async fn get_inverse(&self) -> Option<Matrix> {
        self.inner.read().await.get_inverse().cloned()
    }

    pub async fn id(&self) -> Uuid {
        self.inner.read().await.id()
    }

    /// Run the cache protocol under the write lock
    ///
    /// Concurrent callers on a cold cache serialize, so the inverter runs once.
    /// On a miss the inverter runs inline on the calling task, blocking its
    /// executor thread while the write lock is held. Use
    /// [`solve_blocking`](Self::solve_blocking) for large matrices.
    pub async fn solve<I: Inverter>(&self, solver: &InverseSolver<I>) -> Result<Matrix> {
        let mut guard = self.inner.write().await;
        solver.solve(&mut guard)
    }

    /// Like [`solve`](Self::solve), but the protocol runs on tokio's blocking pool
    ///
    /// The write lock is still held for the whole protocol.
    pub async fn solve_blocking<I>(&self, solver: Arc<InverseSolver<I>>) -> Result<Matrix>
    where
        I: Inverter + Send + Sync + 'static,
    {
        let mut guard = Arc::clone(&self.inner).write_owned().await;
        task::spawn_blocking(move || solver.solve(&mut guard))
            .await
            .map_err(|e| MatrixError::Other(format!("Inversion task failed: {}", e)))?
    }

    /// Replace the value through `solver`, counting the invalidation
    pub async fn replace<I: Inverter>(&self, solver: &InverseSolver<I>, new_value: Matrix) {
        let mut guard = self.inner.write().await;
        solver.replace(&mut guard, new_value);
    }

    /// Current `(value, cached_inverse)` pair from a single read
    pub async fn snapshot(&self) -> (Matrix, Option<Matrix>) {
        let guard = self.inner.read().await;
        (guard.get().clone(), guard.get_inverse().cloned())
    }
}
