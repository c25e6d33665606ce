//! A matrix paired with its optionally cached inverse

use crate::matrix::Matrix;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// A matrix value plus its cached inverse, if one has been stored
///
/// The cache has two states: empty and populated. [`set`](Self::set) always
/// returns it to empty, [`set_inverse`](Self::set_inverse) populates it, and
/// the getters never change it. `set_inverse` trusts its caller; use
/// [`solve_with_cache`](crate::cache::solve_with_cache) to populate it with
/// a freshly computed inverse.
///
/// `Clone` produces a fully independent copy with its own id.
#[derive(Debug)]
pub struct CachedMatrix {
    id: Uuid,
    value: Matrix,
    cached_inverse: Option<Matrix>,
    version: u64,
    cached_at: Option<DateTime<Utc>>,
}

impl CachedMatrix {
    /// Wrap `initial` with an empty cache
    pub fn new(initial: Matrix) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: initial,
            cached_inverse: None,
            version: 1,
            cached_at: None,
        }
    }

    /// Replace the value and clear the cached inverse
    ///
    /// No equality check is made: setting an identical matrix still clears
    /// the cache.
    pub fn set(&mut self, new_value: Matrix) {
        self.value = new_value;
        let had_inverse = self.cached_inverse.take().is_some();
        self.cached_at = None;
        self.version += 1;

        debug!(
            matrix_id = %self.id,
            version = self.version,
            had_inverse,
            "Matrix value replaced, cached inverse cleared"
        );
    }

    /// Current matrix value
    pub fn get(&self) -> &Matrix {
        &self.value
    }

    /// Store `inverse` as the cached inverse without validating it
    pub fn set_inverse(&mut self, inverse: Matrix) {
        debug!(
            matrix_id = %self.id,
            version = self.version,
            "Storing cached inverse ({}x{})",
            inverse.rows(),
            inverse.cols()
        );
        self.cached_inverse = Some(inverse);
        self.cached_at = Some(Utc::now());
    }

    /// Cached inverse, or `None` if not computed since the last `set`
    pub fn get_inverse(&self) -> Option<&Matrix> {
        self.cached_inverse.as_ref()
    }

    pub fn has_inverse(&self) -> bool {
        self.cached_inverse.is_some()
    }

    /// Unique id used to correlate log events
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Incremented on every `set`, starting at 1
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When the current inverse was stored
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cached_at
    }

    /// Consume into `(value, cached_inverse)`
    pub fn into_parts(self) -> (Matrix, Option<Matrix>) {
        (self.value, self.cached_inverse)
    }
}

impl Clone for CachedMatrix {
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: self.value.clone(),
            cached_inverse: self.cached_inverse.clone(),
            version: self.version,
            cached_at: self.cached_at,
        }
    }
}

impl From<Matrix> for CachedMatrix {
    fn from(initial: Matrix) -> Self {
        CachedMatrix::new(initial)
    }
}
