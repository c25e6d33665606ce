//! Configuration for the inverse cache

use crate::error::{MatrixError, Result};
use crate::inverse::{InversionParams, Pivoting, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable for the pivot tolerance
pub const ENV_TOLERANCE: &str = "CACHED_INVERSE_TOLERANCE";

/// Environment variable for the pivoting strategy (`partial` or `none`)
pub const ENV_PIVOTING: &str = "CACHED_INVERSE_PIVOTING";

/// Environment variable toggling info-level cache hit logging
pub const ENV_LOG_HITS: &str = "CACHED_INVERSE_LOG_HITS";

/// Configuration for [`InverseSolver`](crate::cache::InverseSolver)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Pivot magnitude below which a matrix is treated as singular
    pub tolerance: f64,

    /// Pivot selection strategy passed to the inverter
    pub pivoting: Pivoting,

    /// Log cache hits at info level (debug otherwise)
    pub log_cache_hits: bool,

    /// Tolerance used when checking `M × M⁻¹ ≈ I`
    pub verify_tolerance: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            pivoting: Pivoting::Partial,
            log_cache_hits: true,
            verify_tolerance: 1e-9,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(MatrixError::ConfigError(
                "tolerance must be a non-negative finite number".to_string(),
            ));
        }

        if !self.verify_tolerance.is_finite() || self.verify_tolerance <= 0.0 {
            return Err(MatrixError::ConfigError(
                "verify_tolerance must be a positive finite number".to_string(),
            ));
        }

        Ok(())
    }

    /// Parameters handed to the inverter on every cache miss
    pub fn inversion_params(&self) -> InversionParams {
        InversionParams {
            tolerance: self.tolerance,
            pivoting: self.pivoting,
        }
    }

    /// Load configuration from the environment
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = CacheConfig::builder();

        if let Some(raw) = lookup(ENV_TOLERANCE) {
            let tolerance = raw.trim().parse::<f64>().map_err(|e| {
                MatrixError::ConfigError(format!("{}={:?}: {}", ENV_TOLERANCE, raw, e))
            })?;
            builder = builder.tolerance(tolerance);
        }

        if let Some(raw) = lookup(ENV_PIVOTING) {
            let pivoting = raw
                .parse::<Pivoting>()
                .map_err(|e| MatrixError::ConfigError(format!("{}: {}", ENV_PIVOTING, e)))?;
            builder = builder.pivoting(pivoting);
        }

        if let Some(raw) = lookup(ENV_LOG_HITS) {
            let enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(MatrixError::ConfigError(format!(
                        "{}={:?}: expected a boolean",
                        ENV_LOG_HITS, raw
                    )))
                }
            };
            builder = builder.log_cache_hits(enabled);
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    tolerance: Option<f64>,
    pivoting: Option<Pivoting>,
    log_cache_hits: Option<bool>,
    verify_tolerance: Option<f64>,
}

impl CacheConfigBuilder {
    /// Set the singularity tolerance
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the pivoting strategy
    pub fn pivoting(mut self, pivoting: Pivoting) -> Self {
        self.pivoting = Some(pivoting);
        self
    }

    /// Enable or disable info-level hit logging
    pub fn log_cache_hits(mut self, enable: bool) -> Self {
        self.log_cache_hits = Some(enable);
        self
    }

    /// Set the round-trip verification tolerance
    pub fn verify_tolerance(mut self, tolerance: f64) -> Self {
        self.verify_tolerance = Some(tolerance);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            pivoting: self.pivoting.unwrap_or(defaults.pivoting),
            log_cache_hits: self.log_cache_hits.unwrap_or(defaults.log_cache_hits),
            verify_tolerance: self.verify_tolerance.unwrap_or(defaults.verify_tolerance),
        }
    }
}

/// Preset configurations
impl CacheConfig {
    /// Treat only exact zero pivots as singular
    pub fn exact_pivots() -> Self {
        Self {
            tolerance: 0.0,
            verify_tolerance: 1e-12,
            ..Default::default()
        }
    }

    /// Reject ill-conditioned matrices early
    pub fn conservative() -> Self {
        Self {
            tolerance: 1e-8,
            verify_tolerance: 1e-6,
            ..Default::default()
        }
    }
}
