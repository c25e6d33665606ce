//! Inverse Cache Demo Application
//!
//! Walks through a miss, a hit, an invalidation and a failed inversion.
//!
//! Usage:
//!   cargo run --bin cached-inverse-demo
//!
//! Environment variables (also read from `.env`):
//!   CACHED_INVERSE_TOLERANCE - singular pivot tolerance (default: 1e-12)
//!   CACHED_INVERSE_PIVOTING  - `partial` or `none` (default: partial)
//!   CACHED_INVERSE_LOG_HITS  - log cache hits at info level (default: true)
//!   RUST_LOG                 - tracing filter (default: info)

use cached_inverse::{CacheConfig, CachedMatrix, InverseSolver, Matrix, SharedCachedMatrix};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("=== Inverse Cache Demo ===");

    let config = CacheConfig::from_env()?;
    info!("Using config: {}", serde_json::to_string(&config)?);

    let solver = InverseSolver::new(config);
    let mut cx = CachedMatrix::new(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?);

    info!("\n--- First solve (miss) ---");
    let inverse = solver.solve(&mut cx)?;
    info!("Inverse:\n{}", inverse);

    info!("\n--- Second solve (hit) ---");
    let again = solver.solve(&mut cx)?;
    info!("Same result: {}", again == inverse);

    info!("\n--- Replace value (invalidates) ---");
    solver.replace(&mut cx, Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?);
    info!("Cached inverse present: {}", cx.has_inverse());

    let inverse = solver.solve(&mut cx)?;
    info!("Inverse:\n{}", inverse);
    info!("Round trip ok: {}", solver.verify(cx.get(), &inverse)?);

    info!("\n--- Singular matrix ---");
    solver.replace(&mut cx, Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]])?);
    match solver.solve(&mut cx) {
        Ok(inverse) => info!("Unexpected inverse:\n{}", inverse),
        Err(e) => warn!("Inversion failed as expected: {}", e),
    }
    info!("Cached inverse present: {}", cx.has_inverse());

    info!("\n--- Shared across tasks ---");
    let shared = SharedCachedMatrix::new(Matrix::identity(3));
    let (first, second) = tokio::join!(shared.solve(&solver), shared.solve(&solver));
    info!("Both tasks agree: {}", first? == second?);

    info!("\n{}", solver.stats());

    Ok(())
}
