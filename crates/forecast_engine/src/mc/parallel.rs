//! Parallel path generation.
//!
//! Paths are split into fixed-size batches and each batch is generated on
//! the rayon thread pool with its own [`ForecastRng`] derived from
//! `(seed, batch_index)`. No generator state is shared between threads, and
//! the output depends only on `seed` and `batch_size`, never on the number
//! of worker threads or scheduling order.

use forecast_core::types::ForecastError;
use rayon::prelude::*;

use super::config::SimulationConfig;
use super::ensemble::PathEnsemble;
use super::paths::{evolve_path, increment_distribution};
use crate::rng::ForecastRng;

/// Default number of paths per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Generates the dense ensemble on the rayon thread pool.
///
/// Batch `i` covers paths `i * batch_size .. (i + 1) * batch_size` and is
/// driven by `ForecastRng::for_stream(seed, i)`. `batch_size` is clamped to
/// `1..=n_paths`, so zero acts as one and anything at or above `n_paths` runs
/// a single batch. When a single batch covers every path the result equals
/// [`generate_paths`](super::generate_paths) with `ForecastRng::from_seed(seed)`.
///
/// # Errors
///
/// Returns [`ForecastError::InvalidConfig`] if the configuration is invalid.
///
/// # Examples
///
/// ```rust
/// use forecast_core::estimation::ReturnStatistics;
/// use forecast_engine::mc::{generate_paths_parallel, SimulationConfig};
///
/// let config = SimulationConfig::new(50.0, 30, 1_000, ReturnStatistics::new(0.0, 0.01)).unwrap();
///
/// let a = generate_paths_parallel(&config, 7, 100).unwrap();
/// let b = generate_paths_parallel(&config, 7, 100).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_paths_parallel(
    config: &SimulationConfig,
    seed: u64,
    batch_size: usize,
) -> Result<PathEnsemble, ForecastError> {
    config.validate()?;
    let increments = increment_distribution(config.stats())?;

    let horizon_days = config.horizon_days();
    let start_price = config.start_price();
    let batch_size = batch_size.clamp(1, config.n_paths());
    let mut ensemble = PathEnsemble::zeroed(config.n_paths(), horizon_days);

    ensemble
        .as_mut_slice()
        .par_chunks_mut(batch_size * horizon_days)
        .enumerate()
        .for_each(|(batch_idx, batch)| {
            let mut rng = ForecastRng::for_stream(seed, batch_idx as u64);
            for path in batch.chunks_exact_mut(horizon_days) {
                evolve_path(path, start_price, &increments, &mut rng);
            }
        });

    Ok(ensemble)
}
