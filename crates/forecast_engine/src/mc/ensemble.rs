//! Dense storage for simulated price paths.
//!
//! # Memory Layout
//!
//! Paths are stored in one pre-sized row-major buffer:
//! `prices[path_idx * horizon_days + step_idx]`, where `step_idx = 0` holds
//! the starting price. The buffer is allocated once per run and never grows
//! inside the generation loop.

use forecast_core::types::ForecastError;

/// Ensemble of simulated price paths with shape `n_paths × horizon_days`.
///
/// Read-only once generated; the generator is the only writer.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::mc::PathEnsemble;
///
/// let ensemble = PathEnsemble::from_vec(vec![100.0, 101.0, 100.0, 99.0], 2, 2).unwrap();
///
/// assert_eq!(ensemble.shape(), (2, 2));
/// assert_eq!(ensemble.path(1), Some(&[100.0, 99.0][..]));
/// assert_eq!(ensemble.terminal_prices(), vec![101.0, 99.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathEnsemble {
    /// Prices (n_paths × horizon_days), row-major.
    prices: Vec<f64>,
    /// Number of paths (rows).
    n_paths: usize,
    /// Steps per path (columns).
    horizon_days: usize,
}

impl PathEnsemble {
    /// Allocates a zero-filled ensemble for the generator to populate.
    pub(crate) fn zeroed(n_paths: usize, horizon_days: usize) -> Self {
        Self {
            prices: vec![0.0; n_paths * horizon_days],
            n_paths,
            horizon_days,
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidConfig`] if `horizon_days` is zero,
    /// `n_paths * horizon_days` overflows `usize`, or the buffer length
    /// differs from that product.
    pub fn from_vec(
        prices: Vec<f64>,
        n_paths: usize,
        horizon_days: usize,
    ) -> Result<Self, ForecastError> {
        if horizon_days == 0 {
            return Err(ForecastError::invalid_config(
                "horizon_days",
                "must be at least 1",
            ));
        }
        let expected = n_paths.checked_mul(horizon_days).ok_or_else(|| {
            ForecastError::invalid_config(
                "n_paths",
                format!("{} × {} cells overflow usize", n_paths, horizon_days),
            )
        })?;
        if prices.len() != expected {
            return Err(ForecastError::invalid_config(
                "prices",
                format!(
                    "buffer holds {} values, expected {} × {}",
                    prices.len(),
                    n_paths,
                    horizon_days
                ),
            ));
        }
        Ok(Self {
            prices,
            n_paths,
            horizon_days,
        })
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Steps per path.
    #[inline]
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// `(n_paths, horizon_days)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_paths, self.horizon_days)
    }

    /// Returns `true` if the ensemble holds no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_paths == 0
    }

    /// Price of `path` at `step`.
    #[inline]
    pub fn get(&self, path: usize, step: usize) -> Option<f64> {
        if path < self.n_paths && step < self.horizon_days {
            Some(self.prices[path * self.horizon_days + step])
        } else {
            None
        }
    }

    /// One path as a slice of `horizon_days` prices.
    #[inline]
    pub fn path(&self, path: usize) -> Option<&[f64]> {
        if path < self.n_paths {
            let offset = path * self.horizon_days;
            Some(&self.prices[offset..offset + self.horizon_days])
        } else {
            None
        }
    }

    /// Iterates over paths in index order.
    pub fn paths(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.prices.chunks_exact(self.horizon_days.max(1))
    }

    /// Prices at `step` across all paths.
    pub fn step_prices(&self, step: usize) -> Option<Vec<f64>> {
        if step >= self.horizon_days {
            return None;
        }
        Some(
            (0..self.n_paths)
                .map(|path| self.prices[path * self.horizon_days + step])
                .collect(),
        )
    }

    /// Terminal price (step `horizon_days - 1`) of every path.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths()
            .map(|path| path[path.len() - 1])
            .collect()
    }

    /// The underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }

    /// Mutable buffer, for the generators in this crate.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.prices
    }

    /// Returns total memory used by the price buffer in bytes.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        self.prices.capacity() * std::mem::size_of::<f64>()
    }
}
