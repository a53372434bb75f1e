//! # Random Number Generation Infrastructure
//!
//! This module provides the random source consumed by path generation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded and reports its seed
//! - **Explicit ownership**: a generator is passed to each simulation run;
//!   there is no global or thread-shared generator
//! - **Independent streams**: parallel batches derive their own generator
//!   from `(seed, stream)` so no state is shared between threads
//!
//! ## Usage Example
//!
//! ```rust
//! use forecast_engine::rng::ForecastRng;
//!
//! let mut rng = ForecastRng::from_seed(12345);
//!
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::ForecastRng;
