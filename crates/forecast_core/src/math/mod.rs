//! Numerical building blocks.

pub mod statistics;
