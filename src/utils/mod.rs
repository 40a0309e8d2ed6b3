// src/utils/mod.rs
//! Shared numeric helpers
//!
//! - Window-length conversions between time and samples
//! - Order statistics (median) and NaN-aware reductions

pub mod conversion;
pub mod stats;

pub use conversion::{ms_to_samples, samples_to_seconds, seconds_to_samples};
pub use stats::{mean, median, median_in_place, nan_max};
