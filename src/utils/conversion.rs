// src/utils/conversion.rs
//! Time-to-sample conversions
//!
//! Window lengths given in milliseconds truncate toward zero, durations given
//! in seconds round half to even. Both follow how the stages that use them
//! have always sized their windows; callers apply their own lower bounds.

use crate::config::constants::signal::MILLISECONDS_PER_SECOND;

/// `⌊fs × ms / 1000⌋`, zero for negative or non-finite products
pub fn ms_to_samples(sampling_rate_hz: f64, duration_ms: f64) -> usize {
    let samples = sampling_rate_hz * duration_ms / MILLISECONDS_PER_SECOND;
    if samples.is_finite() && samples > 0.0 {
        samples.trunc() as usize
    } else {
        0
    }
}

/// `round_half_even(fs × s)`, zero for negative or non-finite products
pub fn seconds_to_samples(sampling_rate_hz: f64, duration_s: f64) -> usize {
    let samples = sampling_rate_hz * duration_s;
    if samples.is_finite() && samples > 0.0 {
        samples.round_ties_even() as usize
    } else {
        0
    }
}

/// Sample index to time in seconds
pub fn samples_to_seconds(sampling_rate_hz: f64, index: usize) -> f64 {
    index as f64 / sampling_rate_hz
}
