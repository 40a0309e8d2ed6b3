// src/processing/outlier.rs
//! Hampel outlier filter
//!
//! Each sample is compared with the median of a centered window clipped at the
//! signal boundaries. Samples further than `k` robust standard deviations
//! (`1.4826 × MAD`) from that median are replaced by it. Every decision reads
//! the original input, never an already-replaced value.

use crate::config::constants::outlier::{MAD_FLOOR, MAD_SCALE};
use crate::config::HampelConfig;
use crate::utils::stats::median_in_place;

/// Hampel filter with a window of `window_samples | 1` samples.
///
/// Edge windows shrink instead of padding. `MAD` is floored by a tiny constant
/// so a locally constant window still lets exact matches through unchanged.
pub fn hampel(signal: &[f64], window_samples: usize, k: f64) -> Vec<f64> {
    let n = signal.len();
    let window = window_samples | 1;
    let half = window / 2;

    let mut output = signal.to_vec();
    let mut scratch = Vec::with_capacity(window);
    let mut deviations = Vec::with_capacity(window);

    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);
        let segment = &signal[lo..hi];

        scratch.clear();
        scratch.extend_from_slice(segment);
        let med = median_in_place(&mut scratch);

        deviations.clear();
        deviations.extend(segment.iter().map(|v| (v - med).abs()));
        let mad = median_in_place(&mut deviations) + MAD_FLOOR;

        if (signal[i] - med).abs() > k * MAD_SCALE * mad {
            output[i] = med;
        }
    }

    output
}

/// [`hampel`] with window and threshold from a `[hampel]` section
pub fn hampel_with(signal: &[f64], config: &HampelConfig) -> Vec<f64> {
    hampel(signal, config.window_samples, config.k)
}
