// src/processing/envelope.rs
//! Moving-RMS envelopes
//!
//! Two boundary policies are kept as separate operations because downstream
//! stages depend on their different edge behaviour:
//!
//! | | window for output `i` | divisor | near the edges |
//! |---|---|---|---|
//! | [`moving_rms_centered`] | `M` samples, centered, zero outside | always `M` | biased low |
//! | [`moving_rms_shrinking`] | `[i - h, i + h)` clipped | clipped length | unbiased |
//!
//! For a constant-amplitude signal this means
//! `moving_rms_shrinking(x, h)[0] >= moving_rms_centered(x, m)[0]`.
//!
//! Each window is summed on its own. A running total would lose quiet
//! windows that follow a long loud stretch to floating-point resolution.

use crate::error::{EmgError, EmgResult, ProcessingStage};

/// Centered moving mean with zero padding and a fixed divisor.
///
/// Output `i` averages input indices `[i + off - (M - 1), i + off]` with
/// `off = (M - 1) / 2`, treating out-of-range samples as zero and always
/// dividing by `M`. Output length equals input length. `M == 0` acts as 1.
pub fn centered_moving_mean(values: &[f64], window_samples: usize) -> Vec<f64> {
    let n = values.len();
    let m = window_samples.max(1);
    let offset = (m - 1) / 2;

    (0..n)
        .map(|i| {
            // Inclusive window [start, end] in signed index space
            let end = i + offset;
            let start = end as isize - (m as isize - 1);
            let lo = start.max(0) as usize;
            let hi = (end + 1).min(n);
            window_sum(values, lo, hi) / m as f64
        })
        .collect()
}

/// Policy A: `sqrt(mean(x²))` over a centered, zero-padded window of
/// `window_samples` samples with a fixed divisor.
///
/// Zero padding biases the first and last `~M/2` outputs low. Use
/// [`moving_rms_shrinking`] when edge samples must not be attenuated.
pub fn moving_rms_centered(signal: &[f64], window_samples: usize) -> Vec<f64> {
    let squared: Vec<f64> = signal.iter().map(|x| x * x).collect();
    centered_moving_mean(&squared, window_samples)
        .into_iter()
        .map(|ms| ms.max(0.0).sqrt())
        .collect()
}

/// Policy B: `sqrt(mean(x²))` over `[max(0, i - h), min(n, i + h))`, divided
/// by the clipped window's real length.
///
/// Edges are not biased low, unlike [`moving_rms_centered`]. Fails with
/// `InvalidParameters` for `h == 0`, which would leave every window empty.
pub fn moving_rms_shrinking(signal: &[f64], half_window: usize) -> EmgResult<Vec<f64>> {
    if half_window == 0 {
        return Err(EmgError::invalid_parameters(
            ProcessingStage::Envelope,
            "half window must be at least one sample",
        ));
    }

    let n = signal.len();
    let squared: Vec<f64> = signal.iter().map(|x| x * x).collect();

    Ok((0..n)
        .map(|i| {
            let lo = i.saturating_sub(half_window);
            let hi = (i + half_window).min(n);
            let mean_square = window_sum(&squared, lo, hi) / (hi - lo) as f64;
            mean_square.max(0.0).sqrt()
        })
        .collect())
}

/// Sum of `values[lo..hi]`, zero for an empty range
fn window_sum(values: &[f64], lo: usize, hi: usize) -> f64 {
    if hi > lo {
        values[lo..hi].iter().sum()
    } else {
        0.0
    }
}
