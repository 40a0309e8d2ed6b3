// src/utils/stats.rs
//! Order statistics and NaN-aware reductions

use std::cmp::Ordering;

/// Median of `values`, reordering the slice in place.
///
/// Even-length input averages the two middle values. Returns NaN for an empty
/// slice.
pub fn median_in_place(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }

    let mid = n / 2;
    let (lower, upper_mid, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper_mid = *upper_mid;
    if n % 2 == 1 {
        return upper_mid;
    }

    let lower_mid = lower
        .iter()
        .copied()
        .max_by(f64::total_cmp)
        .unwrap_or(upper_mid);
    (lower_mid + upper_mid) / 2.0
}

/// Median of `values` without modifying them
pub fn median(values: &[f64]) -> f64 {
    let mut scratch = values.to_vec();
    median_in_place(&mut scratch)
}

/// Arithmetic mean, NaN when empty
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Maximum ignoring NaN entries. `None` when nothing finite-or-infinite remains.
pub fn nan_max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}
