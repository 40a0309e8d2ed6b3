// src/processing/filter_bank.rs
//! Zero-phase Butterworth band-pass entry points
//!
//! [`bandpass`] fails fast on signals too short for forward-backward
//! filtering. [`bandpass_or_passthrough`] is the explicit fallback: it hands
//! the signal back untouched and reports [`FilterPath::Unfiltered`] so the
//! caller can tell which branch ran.

use crate::config::FilterBankConfig;
use crate::error::{EmgError, EmgResult};
use crate::processing::filters::{butterworth_bandpass, filtfilt, FilterPath, FilterSpec};
use tracing::{debug, warn};

/// Zero-phase band-pass of `signal`.
///
/// Errors: `InvalidFilterSpec` for cutoffs outside `0 < low < high < fs/2`,
/// `SignalTooShort` when the signal is not longer than the filter padding.
pub fn bandpass(
    signal: &[f64],
    sampling_rate_hz: f64,
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> EmgResult<Vec<f64>> {
    bandpass_spec(signal, &FilterSpec::new(low_hz, high_hz, order, sampling_rate_hz))
}

/// [`bandpass`] with the band and order read from a loaded `[bandpass]` section
pub fn bandpass_with(
    signal: &[f64],
    sampling_rate_hz: f64,
    config: &FilterBankConfig,
) -> EmgResult<Vec<f64>> {
    bandpass_spec(signal, &config.spec(sampling_rate_hz))
}

/// [`bandpass`] taking a prepared [`FilterSpec`]
pub fn bandpass_spec(signal: &[f64], spec: &FilterSpec) -> EmgResult<Vec<f64>> {
    let tf = butterworth_bandpass(spec)?;
    debug!(
        low_hz = spec.low_hz,
        high_hz = spec.high_hz,
        order = spec.order,
        fs = spec.sampling_rate_hz,
        samples = signal.len(),
        "bandpass"
    );
    filtfilt(&tf, signal)
}

/// Band-pass, or return the input unchanged when it is too short to filter.
///
/// Filter-spec errors still propagate; only `SignalTooShort` is absorbed.
pub fn bandpass_or_passthrough(
    signal: &[f64],
    spec: &FilterSpec,
) -> EmgResult<(Vec<f64>, FilterPath)> {
    match bandpass_spec(signal, spec) {
        Ok(filtered) => Ok((filtered, FilterPath::ZeroPhase)),
        Err(EmgError::SignalTooShort { len, required }) => {
            warn!(len, required, "signal too short for zero-phase filtering, passing through");
            Ok((signal.to_vec(), FilterPath::Unfiltered { len, required }))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq_hz: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / fs).sin())
            .collect()
    }

    fn rms(x: &[f64]) -> f64 {
        (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
    }

    #[test]
    fn test_passband_tone_survives() {
        let fs = 2000.0;
        let input = tone(150.0, fs, 4000);
        let output = bandpass(&input, fs, 50.0, 500.0, 4).unwrap();

        assert_eq!(output.len(), input.len());
        let ratio = rms(&output[500..3500]) / rms(&input[500..3500]);
        assert!((ratio - 1.0).abs() < 0.02, "passband ratio {}", ratio);
    }

    #[test]
    fn test_stopband_tone_rejected() {
        let fs = 2000.0;
        let input = tone(5.0, fs, 4000);
        let output = bandpass(&input, fs, 50.0, 500.0, 4).unwrap();

        assert!(rms(&output[500..3500]) < 0.01 * rms(&input[500..3500]));
    }

    #[test]
    fn test_nyquist_violation() {
        let err = bandpass(&[0.0; 100], 900.0, 50.0, 500.0, 4).unwrap_err();
        assert!(matches!(err, EmgError::InvalidFilterSpec { .. }));

        // The passthrough variant must not swallow spec errors
        let spec = FilterSpec::new(50.0, 500.0, 4, 900.0);
        assert!(bandpass_or_passthrough(&[0.0; 10], &spec).is_err());
    }

    #[test]
    fn test_short_signal_fails_fast() {
        let err = bandpass(&[1.0; 20], 2000.0, 50.0, 500.0, 4).unwrap_err();
        assert_eq!(err, EmgError::SignalTooShort { len: 20, required: 27 });
    }

    #[test]
    fn test_short_signal_passthrough() {
        let spec = FilterSpec::new(50.0, 500.0, 4, 2000.0);
        let input = vec![1.0, -2.0, 3.0];
        let (output, path) = bandpass_or_passthrough(&input, &spec).unwrap();

        assert_eq!(output, input);
        assert_eq!(path, FilterPath::Unfiltered { len: 3, required: 27 });
        assert!(!path.is_filtered());
    }

    #[test]
    fn test_empty_signal_passthrough() {
        let spec = FilterSpec::new(50.0, 500.0, 4, 2000.0);
        let (output, path) = bandpass_or_passthrough(&[], &spec).unwrap();
        assert!(output.is_empty());
        assert!(!path.is_filtered());
    }
}
