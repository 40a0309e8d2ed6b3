// src/processing/filters/mod.rs
//! Digital filter design and zero-phase application

pub mod iir;
pub mod zero_phase;

pub use iir::butterworth_bandpass;
pub use zero_phase::{filtfilt, lfilter};

use crate::config::constants::filters::{
    DEFAULT_FILTER_ORDER, DEFAULT_HIGH_CUTOFF_HZ, DEFAULT_LOW_CUTOFF_HZ, MAX_FILTER_ORDER,
    MIN_FILTER_ORDER, PADLEN_FACTOR,
};
use crate::error::{EmgError, EmgResult};
use serde::{Deserialize, Serialize};

/// Band-pass design request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Lower -3 dB edge in Hz
    pub low_hz: f64,
    /// Upper -3 dB edge in Hz
    pub high_hz: f64,
    /// Prototype low-pass order; the band-pass has twice as many poles
    pub order: usize,
    /// Sampling frequency the filter is designed for
    pub sampling_rate_hz: f64,
}

impl FilterSpec {
    /// Unvalidated spec; [`FilterSpec::validate`] runs at design time
    pub fn new(low_hz: f64, high_hz: f64, order: usize, sampling_rate_hz: f64) -> Self {
        Self {
            low_hz,
            high_hz,
            order,
            sampling_rate_hz,
        }
    }

    /// General-purpose EMG band (20-450 Hz, order 4)
    pub fn emg_default(sampling_rate_hz: f64) -> Self {
        Self::new(
            DEFAULT_LOW_CUTOFF_HZ,
            DEFAULT_HIGH_CUTOFF_HZ,
            DEFAULT_FILTER_ORDER,
            sampling_rate_hz,
        )
    }

    /// Half the sampling frequency
    pub fn nyquist_hz(&self) -> f64 {
        self.sampling_rate_hz / 2.0
    }

    /// Check `0 < low < high < fs/2`. Violations are reported, never clamped.
    pub fn validate(&self) -> EmgResult<()> {
        let reject = |reason: String| EmgError::InvalidFilterSpec {
            low_hz: self.low_hz,
            high_hz: self.high_hz,
            sampling_rate_hz: self.sampling_rate_hz,
            reason,
        };

        if !(self.sampling_rate_hz.is_finite() && self.sampling_rate_hz > 0.0) {
            return Err(reject("sampling frequency must be positive and finite".to_string()));
        }
        if !(MIN_FILTER_ORDER..=MAX_FILTER_ORDER).contains(&self.order) {
            return Err(reject(format!(
                "order must be {}-{}, got {}",
                MIN_FILTER_ORDER, MAX_FILTER_ORDER, self.order
            )));
        }
        if !(self.low_hz.is_finite() && self.low_hz > 0.0) {
            return Err(reject("low cutoff must be positive".to_string()));
        }
        if !(self.high_hz > self.low_hz) {
            return Err(reject("high cutoff must exceed low cutoff".to_string()));
        }
        if !(self.high_hz < self.nyquist_hz()) {
            return Err(reject(format!(
                "high cutoff must be below Nyquist ({} Hz)",
                self.nyquist_hz()
            )));
        }
        Ok(())
    }
}

/// Transfer-function coefficients, `a[0] == 1`
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    /// Numerator
    pub b: Vec<f64>,
    /// Denominator
    pub a: Vec<f64>,
}

impl TransferFunction {
    /// Samples of odd extension filtfilt adds on each side
    pub fn padlen(&self) -> usize {
        PADLEN_FACTOR * self.b.len().max(self.a.len())
    }

    /// Number of delay elements in the direct-form realisation
    pub fn state_len(&self) -> usize {
        self.b.len().max(self.a.len()) - 1
    }

    /// Gain at z = 1
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

/// Which branch a filtering stage took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterPath {
    /// Forward-backward filtered
    ZeroPhase,
    /// Signal of `len` samples was not longer than the `required` padding and
    /// was passed through untouched
    Unfiltered {
        /// Input length
        len: usize,
        /// Length the input had to exceed
        required: usize,
    },
}

impl FilterPath {
    /// True when the band-pass actually ran
    pub fn is_filtered(&self) -> bool {
        matches!(self, FilterPath::ZeroPhase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_validation() {
        assert!(FilterSpec::new(50.0, 500.0, 4, 2000.0).validate().is_ok());
        assert!(FilterSpec::emg_default(1000.0).validate().is_ok());

        // High cutoff at or above Nyquist
        assert!(FilterSpec::new(50.0, 500.0, 4, 1000.0).validate().is_err());
        assert!(FilterSpec::new(50.0, 600.0, 4, 1000.0).validate().is_err());
        // Inverted band, zero order, bad rate
        assert!(FilterSpec::new(300.0, 200.0, 4, 2000.0).validate().is_err());
        assert!(FilterSpec::new(0.0, 200.0, 4, 2000.0).validate().is_err());
        assert!(FilterSpec::new(20.0, 200.0, 0, 2000.0).validate().is_err());
        assert!(FilterSpec::new(20.0, 200.0, 4, 0.0).validate().is_err());
        assert!(FilterSpec::new(20.0, f64::NAN, 4, 2000.0).validate().is_err());
    }

    #[test]
    fn test_spec_error_is_invalid_filter_spec() {
        let err = FilterSpec::new(50.0, 500.0, 4, 1000.0).validate().unwrap_err();
        assert!(matches!(err, EmgError::InvalidFilterSpec { .. }));
    }

    #[test]
    fn test_padlen() {
        let tf = TransferFunction {
            b: vec![0.0; 9],
            a: vec![0.0; 9],
        };
        assert_eq!(tf.padlen(), 27);
        assert_eq!(tf.state_len(), 8);
    }
}
