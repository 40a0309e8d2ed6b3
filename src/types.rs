// src/types.rs
//! Core value types shared by the processing stages

use crate::config::{ActivityConfig, EmgCleaningConfig, MvcConfig};
use crate::error::{EmgError, EmgResult, ProcessingStage};
use crate::processing::activity::{detect_activity_with, ActivityDetection};
use crate::processing::mvc::{estimate_mvc_with, MvcEstimate};
use crate::processing::pipeline::{clean_semg_with, CleanedSignal};
use crate::utils::conversion::samples_to_seconds;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A sampled signal with its sampling frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_rate_hz: f64,
}

/// Samples that survived NaN removal and where they came from
#[derive(Debug, Clone, PartialEq)]
pub struct NanDrop {
    /// Non-NaN samples in their original order
    pub samples: Vec<f64>,
    /// Index in the original signal of each kept sample
    pub kept_indices: Vec<usize>,
    /// Number of NaN samples removed
    pub dropped: usize,
}

impl NanDrop {
    /// Remove NaN samples from `values`
    pub fn from_slice(values: &[f64]) -> Self {
        let mut samples = Vec::with_capacity(values.len());
        let mut kept_indices = Vec::with_capacity(values.len());
        for (i, &v) in values.iter().enumerate() {
            if !v.is_nan() {
                samples.push(v);
                kept_indices.push(i);
            }
        }
        let dropped = values.len() - samples.len();
        Self {
            samples,
            kept_indices,
            dropped,
        }
    }

    /// Scatter `processed` (one value per kept sample) back to the original
    /// length, filling dropped positions with `fill`.
    pub fn realign(&self, processed: &[f64], fill: f64) -> Vec<f64> {
        let len = self.samples.len() + self.dropped;
        let mut out = vec![fill; len];
        for (&idx, &v) in self.kept_indices.iter().zip(processed) {
            out[idx] = v;
        }
        out
    }
}

impl Signal {
    /// Fails with `InvalidParameters` unless the rate is positive and finite
    pub fn new(samples: Vec<f64>, sampling_rate_hz: f64) -> EmgResult<Self> {
        if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
            return Err(EmgError::invalid_parameters(
                ProcessingStage::Filtering,
                format!("sampling rate must be positive, got {} Hz", sampling_rate_hz),
            ));
        }
        Ok(Self {
            samples,
            sampling_rate_hz,
        })
    }

    /// Raw samples, NaN included
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling frequency in Hz
    pub fn sampling_rate_hz(&self) -> f64 {
        self.sampling_rate_hz
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recording length in seconds
    pub fn duration_s(&self) -> f64 {
        samples_to_seconds(self.sampling_rate_hz, self.samples.len())
    }

    /// Consume the signal, keeping its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// NaN-free copy plus the index map needed to realign results
    pub fn drop_nan(&self) -> NanDrop {
        NanDrop::from_slice(&self.samples)
    }

    /// Run the sEMG cleaning pipeline at this signal's rate
    pub fn clean(&self, config: &EmgCleaningConfig) -> EmgResult<CleanedSignal> {
        clean_semg_with(&self.samples, self.sampling_rate_hz, config)
    }

    /// Run the activity detector at this signal's rate. The rate in `config`
    /// is ignored.
    pub fn detect_activity(&self, config: &ActivityConfig) -> EmgResult<ActivityDetection> {
        let config = ActivityConfig {
            sampling_rate_hz: self.sampling_rate_hz,
            ..config.clone()
        };
        detect_activity_with(&self.samples, &config)
    }

    /// Estimate MVC. The estimator designs its filter for the configured
    /// reference rate, not this signal's rate.
    pub fn estimate_mvc(&self, config: &MvcConfig) -> EmgResult<MvcEstimate> {
        estimate_mvc_with(&self.samples, config)
    }
}

/// Per-sample activity decision, `true` = active
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityMask(Vec<bool>);

impl ActivityMask {
    /// Wrap per-sample decisions
    pub fn new(active: Vec<bool>) -> Self {
        Self(active)
    }

    /// Borrow the per-sample decisions
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// 0/1 view
    pub fn as_binary(&self) -> Vec<u8> {
        self.0.iter().map(|&a| u8::from(a)).collect()
    }

    /// Number of samples covered
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a mask over an empty signal
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of active samples
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&a| a).count()
    }

    /// Half-open index ranges of consecutive active samples
    pub fn segments(&self) -> Vec<Range<usize>> {
        let mut segments = Vec::new();
        let mut start = None;
        for (i, &active) in self.0.iter().enumerate() {
            match (active, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    segments.push(s..i);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            segments.push(s..self.0.len());
        }
        segments
    }
}

impl From<Vec<bool>> for ActivityMask {
    fn from(active: Vec<bool>) -> Self {
        Self(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_rejects_bad_rate() {
        assert!(Signal::new(vec![1.0], 0.0).is_err());
        assert!(Signal::new(vec![1.0], -5.0).is_err());
        assert!(Signal::new(vec![1.0], f64::INFINITY).is_err());
        let signal = Signal::new(vec![0.0; 4000], 2000.0).unwrap();
        assert_eq!(signal.duration_s(), 2.0);
    }

    #[test]
    fn test_drop_nan_keeps_indices() {
        let signal = Signal::new(vec![1.0, f64::NAN, 3.0, f64::NAN, 5.0], 100.0).unwrap();
        let drop = signal.drop_nan();

        assert_eq!(drop.samples, vec![1.0, 3.0, 5.0]);
        assert_eq!(drop.kept_indices, vec![0, 2, 4]);
        assert_eq!(drop.dropped, 2);

        let realigned = drop.realign(&[10.0, 30.0, 50.0], 0.0);
        assert_eq!(realigned, vec![10.0, 0.0, 30.0, 0.0, 50.0]);
    }

    #[test]
    fn test_mask_segments() {
        let mask = ActivityMask::new(vec![false, true, true, false, true]);
        assert_eq!(mask.segments(), vec![1..3, 4..5]);
        assert_eq!(mask.active_count(), 3);
        assert_eq!(mask.as_binary(), vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_empty_mask() {
        let mask = ActivityMask::default();
        assert!(mask.is_empty());
        assert!(mask.segments().is_empty());
    }
}
