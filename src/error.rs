// src/error.rs
//! Unified error handling for the conditioning core
//!
//! Parameter-validation failures are raised immediately and never coerced.
//! Numerically degenerate inputs (all-NaN, zero energy, too short for
//! zero-phase filtering) are not errors: the processing stages handle them via
//! documented sentinel or fallback paths and report which one they took.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error type for every processing stage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmgError {
    /// Cutoffs, order or sampling frequency inconsistent with the Nyquist limit
    #[error("[FILTER] Invalid filter spec {low_hz}-{high_hz} Hz at fs={sampling_rate_hz} Hz: {reason}")]
    InvalidFilterSpec {
        /// Requested lower edge
        low_hz: f64,
        /// Requested upper edge
        high_hz: f64,
        /// Sampling frequency the band was checked against
        sampling_rate_hz: f64,
        /// Which constraint failed
        reason: String,
    },

    /// Stage parameters that can never produce a meaningful result
    #[error("[PARAMS] {stage} stage: {reason}")]
    InvalidParameters {
        /// Stage that rejected the parameters
        stage: ProcessingStage,
        /// Which parameter and why
        reason: String,
    },

    /// Signal shorter than the transient padding required by filtfilt
    #[error("[FILTER] Signal too short for zero-phase filtering: {len} samples, need more than {required}")]
    SignalTooShort {
        /// Signal length
        len: usize,
        /// Length the signal must exceed
        required: usize,
    },

    /// Configuration loading and validation errors
    #[error("[CONFIG] {reason}")]
    Configuration {
        /// Source error or joined validation messages
        reason: String,
    },
}

/// Processing stages for error tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingStage {
    /// Band-pass design and application
    Filtering,
    /// Hampel filter
    OutlierRejection,
    /// Moving-RMS envelopes
    Envelope,
    /// Energy-based activity detector
    ActivityDetection,
    /// MVC estimator
    MvcEstimation,
    /// Multi-channel collection and stacking
    Batch,
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingStage::Filtering => "filtering",
            ProcessingStage::OutlierRejection => "outlier-rejection",
            ProcessingStage::Envelope => "envelope",
            ProcessingStage::ActivityDetection => "activity-detection",
            ProcessingStage::MvcEstimation => "mvc-estimation",
            ProcessingStage::Batch => "batch",
        };
        f.write_str(name)
    }
}

impl EmgError {
    /// Shorthand for an `InvalidParameters` error
    pub fn invalid_parameters(stage: ProcessingStage, reason: impl Into<String>) -> Self {
        EmgError::InvalidParameters {
            stage,
            reason: reason.into(),
        }
    }

    /// Shorthand for a `Configuration` error
    pub fn configuration(reason: impl Into<String>) -> Self {
        EmgError::Configuration {
            reason: reason.into(),
        }
    }

    /// True for errors caused by caller-supplied parameters
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            EmgError::InvalidFilterSpec { .. } | EmgError::InvalidParameters { .. }
        )
    }
}

impl From<config::ConfigError> for EmgError {
    fn from(err: config::ConfigError) -> Self {
        EmgError::configuration(err.to_string())
    }
}

impl From<toml::ser::Error> for EmgError {
    fn from(err: toml::ser::Error) -> Self {
        EmgError::configuration(format!("serialization failed: {}", err))
    }
}

impl From<std::io::Error> for EmgError {
    fn from(err: std::io::Error) -> Self {
        EmgError::configuration(format!("io error: {}", err))
    }
}

/// Result type alias for EMG operations
pub type EmgResult<T> = Result<T, EmgError>;
