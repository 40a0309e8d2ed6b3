// src/processing/mvc.rs
//! Maximum voluntary contraction (MVC) estimation
//!
//! The recording is baseline-corrected, saturation spikes are zeroed, the
//! result is band-passed against a fixed reference sampling rate, rectified
//! and smoothed with the shrinking-window RMS. The MVC is the envelope peak.

use crate::config::MvcConfig;
use crate::error::EmgResult;
use crate::processing::envelope::moving_rms_shrinking;
use crate::processing::filter_bank::bandpass_or_passthrough;
use crate::processing::filters::{FilterPath, FilterSpec};
use crate::types::NanDrop;
use crate::utils::stats::{mean, nan_max};
use tracing::{debug, instrument};

/// MVC value and the envelope it was taken from
#[derive(Debug, Clone, PartialEq)]
pub struct MvcEstimate {
    /// Envelope peak; NaN when the input held no finite samples
    pub value: f64,
    /// Shrinking-window RMS envelope of the conditioned signal
    pub envelope: Vec<f64>,
    /// Whether the band-pass ran or the signal was passed through
    pub filter_path: FilterPath,
}

impl MvcEstimate {
    fn empty() -> Self {
        Self {
            value: f64::NAN,
            envelope: Vec::new(),
            filter_path: FilterPath::Unfiltered {
                len: 0,
                required: 0,
            },
        }
    }

    /// False for the NaN sentinel returned on empty input
    pub fn is_valid(&self) -> bool {
        !self.value.is_nan()
    }
}

/// Estimate MVC with the default reference rate, band and half window
pub fn estimate_mvc(signal: &[f64]) -> EmgResult<MvcEstimate> {
    estimate_mvc_with(signal, &MvcConfig::default())
}

/// Estimate MVC with every parameter taken from `config`.
///
/// The band-pass is designed for `config.reference_sampling_rate_hz`, not for
/// the recording's own rate. Signals no longer than the filter padding skip
/// filtering. Empty (or all-NaN) input returns the NaN sentinel, not an error.
#[instrument(level = "debug", skip(signal, config), fields(samples = signal.len()))]
pub fn estimate_mvc_with(signal: &[f64], config: &MvcConfig) -> EmgResult<MvcEstimate> {
    let NanDrop { samples, .. } = NanDrop::from_slice(signal);
    if samples.is_empty() {
        debug!("no finite samples, returning NaN sentinel");
        return Ok(MvcEstimate::empty());
    }

    let baseline = mean(&samples);
    let corrected: Vec<f64> = samples
        .iter()
        .map(|&x| x - baseline)
        .map(|x| if x > config.saturation_threshold { 0.0 } else { x })
        .collect();

    let spec = FilterSpec::new(
        config.low_cutoff_hz,
        config.high_cutoff_hz,
        config.filter_order,
        config.reference_sampling_rate_hz,
    );
    let (filtered, filter_path) = bandpass_or_passthrough(&corrected, &spec)?;

    let rectified: Vec<f64> = filtered.iter().map(|x| x.abs()).collect();
    let envelope = moving_rms_shrinking(&rectified, config.rms_half_window)?;
    let value = nan_max(&envelope).unwrap_or(f64::NAN);

    debug!(value, baseline, filtered = filter_path.is_filtered(), "mvc estimate");

    Ok(MvcEstimate {
        value,
        envelope,
        filter_path,
    })
}
