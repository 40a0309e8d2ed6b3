// src/processing/pipeline.rs
//! sEMG cleaning pipeline
//!
//! NaN removal, zero-phase band-pass, full-wave rectification, centered
//! moving-RMS envelope, then a Hampel pass over the envelope.

use crate::config::constants::outlier::MIN_PIPELINE_WINDOW_SAMPLES;
use crate::config::EmgCleaningConfig;
use crate::error::EmgResult;
use crate::processing::envelope::moving_rms_centered;
use crate::processing::filter_bank::bandpass_or_passthrough;
use crate::processing::filters::{FilterPath, FilterSpec};
use crate::processing::outlier::hampel;
use crate::types::NanDrop;
use crate::utils::conversion::ms_to_samples;
use tracing::{debug, instrument};

/// Envelope produced by [`clean_semg`]
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSignal {
    /// One value per non-NaN input sample
    pub envelope: Vec<f64>,
    /// Whether the band-pass ran or the signal was passed through
    pub filter_path: FilterPath,
    /// NaN samples removed before filtering
    pub dropped_nan: usize,
}

impl CleanedSignal {
    /// True when the input held no finite samples
    pub fn is_empty(&self) -> bool {
        self.envelope.is_empty()
    }
}

/// Clean a raw sEMG recording with the default band, order and `k`.
///
/// `rms_ms` sizes the RMS window (`max(1, ⌊fs·rms_ms/1000⌋)` samples) and
/// `hampel_ms` the Hampel window (`max(3, ⌊fs·hampel_ms/1000⌋) | 1`).
pub fn clean_semg(
    signal: &[f64],
    sampling_rate_hz: f64,
    rms_ms: f64,
    hampel_ms: f64,
) -> EmgResult<CleanedSignal> {
    clean_semg_with(
        signal,
        sampling_rate_hz,
        &EmgCleaningConfig {
            rms_window_ms: rms_ms,
            hampel_window_ms: hampel_ms,
            ..EmgCleaningConfig::default()
        },
    )
}

/// Clean a raw sEMG recording with every parameter taken from `config`.
///
/// Fails with `InvalidFilterSpec` when the band does not fit below `fs / 2`
/// (an input that is empty after NaN removal returns before the check).
/// Signals too short to filter are rectified and smoothed unfiltered, which
/// `filter_path` reports. NaN samples are dropped, so the envelope is shorter
/// than the input when any were present; see [`NanDrop::realign`].
#[instrument(level = "debug", skip(signal, config), fields(samples = signal.len()))]
pub fn clean_semg_with(
    signal: &[f64],
    sampling_rate_hz: f64,
    config: &EmgCleaningConfig,
) -> EmgResult<CleanedSignal> {
    let NanDrop {
        samples, dropped, ..
    } = NanDrop::from_slice(signal);
    if dropped > 0 {
        debug!(dropped, "dropped NaN samples");
    }

    if samples.is_empty() {
        return Ok(CleanedSignal {
            envelope: Vec::new(),
            filter_path: FilterPath::Unfiltered {
                len: 0,
                required: 0,
            },
            dropped_nan: dropped,
        });
    }

    let spec = FilterSpec::new(
        config.low_cutoff_hz,
        config.high_cutoff_hz,
        config.filter_order,
        sampling_rate_hz,
    );
    let (filtered, filter_path) = bandpass_or_passthrough(&samples, &spec)?;
    let rectified: Vec<f64> = filtered.iter().map(|x| x.abs()).collect();

    let rms_window = ms_to_samples(sampling_rate_hz, config.rms_window_ms).max(1);
    let hampel_window =
        ms_to_samples(sampling_rate_hz, config.hampel_window_ms).max(MIN_PIPELINE_WINDOW_SAMPLES) | 1;
    debug!(rms_window, hampel_window, "envelope windows");

    let envelope = moving_rms_centered(&rectified, rms_window);
    let envelope = hampel(&envelope, hampel_window, config.hampel_k);

    Ok(CleanedSignal {
        envelope,
        filter_path,
        dropped_nan: dropped,
    })
}
