// src/processing/activity.rs
//! Energy-based activity detection
//!
//! Instantaneous energy is smoothed over the minimum silence duration,
//! normalised to its peak and thresholded. Active runs shorter than the
//! minimum sound duration are then suppressed.

use crate::config::ActivityConfig;
use crate::error::{EmgError, EmgResult, ProcessingStage};
use crate::processing::envelope::centered_moving_mean;
use crate::types::ActivityMask;
use crate::utils::conversion::{samples_to_seconds, seconds_to_samples};
use tracing::debug;

/// Mask and gated signal produced by the detector
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDetection {
    /// Per-sample decision after run suppression
    pub mask: ActivityMask,
    /// Input where active, exactly `0.0` elsewhere
    pub gated: Vec<f64>,
}

impl ActivityDetection {
    /// Active segments as `(start_s, end_s)` spans
    pub fn segments_seconds(&self, sampling_rate_hz: f64) -> Vec<(f64, f64)> {
        self.mask
            .segments()
            .into_iter()
            .map(|r| {
                (
                    samples_to_seconds(sampling_rate_hz, r.start),
                    samples_to_seconds(sampling_rate_hz, r.end),
                )
            })
            .collect()
    }
}

/// Detect activity with the default energy threshold
pub fn detect_activity(
    signal: &[f64],
    sampling_rate_hz: f64,
    min_silence_s: f64,
    min_sound_s: f64,
) -> EmgResult<ActivityDetection> {
    detect_activity_with(
        signal,
        &ActivityConfig {
            sampling_rate_hz,
            min_silence_s,
            min_sound_s,
            ..ActivityConfig::default()
        },
    )
}

/// Detect activity using every parameter from `config`
pub fn detect_activity_with(signal: &[f64], config: &ActivityConfig) -> EmgResult<ActivityDetection> {
    validate(config)?;

    let fs = config.sampling_rate_hz;
    let smoothing = seconds_to_samples(fs, config.min_silence_s).max(1);
    let min_run = seconds_to_samples(fs, config.min_sound_s).max(1);

    let energy: Vec<f64> = signal
        .iter()
        .map(|x| if x.is_nan() { 0.0 } else { x * x })
        .collect();

    let mut smoothed = centered_moving_mean(&energy, smoothing);
    let peak = smoothed.iter().copied().fold(0.0, f64::max);
    if peak > 0.0 {
        smoothed.iter_mut().for_each(|e| *e /= peak);
    }

    let mut active: Vec<bool> = smoothed
        .iter()
        .map(|&e| e >= config.energy_threshold)
        .collect();
    suppress_short_runs(&mut active, min_run);

    let gated = signal
        .iter()
        .zip(&active)
        .map(|(&x, &a)| if a { x } else { 0.0 })
        .collect();
    let mask = ActivityMask::new(active);

    debug!(
        samples = signal.len(),
        smoothing,
        min_run,
        active = mask.active_count(),
        "activity detection"
    );

    Ok(ActivityDetection { mask, gated })
}

fn validate(config: &ActivityConfig) -> EmgResult<()> {
    let reject = |reason: String| {
        Err(EmgError::invalid_parameters(
            ProcessingStage::ActivityDetection,
            reason,
        ))
    };

    if !(config.min_sound_s > config.min_silence_s) {
        return reject(format!(
            "min_sound ({} s) must be larger than min_silence ({} s)",
            config.min_sound_s, config.min_silence_s
        ));
    }
    if !(config.sampling_rate_hz.is_finite() && config.sampling_rate_hz > 0.0) {
        return reject(format!(
            "sampling rate must be positive, got {} Hz",
            config.sampling_rate_hz
        ));
    }
    if !(config.min_silence_s.is_finite() && config.min_sound_s.is_finite()) {
        return reject("durations must be finite".to_string());
    }
    Ok(())
}

/// Clear every active run shorter than `min_run`, including a trailing one
fn suppress_short_runs(active: &mut [bool], min_run: usize) {
    let mut run = 0;
    for i in 0..active.len() {
        if active[i] {
            run += 1;
        } else {
            if run > 0 && run < min_run {
                active[i - run..i].fill(false);
            }
            run = 0;
        }
    }
    let n = active.len();
    if run > 0 && run < min_run {
        active[n - run..].fill(false);
    }
}
