// src/config/processing_config.rs
//! Signal processing configuration structures

use crate::config::constants::*;
use crate::processing::filters::FilterSpec;
use serde::{Deserialize, Serialize};

/// `[bandpass]` section read by `bandpass_with`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilterBankConfig {
    /// Lower band edge in Hz
    #[serde(default = "defaults::bandpass_low_hz")]
    pub low_cutoff_hz: f64,

    /// Upper band edge in Hz
    #[serde(default = "defaults::bandpass_high_hz")]
    pub high_cutoff_hz: f64,

    /// Butterworth prototype order
    #[serde(default = "defaults::filter_order")]
    pub filter_order: usize,
}

/// `[hampel]` section read by `hampel_with`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HampelConfig {
    /// Window length, forced odd
    #[serde(default = "defaults::hampel_window_samples")]
    pub window_samples: usize,

    /// Outlier threshold in robust standard deviations
    #[serde(default = "defaults::hampel_k")]
    pub k: f64,
}

/// sEMG cleaning pipeline parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EmgCleaningConfig {
    /// Lower band edge in Hz
    #[serde(default = "defaults::semg_low_hz")]
    pub low_cutoff_hz: f64,

    /// Upper band edge in Hz
    #[serde(default = "defaults::semg_high_hz")]
    pub high_cutoff_hz: f64,

    /// Butterworth prototype order
    #[serde(default = "defaults::filter_order")]
    pub filter_order: usize,

    /// Policy-A RMS window length
    #[serde(default = "defaults::rms_window_ms")]
    pub rms_window_ms: f64,

    /// Hampel window applied to the envelope
    #[serde(default = "defaults::hampel_window_ms")]
    pub hampel_window_ms: f64,

    /// Outlier threshold in robust standard deviations
    #[serde(default = "defaults::hampel_k")]
    pub hampel_k: f64,
}

/// Energy-based activity detector parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ActivityConfig {
    /// Sampling frequency of the recording
    #[serde(default = "defaults::audio_sampling_rate_hz")]
    pub sampling_rate_hz: f64,

    /// Energy smoothing window in seconds
    #[serde(default = "defaults::min_silence_s")]
    pub min_silence_s: f64,

    /// Shortest active run kept, in seconds
    #[serde(default = "defaults::min_sound_s")]
    pub min_sound_s: f64,

    /// Normalised energy at or above which a sample is active
    #[serde(default = "defaults::energy_threshold")]
    pub energy_threshold: f64,
}

/// MVC estimator parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MvcConfig {
    /// Rate the bandpass is designed against, regardless of the recording
    #[serde(default = "defaults::semg_sampling_rate_hz")]
    pub reference_sampling_rate_hz: f64,

    /// Lower band edge in Hz
    #[serde(default = "defaults::semg_low_hz")]
    pub low_cutoff_hz: f64,

    /// Upper band edge in Hz
    #[serde(default = "defaults::semg_high_hz")]
    pub high_cutoff_hz: f64,

    /// Butterworth prototype order
    #[serde(default = "defaults::filter_order")]
    pub filter_order: usize,

    /// Baseline-corrected samples above this are zeroed
    #[serde(default = "defaults::saturation_threshold")]
    pub saturation_threshold: f64,

    /// Policy-B RMS half window
    #[serde(default = "defaults::mvc_half_window")]
    pub rms_half_window: usize,
}

mod defaults {
    use super::*;

    pub fn bandpass_low_hz() -> f64 { filters::DEFAULT_LOW_CUTOFF_HZ }
    pub fn bandpass_high_hz() -> f64 { filters::DEFAULT_HIGH_CUTOFF_HZ }
    pub fn filter_order() -> usize { filters::DEFAULT_FILTER_ORDER }
    pub fn semg_low_hz() -> f64 { filters::SEMG_LOW_CUTOFF_HZ }
    pub fn semg_high_hz() -> f64 { filters::SEMG_HIGH_CUTOFF_HZ }

    pub fn hampel_window_samples() -> usize { outlier::DEFAULT_WINDOW_SAMPLES }
    pub fn hampel_k() -> f64 { outlier::DEFAULT_K }

    pub fn rms_window_ms() -> f64 { envelope::DEFAULT_RMS_WINDOW_MS }
    pub fn hampel_window_ms() -> f64 { envelope::DEFAULT_HAMPEL_WINDOW_MS }
    pub fn mvc_half_window() -> usize { envelope::DEFAULT_MVC_HALF_WINDOW }

    pub fn audio_sampling_rate_hz() -> f64 { signal::DEFAULT_AUDIO_SAMPLING_RATE_HZ }
    pub fn semg_sampling_rate_hz() -> f64 { signal::DEFAULT_SEMG_SAMPLING_RATE_HZ }
    pub fn min_silence_s() -> f64 { activity::DEFAULT_MIN_SILENCE_S }
    pub fn min_sound_s() -> f64 { activity::DEFAULT_MIN_SOUND_S }
    pub fn energy_threshold() -> f64 { activity::ENERGY_THRESHOLD }

    pub fn saturation_threshold() -> f64 { mvc::SATURATION_THRESHOLD }
}

impl Default for FilterBankConfig {
    fn default() -> Self {
        Self {
            low_cutoff_hz: defaults::bandpass_low_hz(),
            high_cutoff_hz: defaults::bandpass_high_hz(),
            filter_order: defaults::filter_order(),
        }
    }
}

impl Default for HampelConfig {
    fn default() -> Self {
        Self {
            window_samples: defaults::hampel_window_samples(),
            k: defaults::hampel_k(),
        }
    }
}

impl Default for EmgCleaningConfig {
    fn default() -> Self {
        Self {
            low_cutoff_hz: defaults::semg_low_hz(),
            high_cutoff_hz: defaults::semg_high_hz(),
            filter_order: defaults::filter_order(),
            rms_window_ms: defaults::rms_window_ms(),
            hampel_window_ms: defaults::hampel_window_ms(),
            hampel_k: defaults::hampel_k(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: defaults::audio_sampling_rate_hz(),
            min_silence_s: defaults::min_silence_s(),
            min_sound_s: defaults::min_sound_s(),
            energy_threshold: defaults::energy_threshold(),
        }
    }
}

impl Default for MvcConfig {
    fn default() -> Self {
        Self {
            reference_sampling_rate_hz: defaults::semg_sampling_rate_hz(),
            low_cutoff_hz: defaults::semg_low_hz(),
            high_cutoff_hz: defaults::semg_high_hz(),
            filter_order: defaults::filter_order(),
            saturation_threshold: defaults::saturation_threshold(),
            rms_half_window: defaults::mvc_half_window(),
        }
    }
}

fn check_band(errors: &mut Vec<String>, section: &str, low: f64, high: f64, order: usize) {
    if !(low > 0.0) {
        errors.push(format!("{}: low cutoff must be positive (got {})", section, low));
    }
    if !(high > low) {
        errors.push(format!(
            "{}: high cutoff ({} Hz) must exceed low cutoff ({} Hz)",
            section, high, low
        ));
    }
    if !(filters::MIN_FILTER_ORDER..=filters::MAX_FILTER_ORDER).contains(&order) {
        errors.push(format!(
            "{}: filter order must be {}-{} (got {})",
            section,
            filters::MIN_FILTER_ORDER,
            filters::MAX_FILTER_ORDER,
            order
        ));
    }
}

impl FilterBankConfig {
    /// Filter spec for a recording sampled at `sampling_rate_hz`
    pub fn spec(&self, sampling_rate_hz: f64) -> FilterSpec {
        FilterSpec::new(
            self.low_cutoff_hz,
            self.high_cutoff_hz,
            self.filter_order,
            sampling_rate_hz,
        )
    }

    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        check_band(errors, "bandpass", self.low_cutoff_hz, self.high_cutoff_hz, self.filter_order);
    }
}

impl HampelConfig {
    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        if self.window_samples == 0 {
            errors.push("hampel: window must be at least one sample".to_string());
        }
        if !(self.k >= 0.0) {
            errors.push(format!("hampel: k must be non-negative (got {})", self.k));
        }
    }
}

impl EmgCleaningConfig {
    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        check_band(errors, "emg", self.low_cutoff_hz, self.high_cutoff_hz, self.filter_order);
        if !(self.rms_window_ms > 0.0) {
            errors.push(format!("emg: RMS window must be positive (got {} ms)", self.rms_window_ms));
        }
        if !(self.hampel_window_ms > 0.0) {
            errors.push(format!(
                "emg: Hampel window must be positive (got {} ms)",
                self.hampel_window_ms
            ));
        }
        if !(self.hampel_k >= 0.0) {
            errors.push(format!("emg: Hampel k must be non-negative (got {})", self.hampel_k));
        }
    }
}

impl ActivityConfig {
    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        if !(self.sampling_rate_hz > 0.0) {
            errors.push(format!(
                "activity: sampling rate must be positive (got {} Hz)",
                self.sampling_rate_hz
            ));
        }
        if !(self.min_sound_s > self.min_silence_s) {
            errors.push(format!(
                "activity: min_sound ({} s) must be larger than min_silence ({} s)",
                self.min_sound_s, self.min_silence_s
            ));
        }
        if !(0.0..=1.0).contains(&self.energy_threshold) {
            errors.push(format!(
                "activity: energy threshold must be within 0-1 (got {})",
                self.energy_threshold
            ));
        }
    }
}

impl MvcConfig {
    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        check_band(errors, "mvc", self.low_cutoff_hz, self.high_cutoff_hz, self.filter_order);
        let nyquist = self.reference_sampling_rate_hz / 2.0;
        if !(self.high_cutoff_hz < nyquist) {
            errors.push(format!(
                "mvc: high cutoff ({} Hz) must be below Nyquist ({} Hz)",
                self.high_cutoff_hz, nyquist
            ));
        }
        if self.rms_half_window == 0 {
            errors.push("mvc: RMS half window must be at least one sample".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(f: impl FnOnce(&mut Vec<String>)) -> Vec<String> {
        let mut errors = Vec::new();
        f(&mut errors);
        errors
    }

    #[test]
    fn test_defaults_match_constants() {
        let mvc = MvcConfig::default();
        assert_eq!(mvc.saturation_threshold, 9800.0);
        assert_eq!(mvc.rms_half_window, 3);
        assert_eq!(mvc.reference_sampling_rate_hz, 2000.0);

        let activity = ActivityConfig::default();
        assert_eq!(activity.min_silence_s, 0.080);
        assert_eq!(activity.min_sound_s, 0.200);
        assert_eq!(activity.sampling_rate_hz, 44100.0);

        let hampel = HampelConfig::default();
        assert_eq!(hampel.window_samples, 51);
        assert_eq!(hampel.k, 3.0);
    }

    #[test]
    fn test_invalid_band() {
        let config = FilterBankConfig {
            low_cutoff_hz: 100.0,
            high_cutoff_hz: 50.0,
            filter_order: 0,
        };
        let errors = errors_of(|e| config.collect_errors(e));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_bandpass_section_builds_spec() {
        let config: FilterBankConfig = toml::from_str("high_cutoff_hz = 300.0").unwrap();
        let spec = config.spec(1000.0);
        assert_eq!(spec.low_hz, filters::DEFAULT_LOW_CUTOFF_HZ);
        assert_eq!(spec.high_hz, 300.0);
        assert_eq!(spec.order, filters::DEFAULT_FILTER_ORDER);
        assert_eq!(spec.sampling_rate_hz, 1000.0);
    }

    #[test]
    fn test_mvc_nyquist_check() {
        let config = MvcConfig {
            reference_sampling_rate_hz: 1000.0,
            ..Default::default()
        };
        let errors = errors_of(|e| config.collect_errors(e));
        assert!(errors.iter().any(|e| e.contains("Nyquist")));
    }

    #[test]
    fn test_activity_duration_order() {
        let config = ActivityConfig {
            min_sound_s: 0.05,
            ..Default::default()
        };
        let errors = errors_of(|e| config.collect_errors(e));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("min_sound"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EmgCleaningConfig = toml::from_str("rms_window_ms = 25.0").unwrap();
        assert_eq!(config.rms_window_ms, 25.0);
        assert_eq!(config.hampel_window_ms, 50.0);
        assert_eq!(config.filter_order, 4);
    }
}
