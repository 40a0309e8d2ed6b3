// src/config/constants.rs
//! System-wide processing constants

/// Signal-level constants
pub mod signal {
    /// Reference sEMG sampling frequency used by the MVC estimator
    pub const DEFAULT_SEMG_SAMPLING_RATE_HZ: f64 = 2000.0;
    /// Audio rate assumed by the activity detector when none is configured
    pub const DEFAULT_AUDIO_SAMPLING_RATE_HZ: f64 = 44100.0;
    /// Millisecond to second conversion factor
    pub const MILLISECONDS_PER_SECOND: f64 = 1000.0;
}

/// Bandpass filter constants
pub mod filters {
    /// General-purpose EMG band
    pub const DEFAULT_LOW_CUTOFF_HZ: f64 = 20.0;
    /// Upper edge of the general-purpose band
    pub const DEFAULT_HIGH_CUTOFF_HZ: f64 = 450.0;
    /// Butterworth prototype order for every default band
    pub const DEFAULT_FILTER_ORDER: usize = 4;

    /// Band used by the cleaning pipeline and the MVC estimator
    pub const SEMG_LOW_CUTOFF_HZ: f64 = 50.0;
    /// Upper edge of the cleaning and MVC band
    pub const SEMG_HIGH_CUTOFF_HZ: f64 = 500.0;

    /// Lowest accepted prototype order
    pub const MIN_FILTER_ORDER: usize = 1;
    /// Highest accepted prototype order
    pub const MAX_FILTER_ORDER: usize = 12;

    /// filtfilt pads `PADLEN_FACTOR * max(len(b), len(a))` samples per side
    pub const PADLEN_FACTOR: usize = 3;
}

/// Hampel outlier filter constants
pub mod outlier {
    /// Standalone Hampel window
    pub const DEFAULT_WINDOW_SAMPLES: usize = 51;
    /// Robust standard deviations before a sample counts as an outlier
    pub const DEFAULT_K: f64 = 3.0;
    /// Scales MAD to a standard-deviation estimate for Gaussian data
    pub const MAD_SCALE: f64 = 1.4826;
    /// Added to MAD so a locally constant window never flags every sample
    pub const MAD_FLOOR: f64 = 1e-12;
    /// Smallest Hampel window the cleaning pipeline will use
    pub const MIN_PIPELINE_WINDOW_SAMPLES: usize = 3;
}

/// Envelope constants
pub mod envelope {
    /// Cleaning pipeline RMS window
    pub const DEFAULT_RMS_WINDOW_MS: f64 = 50.0;
    /// Cleaning pipeline Hampel window
    pub const DEFAULT_HAMPEL_WINDOW_MS: f64 = 50.0;
    /// MVC shrinking-window RMS half width in samples
    pub const DEFAULT_MVC_HALF_WINDOW: usize = 3;
}

/// Activity detector constants
pub mod activity {
    /// Energy smoothing window
    pub const DEFAULT_MIN_SILENCE_S: f64 = 0.080;
    /// Shortest active run that survives
    pub const DEFAULT_MIN_SOUND_S: f64 = 0.200;
    /// Normalised smoothed energy below this is silence
    pub const ENERGY_THRESHOLD: f64 = 0.010;
}

/// MVC estimator constants
pub mod mvc {
    /// Samples above this (after baseline removal) are instrumentation spikes
    pub const SATURATION_THRESHOLD: f64 = 9800.0;
}
