//! EMG-Conditioning: offline biosignal conditioning for surface EMG
//!
//! This library turns raw single-channel recordings into analysis-ready
//! quantities. It provides:
//!
//! - Zero-phase Butterworth band-pass filtering
//! - Hampel outlier rejection
//! - Moving-RMS envelopes with two boundary policies
//! - Energy-based activity detection with minimum-duration enforcement
//! - An sEMG cleaning pipeline and an MVC estimator
//! - Parallel multi-channel processing over `ndarray` matrices
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emg_conditioning::{clean_semg, detect_activity, estimate_mvc};
//!
//! fn main() -> Result<(), emg_conditioning::EmgError> {
//!     let recording: Vec<f64> = (0..4000).map(|i| (i as f64 * 0.3).sin()).collect();
//!
//!     let cleaned = clean_semg(&recording, 2000.0, 50.0, 50.0)?;
//!     println!("envelope samples: {}", cleaned.envelope.len());
//!
//!     let mvc = estimate_mvc(&recording)?;
//!     println!("MVC: {:.3}", mvc.value);
//!
//!     let activity = detect_activity(&recording, 2000.0, 0.080, 0.200)?;
//!     println!("active segments: {:?}", activity.mask.segments());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod processing;
pub mod types;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{ConditioningConfig, ConfigLoader};
pub use error::{EmgError, EmgResult, ProcessingStage};
pub use processing::{
    bandpass, bandpass_or_passthrough, bandpass_with, batch, clean_semg, clean_semg_with,
    detect_activity, detect_activity_with, estimate_mvc, estimate_mvc_with, hampel, hampel_with,
    moving_rms_centered, moving_rms_shrinking, ActivityDetection, CleanedSignal, FilterPath, FilterSpec, MvcEstimate,
};
pub use types::{ActivityMask, NanDrop, Signal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Offline sEMG conditioning, activity detection and MVC estimation".to_string(),
        features: vec![
            "Zero-phase Butterworth band-pass".to_string(),
            "Hampel outlier rejection".to_string(),
            "Moving-RMS envelopes".to_string(),
            "Energy-based activity detection".to_string(),
            "MVC estimation".to_string(),
            "Parallel multi-channel batches".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert_eq!(info.name, NAME);
        assert_eq!(info.version, VERSION);
        assert!(!info.features.is_empty());
    }

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "emg-conditioning");
    }
}
