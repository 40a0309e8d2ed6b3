// src/config/mod.rs
//! Configuration for the conditioning pipelines

pub mod constants;
pub mod loader;
pub mod processing_config;

pub use constants::*;
pub use loader::ConfigLoader;
pub use processing_config::*;

use serde::{Deserialize, Serialize};

/// Complete configuration for every processing stage
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ConditioningConfig {
    /// Standalone band-pass
    #[serde(default)]
    pub bandpass: FilterBankConfig,

    /// Standalone Hampel filter
    #[serde(default)]
    pub hampel: HampelConfig,

    /// sEMG cleaning pipeline
    #[serde(default)]
    pub emg: EmgCleaningConfig,

    /// Activity detector
    #[serde(default)]
    pub activity: ActivityConfig,

    /// MVC estimator
    #[serde(default)]
    pub mvc: MvcConfig,
}

impl ConditioningConfig {
    /// Validate configuration consistency, collecting every violation
    pub fn validate_consistency(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        self.bandpass.collect_errors(&mut errors);
        self.hampel.collect_errors(&mut errors);
        self.emg.collect_errors(&mut errors);
        self.activity.collect_errors(&mut errors);
        self.mvc.collect_errors(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
