// src/processing/mod.rs
//! Signal conditioning stages
//!
//! Every stage is a pure function of its input and explicit parameters.

pub mod activity;
pub mod batch;
pub mod envelope;
pub mod filter_bank;
pub mod filters;
pub mod mvc;
pub mod outlier;
pub mod pipeline;

pub use activity::{detect_activity, detect_activity_with, ActivityDetection};
pub use envelope::{moving_rms_centered, moving_rms_shrinking};
pub use filter_bank::{bandpass, bandpass_or_passthrough, bandpass_spec, bandpass_with};
pub use filters::{FilterPath, FilterSpec, TransferFunction};
pub use mvc::{estimate_mvc, estimate_mvc_with, MvcEstimate};
pub use outlier::{hampel, hampel_with};
pub use pipeline::{clean_semg, clean_semg_with, CleanedSignal};
