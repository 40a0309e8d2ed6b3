// src/processing/batch.rs
//! Multi-channel processing
//!
//! Each row of the input matrix is one channel. Channels are processed in
//! parallel with rayon and returned in row order; every channel goes through
//! exactly the single-channel code path, so results match a sequential loop.

use crate::config::{ActivityConfig, EmgCleaningConfig, MvcConfig};
use crate::error::{EmgError, EmgResult, ProcessingStage};
use crate::processing::activity::{detect_activity_with, ActivityDetection};
use crate::processing::mvc::{estimate_mvc_with, MvcEstimate};
use crate::processing::pipeline::{clean_semg_with, CleanedSignal};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::debug;

/// Run the cleaning pipeline on every channel
pub fn clean_channels(
    channels: ArrayView2<'_, f64>,
    sampling_rate_hz: f64,
    config: &EmgCleaningConfig,
) -> EmgResult<Vec<CleanedSignal>> {
    map_channels(channels, |samples| {
        clean_semg_with(samples, sampling_rate_hz, config)
    })
}

/// Estimate MVC for every channel
pub fn estimate_mvc_channels(
    channels: ArrayView2<'_, f64>,
    config: &MvcConfig,
) -> EmgResult<Vec<MvcEstimate>> {
    map_channels(channels, |samples| estimate_mvc_with(samples, config))
}

/// Run the activity detector on every channel
pub fn detect_activity_channels(
    channels: ArrayView2<'_, f64>,
    config: &ActivityConfig,
) -> EmgResult<Vec<ActivityDetection>> {
    map_channels(channels, |samples| detect_activity_with(samples, config))
}

/// Stack cleaned envelopes into a `channels × samples` matrix.
///
/// Fails when channels dropped different numbers of NaN samples and so no
/// longer share a length.
pub fn stack_envelopes(cleaned: &[CleanedSignal]) -> EmgResult<Array2<f64>> {
    let cols = cleaned.first().map_or(0, |c| c.envelope.len());
    if let Some((channel, c)) = cleaned
        .iter()
        .enumerate()
        .find(|(_, c)| c.envelope.len() != cols)
    {
        return Err(EmgError::invalid_parameters(
            ProcessingStage::Batch,
            format!(
                "channel {} envelope has {} samples, channel 0 has {}",
                channel,
                c.envelope.len(),
                cols
            ),
        ));
    }

    let flat: Vec<f64> = cleaned
        .iter()
        .flat_map(|c| c.envelope.iter().copied())
        .collect();
    Array2::from_shape_vec((cleaned.len(), cols), flat)
        .map_err(|e| EmgError::invalid_parameters(ProcessingStage::Batch, e.to_string()))
}

/// Apply `f` to each row in parallel. The first failing channel (in row
/// order) determines the error.
fn map_channels<T, F>(channels: ArrayView2<'_, f64>, f: F) -> EmgResult<Vec<T>>
where
    T: Send,
    F: Fn(&[f64]) -> EmgResult<T> + Sync,
{
    let rows: Vec<ArrayView1<'_, f64>> = channels.outer_iter().collect();
    debug!(
        channels = rows.len(),
        samples = channels.ncols(),
        "batch processing"
    );

    let results: Vec<EmgResult<T>> = rows
        .par_iter()
        .map(|row| f(&contiguous(row)))
        .collect();
    results.into_iter().collect()
}

fn contiguous<'a>(row: &'a ArrayView1<'_, f64>) -> Cow<'a, [f64]> {
    match row.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(row.to_vec()),
    }
}
