// src/processing/filters/zero_phase.rs
//! Forward-backward (zero-phase) IIR application
//!
//! The signal is extended at both ends by odd reflection, filtered forward
//! from steady-state initial conditions, filtered again in reverse, and
//! trimmed back to its original length.

use super::TransferFunction;
use crate::error::{EmgError, EmgResult};

/// Run `tf` over `input` in transposed direct form II.
///
/// `initial` seeds the delay line; `None` starts from rest.
pub fn lfilter(tf: &TransferFunction, input: &[f64], initial: Option<&[f64]>) -> Vec<f64> {
    let (b, a) = normalized(tf);
    let order = b.len() - 1;
    let mut state = match initial {
        Some(zi) => zi.to_vec(),
        None => vec![0.0; order],
    };
    state.resize(order, 0.0);

    let mut output = Vec::with_capacity(input.len());
    for &x in input {
        let y = b[0] * x + state.first().copied().unwrap_or(0.0);
        for i in 0..order {
            let carry = if i + 1 < order { state[i + 1] } else { 0.0 };
            state[i] = b[i + 1] * x - a[i + 1] * y + carry;
        }
        output.push(y);
    }
    output
}

/// Delay-line state for which a unit step input is already at steady state
pub fn lfilter_zi(tf: &TransferFunction) -> Vec<f64> {
    let (b, a) = normalized(tf);
    let order = b.len() - 1;
    let a_sum: f64 = a.iter().sum();
    let steady = if a_sum != 0.0 {
        b.iter().sum::<f64>() / a_sum
    } else {
        0.0
    };

    // z_i = sum_{k > i} (b_k - a_k * y_ss)
    let mut zi = vec![0.0; order];
    let mut acc = 0.0;
    for i in (0..order).rev() {
        acc += b[i + 1] - a[i + 1] * steady;
        zi[i] = acc;
    }
    zi
}

/// Zero-phase filtering. Fails with `SignalTooShort` when
/// `input.len() <= tf.padlen()`.
pub fn filtfilt(tf: &TransferFunction, input: &[f64]) -> EmgResult<Vec<f64>> {
    let padlen = tf.padlen();
    if input.len() <= padlen {
        return Err(EmgError::SignalTooShort {
            len: input.len(),
            required: padlen,
        });
    }

    let extended = odd_extension(input, padlen);
    let zi = lfilter_zi(tf);

    let scaled = |scale: f64| zi.iter().map(|z| z * scale).collect::<Vec<_>>();

    let mut forward = lfilter(tf, &extended, Some(&scaled(extended[0])));
    forward.reverse();
    let mut backward = lfilter(tf, &forward, Some(&scaled(forward[0])));
    backward.reverse();

    Ok(backward[padlen..backward.len() - padlen].to_vec())
}

/// Point-reflect `pad` samples about each endpoint. Requires `pad < input.len()`.
fn odd_extension(input: &[f64], pad: usize) -> Vec<f64> {
    let n = input.len();
    let first = input[0];
    let last = input[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - input[i]));
    extended.extend_from_slice(input);
    extended.extend((1..=pad).map(|i| 2.0 * last - input[n - 1 - i]));
    extended
}

/// Coefficients padded to equal length and scaled so `a[0] == 1`
fn normalized(tf: &TransferFunction) -> (Vec<f64>, Vec<f64>) {
    let len = tf.b.len().max(tf.a.len()).max(1);
    let a0 = tf.a.first().copied().filter(|&v| v != 0.0).unwrap_or(1.0);

    let mut b: Vec<f64> = tf.b.iter().map(|v| v / a0).collect();
    let mut a: Vec<f64> = tf.a.iter().map(|v| v / a0).collect();
    b.resize(len, 0.0);
    a.resize(len, 0.0);
    (b, a)
}
