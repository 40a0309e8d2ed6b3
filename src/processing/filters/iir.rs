// src/processing/filters/iir.rs
//! Butterworth IIR band-pass design
//!
//! Analog prototype poles are moved to the band with the low-pass to
//! band-pass transform and mapped to the z-plane with the bilinear transform
//! (cutoffs pre-warped), then expanded to transfer-function form.

use super::{FilterSpec, TransferFunction};
use crate::error::EmgResult;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Bilinear transform sample rate for normalised frequencies
const BILINEAR_FS: f64 = 2.0;

/// Design an order-N Butterworth band-pass. `b` and `a` have `2N + 1` taps.
pub fn butterworth_bandpass(spec: &FilterSpec) -> EmgResult<TransferFunction> {
    spec.validate()?;

    let order = spec.order;
    let prototype = analog_prototype_poles(order);

    let warped_low = prewarp(spec.low_hz / spec.nyquist_hz());
    let warped_high = prewarp(spec.high_hz / spec.nyquist_hz());
    let bandwidth = warped_high - warped_low;
    let center = (warped_low * warped_high).sqrt();

    // Low-pass to band-pass: every prototype pole splits in two and `order`
    // zeros appear at the origin.
    let mut analog_poles = Vec::with_capacity(2 * order);
    let mut upper = Vec::with_capacity(order);
    for &p in &prototype {
        let scaled = p * (bandwidth / 2.0);
        let offset = (scaled * scaled - center * center).sqrt();
        analog_poles.push(scaled + offset);
        upper.push(scaled - offset);
    }
    analog_poles.extend(upper);
    let analog_gain = bandwidth.powi(order as i32);

    // Bilinear transform. Zeros at s = 0 map to z = 1; the excess pole degree
    // lands at z = -1.
    let fs2 = Complex64::new(2.0 * BILINEAR_FS, 0.0);
    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let mut digital_zeros = vec![Complex64::new(1.0, 0.0); order];
    digital_zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(order));

    let numerator = fs2.powi(order as i32);
    let denominator = analog_poles
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (fs2 - p));
    let digital_gain = analog_gain * (numerator / denominator).re;

    let b = poly(&digital_zeros)
        .into_iter()
        .map(|c| c.re * digital_gain)
        .collect();
    let a = poly(&digital_poles).into_iter().map(|c| c.re).collect();

    Ok(TransferFunction { b, a })
}

/// Left-half-plane poles of the normalised analog Butterworth low-pass
fn analog_prototype_poles(order: usize) -> Vec<Complex64> {
    let n = order as f64;
    (0..order)
        .map(|i| {
            let m = -n + 1.0 + 2.0 * i as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect()
}

/// Pre-warp a Nyquist-normalised frequency for the bilinear transform
fn prewarp(normalized: f64) -> f64 {
    2.0 * BILINEAR_FS * (PI * normalized / BILINEAR_FS).tan()
}

/// Monic polynomial coefficients (highest power first) from its roots
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude_at(tf: &TransferFunction, freq_hz: f64, fs: f64) -> f64 {
        let w = 2.0 * PI * freq_hz / fs;
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (k, &c)| {
                    acc + Complex64::from_polar(c, -w * k as f64)
                })
        };
        (eval(&tf.b) / eval(&tf.a)).norm()
    }

    #[test]
    fn test_coefficient_lengths() {
        for order in 1..=6 {
            let tf = butterworth_bandpass(&FilterSpec::new(50.0, 500.0, order, 2000.0)).unwrap();
            assert_eq!(tf.b.len(), 2 * order + 1);
            assert_eq!(tf.a.len(), 2 * order + 1);
            assert!((tf.a[0] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_dc_gain() {
        let tf = butterworth_bandpass(&FilterSpec::new(50.0, 500.0, 4, 2000.0)).unwrap();
        assert!(tf.dc_gain().abs() < 1e-9);
    }

    #[test]
    fn test_butterworth_response_shape() {
        let fs = 2000.0;
        let tf = butterworth_bandpass(&FilterSpec::new(50.0, 500.0, 4, fs)).unwrap();

        // Unity gain at the geometric band centre, -3 dB at the edges
        let centre = (50.0f64 * 500.0).sqrt();
        assert!((magnitude_at(&tf, centre, fs) - 1.0).abs() < 1e-3);
        let edge = std::f64::consts::FRAC_1_SQRT_2;
        assert!((magnitude_at(&tf, 50.0, fs) - edge).abs() < 1e-3);
        assert!((magnitude_at(&tf, 500.0, fs) - edge).abs() < 1e-3);

        // Strong rejection well outside the band
        assert!(magnitude_at(&tf, 5.0, fs) < 1e-3);
        assert!(magnitude_at(&tf, 950.0, fs) < 1e-2);
    }

    #[test]
    fn test_prototype_poles_on_left_unit_semicircle() {
        let prototype = analog_prototype_poles(4);
        assert_eq!(prototype.len(), 4);
        assert!(prototype.iter().all(|p| p.re < 0.0));
        assert!(prototype.iter().all(|p| (p.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_invalid_spec_rejected() {
        assert!(butterworth_bandpass(&FilterSpec::new(50.0, 500.0, 4, 1000.0)).is_err());
    }
}
