//! Harmonic-to-noise ratio approximation from the autocorrelation
//!
//! ## Algorithm
//! 1. Zero-pad the signal to a power of two of at least `2n - 1` samples
//! 2. FFT, take the power spectrum, inverse FFT: the linear autocorrelation
//! 3. Keep lags `0..n`
//! 4. HNR = 10·log10(max / (mean + epsilon)) in dB
//!
//! The mean over non-negative lags equals `((Σx)² + ac[0]) / 2n`, so it is
//! positive for any non-silent signal. The epsilon is the only guard: silence
//! gives `-inf`, which is returned as-is.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Linear autocorrelation of `samples` for lags `0..samples.len()`
pub fn autocorrelate(samples: &[f32]) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let size = (2 * n - 1).next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(size);
    let ifft = planner.plan_fft_inverse(size);

    let mut spectrum: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)).take(size - n))
        .collect();

    fft.process(&mut spectrum);

    for c in &mut spectrum {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }

    ifft.process(&mut spectrum);

    // Normalize by FFT size
    let scale = 1.0 / size as f64;
    spectrum[..n].iter().map(|c| c.re * scale).collect()
}

/// HNR in dB from an autocorrelation sequence
pub fn harmonic_to_noise_ratio(autocorr: &[f64], epsilon: f64) -> f32 {
    if autocorr.is_empty() {
        return f32::NAN;
    }

    let peak = autocorr.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = autocorr.iter().sum::<f64>() / autocorr.len() as f64;

    (10.0 * (peak / (mean + epsilon)).log10()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    /// Generate noise
    fn generate_noise(num_samples: usize) -> Vec<f32> {
        // Simple pseudo-random noise using linear congruential generator
        let mut seed = 12345u32;
        (0..num_samples)
            .map(|_| {
                seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                ((seed >> 16) as f32 / 32768.0 - 1.0) * 0.3
            })
            .collect()
    }

    #[test]
    fn test_autocorrelate_small() {
        let ac = autocorrelate(&[1.0, 2.0, 3.0]);
        assert_eq!(ac.len(), 3);
        assert!((ac[0] - 14.0).abs() < 1e-9);
        assert!((ac[1] - 8.0).abs() < 1e-9);
        assert!((ac[2] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_autocorrelate_single_sample() {
        let ac = autocorrelate(&[0.5]);
        assert_eq!(ac.len(), 1);
        assert!((ac[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_autocorrelate_empty() {
        assert!(autocorrelate(&[]).is_empty());
    }

    #[test]
    fn test_peak_is_lag_zero() {
        let samples = generate_noise(4000);
        let ac = autocorrelate(&samples);
        let energy: f64 = samples.iter().map(|&s| (s as f64).powi(2)).sum();
        assert!((ac[0] - energy).abs() < 1e-6);
        assert!(ac.iter().all(|&v| v <= ac[0] + 1e-9));
    }

    #[test]
    fn test_silence_hnr_does_not_panic() {
        let ac = autocorrelate(&vec![0.0; 8000]);
        let hnr = harmonic_to_noise_ratio(&ac, 1e-6);
        assert!(!hnr.is_nan());
        assert!(hnr.is_infinite() && hnr < 0.0);
    }

    #[test]
    fn test_known_ratio() {
        // peak 10, mean 2.5 -> 10·log10(4)
        let hnr = harmonic_to_noise_ratio(&[10.0, 0.0, 0.0, 0.0], 0.0);
        assert!((hnr - 6.0206).abs() < 1e-3);
    }

    #[test]
    fn test_tone_is_finite() {
        let samples: Vec<f32> = (0..16000)
            .map(|i| (2.0 * PI * 220.0 * i as f32 / 16000.0).sin() * 0.5)
            .collect();
        let hnr = harmonic_to_noise_ratio(&autocorrelate(&samples), 1e-6);
        assert!(hnr.is_finite(), "Expected finite HNR for a tone, got {}", hnr);
    }
}
