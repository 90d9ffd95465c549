//! Mel-frequency cepstral coefficients.
//!
//! Converts a waveform into `n_mfcc` cepstral coefficients per frame:
//!
//! 1. Centered STFT frames of `n_fft` samples, periodic Hann window
//! 2. Power spectrum via real FFT
//! 3. Slaney-style mel filterbank (area-normalized triangles)
//! 4. Power to dB, clipped to `top_db` below the spectrogram peak
//! 5. Orthonormal DCT-II over the mel axis, first `n_mfcc` rows

use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::f64::consts::PI;
use std::sync::Arc;

use crate::audio::CenteredFrames;
use crate::config::MfccConfig;
use crate::error::{FeatureError, Result};

/// Floor applied to power before the dB conversion
const AMIN: f64 = 1e-10;

/// MFCC generator with pre-computed filterbank, DCT basis and FFT plan
pub struct MfccAnalyzer {
    config: MfccConfig,
    hop_length: usize,
    fft: Arc<dyn RealToComplex<f64>>,
    mel_filterbank: Vec<Vec<f64>>,
    dct_basis: Vec<Vec<f64>>,
    window: Vec<f64>,
    // Pre-allocated buffers
    fft_input: Vec<f64>,
    fft_output: Vec<Complex<f64>>,
}

impl MfccAnalyzer {
    pub fn new(config: MfccConfig, sample_rate: u32, hop_length: usize) -> Result<Self> {
        if config.n_fft < 2 || hop_length == 0 || config.n_mels == 0 {
            return Err(FeatureError::InvalidConfig(format!(
                "MFCC needs n_fft >= 2, hop > 0 and n_mels > 0 (n_fft {}, hop {}, n_mels {})",
                config.n_fft, hop_length, config.n_mels
            )));
        }

        let window = periodic_hann(config.n_fft);

        let nyquist = sample_rate as f64 / 2.0;
        let fmax = config.fmax.map(|f| f as f64).unwrap_or(nyquist);
        let mel_filterbank = create_mel_filterbank(
            config.n_mels,
            config.n_fft,
            sample_rate as f64,
            config.fmin as f64,
            fmax,
        );

        let dct_basis = create_dct_basis(config.n_mfcc, config.n_mels);

        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(config.n_fft);
        let fft_input = fft.make_input_vec();
        let fft_output = fft.make_output_vec();

        Ok(Self {
            config,
            hop_length,
            fft,
            mel_filterbank,
            dct_basis,
            window,
            fft_input,
            fft_output,
        })
    }

    /// Log-power mel spectrogram in dB, one `n_mels` vector per frame
    pub fn log_mel_spectrogram(&mut self, audio: &[f32]) -> Result<Vec<Vec<f64>>> {
        let frames = CenteredFrames::new(audio, self.config.n_fft, self.hop_length);
        let mut mel_spec = Vec::with_capacity(frames.len());

        for frame in frames.iter() {
            for ((dst, &sample), &w) in self.fft_input.iter_mut().zip(frame).zip(&self.window) {
                *dst = sample as f64 * w;
            }

            self.fft
                .process(&mut self.fft_input, &mut self.fft_output)
                .map_err(|e| FeatureError::Fft(e.to_string()))?;

            let power_spec: Vec<f64> = self.fft_output.iter().map(|c| c.norm_sqr()).collect();

            let mel_frame: Vec<f64> = self
                .mel_filterbank
                .iter()
                .map(|filter| {
                    let energy: f64 = filter
                        .iter()
                        .zip(power_spec.iter())
                        .map(|(f, p)| f * p)
                        .sum();
                    10.0 * energy.max(AMIN).log10()
                })
                .collect();

            mel_spec.push(mel_frame);
        }

        if let Some(top_db) = self.config.top_db {
            let peak = mel_spec
                .iter()
                .flatten()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let floor = peak - top_db as f64;
            for value in mel_spec.iter_mut().flatten() {
                *value = value.max(floor);
            }
        }

        Ok(mel_spec)
    }

    /// Cepstral coefficient matrix, `n_mfcc` rows by frames
    pub fn compute(&mut self, audio: &[f32]) -> Result<Vec<Vec<f32>>> {
        let mel_spec = self.log_mel_spectrogram(audio)?;

        let coefficients = self
            .dct_basis
            .iter()
            .map(|basis| {
                mel_spec
                    .iter()
                    .map(|frame| {
                        basis
                            .iter()
                            .zip(frame.iter())
                            .map(|(b, m)| b * m)
                            .sum::<f64>() as f32
                    })
                    .collect()
            })
            .collect();

        Ok(coefficients)
    }

    /// Mean of each cepstral coefficient across frames
    pub fn compute_means(&mut self, audio: &[f32]) -> Result<Vec<f32>> {
        let coefficients = self.compute(audio)?;
        Ok(coefficients
            .iter()
            .map(|row| {
                if row.is_empty() {
                    return 0.0;
                }
                (row.iter().map(|&c| c as f64).sum::<f64>() / row.len() as f64) as f32
            })
            .collect())
    }
}

/// Periodic Hann window (the DFT-even variant used for spectral analysis)
fn periodic_hann(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / len as f64).cos())
        .collect()
}

const SLANEY_F_SP: f64 = 200.0 / 3.0;
const SLANEY_MIN_LOG_HZ: f64 = 1000.0;
const SLANEY_MIN_LOG_MEL: f64 = SLANEY_MIN_LOG_HZ / SLANEY_F_SP;

fn slaney_log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Convert frequency to the Slaney mel scale (linear below 1 kHz, log above)
fn hz_to_mel(hz: f64) -> f64 {
    if hz >= SLANEY_MIN_LOG_HZ {
        SLANEY_MIN_LOG_MEL + (hz / SLANEY_MIN_LOG_HZ).ln() / slaney_log_step()
    } else {
        hz / SLANEY_F_SP
    }
}

/// Convert Slaney mel back to frequency
fn mel_to_hz(mel: f64) -> f64 {
    if mel >= SLANEY_MIN_LOG_MEL {
        SLANEY_MIN_LOG_HZ * (slaney_log_step() * (mel - SLANEY_MIN_LOG_MEL)).exp()
    } else {
        SLANEY_F_SP * mel
    }
}

/// Create a mel filterbank matrix
///
/// # Returns
/// `n_mels` filters, each a Vec of `n_fft / 2 + 1` weights. Each triangle is
/// scaled by `2 / (right_hz - left_hz)` so filters have roughly equal area.
fn create_mel_filterbank(
    n_mels: usize,
    n_fft: usize,
    sample_rate: f64,
    fmin: f64,
    fmax: f64,
) -> Vec<Vec<f64>> {
    let n_fft_bins = n_fft / 2 + 1;

    let fft_freqs: Vec<f64> = (0..n_fft_bins)
        .map(|bin| bin as f64 * sample_rate / n_fft as f64)
        .collect();

    // n_mels + 2 equally spaced points in mel scale, back in Hz
    let mel_min = hz_to_mel(fmin);
    let mel_max = hz_to_mel(fmax);
    let hz_points: Vec<f64> = (0..n_mels + 2)
        .map(|i| mel_to_hz(mel_min + (mel_max - mel_min) * i as f64 / (n_mels + 1) as f64))
        .collect();

    (0..n_mels)
        .map(|i| {
            let left = hz_points[i];
            let center = hz_points[i + 1];
            let right = hz_points[i + 2];
            let norm = 2.0 / (right - left);

            fft_freqs
                .iter()
                .map(|&freq| {
                    let rising = (freq - left) / (center - left);
                    let falling = (right - freq) / (right - center);
                    rising.min(falling).max(0.0) * norm
                })
                .collect()
        })
        .collect()
}

/// Orthonormal DCT-II basis, first `n_out` rows for inputs of length `n_in`
fn create_dct_basis(n_out: usize, n_in: usize) -> Vec<Vec<f64>> {
    let n = n_in as f64;
    (0..n_out)
        .map(|k| {
            let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
            (0..n_in)
                .map(|i| scale * (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n)).cos())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn analyzer(sample_rate: u32) -> MfccAnalyzer {
        MfccAnalyzer::new(MfccConfig::default(), sample_rate, 512).unwrap()
    }

    fn sine(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_slaney_mel_scale() {
        // Linear region: 200/3 Hz per mel below 1 kHz
        assert!((hz_to_mel(0.0) - 0.0).abs() < 1e-12);
        assert!((hz_to_mel(1000.0) - 15.0).abs() < 1e-9);
        assert!((hz_to_mel(6400.0) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_mel_to_hz_roundtrip() {
        for hz in [100.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0] {
            let hz_back = mel_to_hz(hz_to_mel(hz));
            assert!((hz - hz_back).abs() < 1e-6, "Roundtrip failed for {} Hz", hz);
        }
    }

    #[test]
    fn test_create_mel_filterbank() {
        let filterbank = create_mel_filterbank(40, 512, 16000.0, 0.0, 8000.0);

        assert_eq!(filterbank.len(), 40);
        for filter in &filterbank {
            assert_eq!(filter.len(), 257);
            assert!(filter.iter().all(|&w| w >= 0.0));
            let sum: f64 = filter.iter().sum();
            assert!(sum > 0.0, "Filter should have non-zero weights");
        }
    }

    #[test]
    fn test_dct_basis_is_orthonormal() {
        let basis = create_dct_basis(8, 8);
        for (a, row_a) in basis.iter().enumerate() {
            for (b, row_b) in basis.iter().enumerate() {
                let dot: f64 = row_a.iter().zip(row_b).map(|(x, y)| x * y).sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_matrix_dimensions() {
        let mut mfcc = analyzer(16000);
        let coefficients = mfcc.compute(&vec![0.0; 16000]).unwrap();

        assert_eq!(coefficients.len(), 13);
        for row in &coefficients {
            assert_eq!(row.len(), 1 + 16000 / 512);
        }
    }

    #[test]
    fn test_silence_is_floor() {
        // Every band sits at the 1e-10 power floor (-100 dB), so only c0 is non-zero
        let mut mfcc = analyzer(16000);
        let means = mfcc.compute_means(&vec![0.0; 8000]).unwrap();

        let expected_c0 = -100.0 * (128.0f64).sqrt();
        assert!((means[0] as f64 - expected_c0).abs() < 1e-2);
        for &c in &means[1..] {
            assert!(c.abs() < 1e-3);
        }
    }

    #[test]
    fn test_tone_differs_from_silence() {
        let mut mfcc = analyzer(22050);
        let silence = mfcc.compute_means(&vec![0.0; 22050]).unwrap();
        let tone = mfcc.compute_means(&sine(440.0, 22050, 22050)).unwrap();
        assert!(tone[0] > silence[0]);
    }

    #[test]
    fn test_top_db_clips_dynamic_range() {
        let mut mfcc = analyzer(16000);
        let mel = mfcc.log_mel_spectrogram(&sine(300.0, 16000, 8000)).unwrap();
        let peak = mel.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
        let low = mel.iter().flatten().copied().fold(f64::INFINITY, f64::min);
        assert!(peak - low <= 80.0 + 1e-9);
    }

    #[test]
    fn test_rejects_zero_hop() {
        assert!(MfccAnalyzer::new(MfccConfig::default(), 16000, 0).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_always_thirteen_means(
            samples in proptest::collection::vec(-1.0f32..1.0, 1..6000)
        ) {
            let mut mfcc = analyzer(16000);
            let means = mfcc.compute_means(&samples).unwrap();
            prop_assert_eq!(means.len(), 13);
            for value in means {
                prop_assert!(value.is_finite());
            }
        }
    }
}
