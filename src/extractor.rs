use std::path::Path;
use tracing::debug;

use crate::analysis::{
    autocorrelate, harmonic_to_noise_ratio, rms_envelope, shimmer, track_pitch, MfccAnalyzer,
};
use crate::audio::{decode_file, AudioSignal};
use crate::config::ExtractorConfig;
use crate::error::{FeatureError, Result};
use crate::features::{AcousticFeatures, VoiceFeatures};

/// Runs every analysis over one signal.
///
/// Holds only its configuration; FFT plans and buffers are built per call,
/// so one extractor can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
}

impl FeatureExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Decode `path` and extract its features
    pub fn extract_file(&self, path: &Path) -> Result<VoiceFeatures> {
        let signal = decode_file(path)?;
        self.extract_signal(&signal)
    }

    /// Extract features from an already decoded signal
    pub fn extract_signal(&self, signal: &AudioSignal) -> Result<VoiceFeatures> {
        if signal.is_empty() {
            return Err(FeatureError::EmptySignal);
        }
        if signal.sample_rate == 0 {
            return Err(FeatureError::UnknownSampleRate);
        }

        let config = &self.config;
        let samples = &signal.samples;

        let pitch = track_pitch(
            samples,
            signal.sample_rate,
            config.frame_length,
            config.hop_length,
            &config.pitch,
        );
        let f0_mean = pitch.mean();
        let jitter = pitch.jitter();
        debug!(
            "Pitch: {}/{} frames voiced, F0 mean {:.2} Hz, jitter {:.5}",
            pitch.voiced_count(),
            pitch.len(),
            f0_mean,
            jitter
        );

        let envelope = rms_envelope(samples, config.frame_length, config.hop_length);
        let shimmer = shimmer(&envelope);
        debug!("Energy: {} frames, shimmer {:.6}", envelope.len(), shimmer);

        let autocorr = autocorrelate(samples);
        let hnr_db = harmonic_to_noise_ratio(&autocorr, config.hnr_epsilon);
        debug!("HNR: {:.3} dB over {} lags", hnr_db, autocorr.len());

        let mut mfcc =
            MfccAnalyzer::new(config.mfcc.clone(), signal.sample_rate, config.hop_length)?;
        let mfcc_means = mfcc.compute_means(samples)?;
        debug!("MFCC: {} coefficient means", mfcc_means.len());

        Ok(VoiceFeatures {
            acoustic: AcousticFeatures {
                f0_mean,
                jitter,
                shimmer,
                hnr_db,
            },
            mfcc_means,
            sample_rate: signal.sample_rate,
            duration_secs: signal.duration_secs(),
            voiced_ratio: pitch.voiced_ratio(),
        })
    }
}

/// Extract the acoustic descriptors and MFCC means from an audio file.
///
/// Returns `([f0_mean, jitter, shimmer, hnr_db], mfcc_means)` using the
/// default configuration (13 MFCC means).
pub fn extract_features_from_audio(path: impl AsRef<Path>) -> Result<([f32; 4], Vec<f32>)> {
    let features = FeatureExtractor::default().extract_file(path.as_ref())?;
    Ok((features.acoustic.to_array(), features.mfcc_means))
}
