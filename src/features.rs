use serde::{Deserialize, Serialize};

/// Names of the acoustic descriptors, in output order
pub const FEATURE_NAMES: [&str; 4] = ["f0_mean", "jitter", "shimmer", "hnr_db"];

/// Scalar voice descriptors
///
/// Degenerate input yields sentinels instead of errors: `f0_mean` is NaN
/// when no frame is voiced, `jitter` and `shimmer` fall back to 0.0, and
/// `hnr_db` is `-inf` for silence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticFeatures {
    /// Mean F0 over voiced frames (Hz)
    pub f0_mean: f32,
    /// Mean relative frame-to-frame F0 change
    pub jitter: f32,
    /// Mean absolute frame-to-frame RMS change
    pub shimmer: f32,
    /// Autocorrelation harmonic-to-noise ratio (dB)
    pub hnr_db: f32,
}

impl AcousticFeatures {
    pub fn to_array(&self) -> [f32; 4] {
        [self.f0_mean, self.jitter, self.shimmer, self.hnr_db]
    }
}

/// Everything extracted from one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceFeatures {
    pub acoustic: AcousticFeatures,
    pub mfcc_means: Vec<f32>,

    // Diagnostics, not part of the classifier vector
    pub sample_rate: u32,
    pub duration_secs: f32,
    pub voiced_ratio: f32,
}

impl VoiceFeatures {
    /// Classifier input: the acoustic descriptors followed by the MFCC means
    pub fn to_vector(&self) -> Vec<f32> {
        let mut vector = Vec::with_capacity(4 + self.mfcc_means.len());
        vector.extend_from_slice(&self.acoustic.to_array());
        vector.extend_from_slice(&self.mfcc_means);
        vector
    }
}
