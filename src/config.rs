use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FeatureError;

/// Feature extraction configuration.
///
/// The defaults define the descriptors downstream models are trained on;
/// change them only together with the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    // Framing for pitch tracking and the energy envelope
    pub frame_length: usize,
    pub hop_length: usize,

    pub pitch: PitchConfig,
    pub mfcc: MfccConfig,

    /// Added to the autocorrelation mean before the HNR ratio
    pub hnr_epsilon: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            frame_length: 2048,
            hop_length: 512,
            pitch: PitchConfig::default(),
            mfcc: MfccConfig::default(),
            hnr_epsilon: 1e-6,
        }
    }
}

/// Pitch tracking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Minimum pitch in Hz (human vocal range)
    pub fmin: f32,
    /// Maximum pitch in Hz (human vocal range)
    pub fmax: f32,
    /// Minimum frame power (sum of squares) for a pitch estimate; 0 leaves
    /// voicing to the clarity threshold alone
    pub power_threshold: f32,
    /// Minimum McLeod clarity for a pitch estimate
    pub clarity_threshold: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            fmin: 50.0,
            fmax: 400.0,
            power_threshold: 0.0,
            clarity_threshold: 0.5,
        }
    }
}

/// MFCC parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfccConfig {
    /// Number of cepstral coefficients returned
    pub n_mfcc: usize,
    /// Number of mel bands
    pub n_mels: usize,
    /// FFT size, also the STFT window length
    pub n_fft: usize,
    /// Lowest mel band edge (Hz)
    pub fmin: f32,
    /// Highest mel band edge (Hz), Nyquist when unset
    pub fmax: Option<f32>,
    /// Dynamic range kept below the spectrogram peak (dB), unclipped when unset
    pub top_db: Option<f32>,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            n_mfcc: 13,
            n_mels: 128,
            n_fft: 2048,
            fmin: 0.0,
            fmax: None,
            top_db: Some(80.0),
        }
    }
}

impl ExtractorConfig {
    /// Load config from file, or create default
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            let config: Self =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")
    }

    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".voice-features"))
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.json"))
    }

    /// Check that every parameter can drive the analyses
    pub fn validate(&self) -> std::result::Result<(), FeatureError> {
        if self.frame_length == 0 {
            return invalid("frame_length must be positive".to_string());
        }
        if self.hop_length == 0 {
            return invalid("hop_length must be positive".to_string());
        }
        if !(self.pitch.fmin > 0.0 && self.pitch.fmin < self.pitch.fmax) {
            return invalid(format!(
                "pitch range must satisfy 0 < fmin < fmax, got {}..{}",
                self.pitch.fmin, self.pitch.fmax
            ));
        }
        if self.mfcc.n_fft < 2 {
            return invalid(format!("n_fft must be at least 2, got {}", self.mfcc.n_fft));
        }
        if self.mfcc.n_mels == 0 {
            return invalid("n_mels must be positive".to_string());
        }
        if self.mfcc.n_mfcc == 0 || self.mfcc.n_mfcc > self.mfcc.n_mels {
            return invalid(format!(
                "n_mfcc must be in 1..={}, got {}",
                self.mfcc.n_mels, self.mfcc.n_mfcc
            ));
        }
        if self.mfcc.fmin < 0.0 {
            return invalid(format!("mfcc fmin must be non-negative, got {}", self.mfcc.fmin));
        }
        if let Some(fmax) = self.mfcc.fmax {
            if fmax <= self.mfcc.fmin {
                return invalid(format!(
                    "mfcc fmax ({}) must exceed fmin ({})",
                    fmax, self.mfcc.fmin
                ));
            }
        }
        if !(self.hnr_epsilon.is_finite() && self.hnr_epsilon >= 0.0) {
            return invalid(format!(
                "hnr_epsilon must be finite and non-negative, got {}",
                self.hnr_epsilon
            ));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> std::result::Result<(), FeatureError> {
    Err(FeatureError::InvalidConfig(msg))
}
