//! Acoustic voice descriptors for downstream classifiers.
//!
//! Loads an audio file and computes:
//!
//! - **F0 mean** over voiced frames (McLeod pitch, 50-400 Hz)
//! - **Jitter**: mean relative frame-to-frame F0 change
//! - **Shimmer**: mean absolute frame-to-frame RMS change
//! - **HNR**: autocorrelation peak-to-mean ratio in dB
//! - **MFCC means**: 13 cepstral coefficients averaged over frames
//!
//! ```no_run
//! let (acoustic, mfcc) = voice_features::extract_features_from_audio("voice.wav")?;
//! assert_eq!(mfcc.len(), 13);
//! println!("F0 {:.1} Hz, HNR {:.1} dB", acoustic[0], acoustic[3]);
//! # Ok::<(), voice_features::FeatureError>(())
//! ```

pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod extractor;
pub mod features;

pub use audio::{decode_file, AudioSignal};
pub use config::{ExtractorConfig, MfccConfig, PitchConfig};
pub use error::FeatureError;
pub use extractor::{extract_features_from_audio, FeatureExtractor};
pub use features::{AcousticFeatures, VoiceFeatures, FEATURE_NAMES};
