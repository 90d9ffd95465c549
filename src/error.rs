//! Error types for feature extraction.

use thiserror::Error;

/// Errors that can occur while loading or analyzing audio
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode audio: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    #[error("No decodable audio track found")]
    NoAudioTrack,

    #[error("Audio stream does not declare a sample rate")]
    UnknownSampleRate,

    #[error("Audio contains no samples")]
    EmptySignal,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("FFT failed: {0}")]
    Fft(String),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
