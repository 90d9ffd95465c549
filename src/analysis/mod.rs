//! Acoustic analyses over a decoded signal
//!
//! - **Pitch**: McLeod F0 track constrained to the vocal range, F0 mean and jitter
//! - **Energy**: RMS envelope and shimmer
//! - **HNR**: autocorrelation peak-to-mean ratio in dB
//! - **MFCC**: mean cepstral coefficients

pub mod energy;
pub mod hnr;
pub mod mfcc;
pub mod pitch;

pub use energy::{rms_envelope, shimmer};
pub use hnr::{autocorrelate, harmonic_to_noise_ratio};
pub use mfcc::MfccAnalyzer;
pub use pitch::{track_pitch, PitchTrack};
