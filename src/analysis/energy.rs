//! RMS energy envelope and shimmer

use crate::audio::CenteredFrames;

/// Per-frame root-mean-square amplitude over centered frames
pub fn rms_envelope(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    let frames = CenteredFrames::new(samples, frame_length, hop_length);
    frames
        .iter()
        .map(|frame| {
            let power = frame.iter().map(|&s| (s as f64) * (s as f64)).sum::<f64>()
                / frame.len().max(1) as f64;
            power.sqrt() as f32
        })
        .collect()
}

/// Mean absolute difference between consecutive envelope values.
///
/// Returns 0.0 when the envelope has fewer than 2 frames.
pub fn shimmer(envelope: &[f32]) -> f32 {
    if envelope.len() < 2 {
        return 0.0;
    }
    let total: f64 = envelope
        .windows(2)
        .map(|pair| (pair[1] as f64 - pair[0] as f64).abs())
        .sum();
    (total / (envelope.len() - 1) as f64) as f32
}
