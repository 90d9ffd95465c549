//! F0 tracking, F0 mean and jitter
//!
//! ## Algorithm
//! 1. Split the signal into centered frames (2048 samples, 512 hop by default)
//! 2. Use the McLeod algorithm to find F0 in each frame
//! 3. Mark frames outside the vocal range (50Hz - 400Hz) as unvoiced
//! 4. F0 mean over voiced frames, NaN if there are none
//! 5. Jitter: mean |ΔF0 / F0| over consecutive voiced pairs, 0.0 if there are none

use pitch_detection::detector::mcleod::McLeodDetector;
use pitch_detection::detector::PitchDetector;

use crate::audio::CenteredFrames;
use crate::config::PitchConfig;

/// Per-frame F0 estimates; `None` marks frames with no detected pitch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitchTrack {
    pub frames: Vec<Option<f32>>,
}

impl PitchTrack {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn voiced(&self) -> impl Iterator<Item = f32> + '_ {
        self.frames.iter().flatten().copied()
    }

    pub fn voiced_count(&self) -> usize {
        self.voiced().count()
    }

    /// Fraction of frames with a valid pitch (0.0-1.0)
    pub fn voiced_ratio(&self) -> f32 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.voiced_count() as f32 / self.frames.len() as f32
    }

    /// Mean F0 in Hz over voiced frames, NaN when nothing is voiced
    pub fn mean(&self) -> f32 {
        let (sum, count) = self
            .voiced()
            .fold((0.0f64, 0usize), |(sum, count), f0| (sum + f0 as f64, count + 1));
        if count == 0 {
            return f32::NAN;
        }
        (sum / count as f64) as f32
    }

    /// Mean absolute relative F0 change between consecutive voiced frames.
    ///
    /// Each difference is divided by the later frame's pitch. Pairs with a
    /// missing frame on either side are skipped; 0.0 when no pair remains.
    pub fn jitter(&self) -> f32 {
        let (sum, count) = self
            .frames
            .windows(2)
            .filter_map(|pair| match (pair[0], pair[1]) {
                (Some(prev), Some(cur)) if cur != 0.0 => Some(((cur - prev) / cur).abs()),
                _ => None,
            })
            .fold((0.0f64, 0usize), |(sum, count), rel| (sum + rel as f64, count + 1));
        if count == 0 {
            return 0.0;
        }
        (sum / count as f64) as f32
    }
}

/// Track F0 across the signal, one estimate per centered frame
pub fn track_pitch(
    samples: &[f32],
    sample_rate: u32,
    frame_length: usize,
    hop_length: usize,
    config: &PitchConfig,
) -> PitchTrack {
    let frames = CenteredFrames::new(samples, frame_length, hop_length);
    let mut detector = McLeodDetector::new(frame_length, frame_length / 2);

    let estimates = frames
        .iter()
        .map(|frame| {
            detector
                .get_pitch(
                    frame,
                    sample_rate as usize,
                    config.power_threshold,
                    config.clarity_threshold,
                )
                .map(|pitch| pitch.frequency)
                .filter(|&f0| f0.is_finite() && f0 >= config.fmin && f0 <= config.fmax)
        })
        .collect();

    PitchTrack { frames: estimates }
}
