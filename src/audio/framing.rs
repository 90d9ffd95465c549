//! Centered framing shared by the pitch, energy and MFCC analyses.
//!
//! The signal is zero-padded by `frame_length / 2` on each side so that frame
//! `i` is centered on sample `i * hop_length`. With an even frame length this
//! gives `1 + len / hop_length` frames for any input length, including inputs
//! shorter than a single frame.

/// Number of centered frames for a signal of `len` samples
pub fn frame_count(len: usize, frame_length: usize, hop_length: usize) -> usize {
    let padded_len = len + 2 * (frame_length / 2);
    if hop_length == 0 || padded_len < frame_length {
        return 0;
    }
    1 + (padded_len - frame_length) / hop_length
}

/// Zero-padded copy of a signal that hands out fixed-length frames
pub struct CenteredFrames {
    padded: Vec<f32>,
    frame_length: usize,
    hop_length: usize,
    n_frames: usize,
}

impl CenteredFrames {
    pub fn new(samples: &[f32], frame_length: usize, hop_length: usize) -> Self {
        let pad = frame_length / 2;

        let mut padded = Vec::with_capacity(samples.len() + 2 * pad);
        padded.resize(pad, 0.0);
        padded.extend_from_slice(samples);
        padded.resize(samples.len() + 2 * pad, 0.0);

        Self {
            padded,
            frame_length,
            hop_length,
            n_frames: frame_count(samples.len(), frame_length, hop_length),
        }
    }

    pub fn len(&self) -> usize {
        self.n_frames
    }

    pub fn is_empty(&self) -> bool {
        self.n_frames == 0
    }

    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Frame `index`, always exactly `frame_length` samples
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        if index >= self.n_frames {
            return None;
        }
        let start = index * self.hop_length;
        self.padded.get(start..start + self.frame_length)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.n_frames).filter_map(move |i| self.frame(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_centered() {
        assert_eq!(frame_count(0, 2048, 512), 1);
        assert_eq!(frame_count(511, 2048, 512), 1);
        assert_eq!(frame_count(512, 2048, 512), 2);
        assert_eq!(frame_count(22050, 2048, 512), 44);
    }

    #[test]
    fn test_frame_count_zero_hop() {
        assert_eq!(frame_count(1000, 2048, 0), 0);
    }

    #[test]
    fn test_frames_are_centered() {
        let samples: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        let frames = CenteredFrames::new(&samples, 4, 2);

        assert_eq!(frames.len(), 5);
        assert_eq!(frames.frame(0).unwrap(), &[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(frames.frame(1).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(frames.frame(4).unwrap(), &[7.0, 8.0, 0.0, 0.0]);
        assert!(frames.frame(5).is_none());
    }

    #[test]
    fn test_every_frame_has_full_length() {
        let samples = vec![0.5f32; 1000];
        let frames = CenteredFrames::new(&samples, 2048, 512);
        assert_eq!(frames.iter().count(), frames.len());
        for frame in frames.iter() {
            assert_eq!(frame.len(), 2048);
        }
    }
}
