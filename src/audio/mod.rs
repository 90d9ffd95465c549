pub mod decoder;
pub mod framing;

pub use decoder::decode_file;
pub use framing::{frame_count, CenteredFrames};

/// Mono audio at its native sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    /// Samples in [-1, 1]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioSignal {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
