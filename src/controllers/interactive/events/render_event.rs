use std::time::Duration;

use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressData {
    pub generation: u64,
    pub percent: f64,
}

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub pixel_buffer: PixelBuffer,
    pub root_count: usize,
    pub render_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub generation: u64,
    pub message: String,
}

/// Output of the interactive controller. Only the newest generation's events
/// are ever presented.
#[derive(Debug)]
pub enum RenderEvent {
    Progress(ProgressData),
    Frame(FrameData),
    Error(RenderError),
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Progress(progress) => progress.generation,
            Self::Frame(frame) => frame.generation,
            Self::Error(error) => error.generation,
        }
    }

    /// Frames and errors end a generation; progress does not.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}
