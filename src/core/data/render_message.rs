use serde::{Deserialize, Serialize};

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::progress::ProgressEvent;

/// Output of a background basin render, in the order it is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderMessage {
    Progress {
        progress: f64,
    },
    Image {
        width: u32,
        height: u32,
        /// Row-major RGBA bytes.
        pixels: Vec<u8>,
    },
}

impl From<ProgressEvent> for RenderMessage {
    fn from(event: ProgressEvent) -> Self {
        Self::Progress {
            progress: event.percent,
        }
    }
}

impl From<PixelBuffer> for RenderMessage {
    fn from(buffer: PixelBuffer) -> Self {
        let grid = buffer.grid();
        Self::Image {
            width: grid.width(),
            height: grid.height(),
            pixels: buffer.into_data(),
        }
    }
}
