use thiserror::Error;

use crate::core::data::colour::Colour;
use crate::core::data::pixel_grid::PixelGrid;
use crate::core::data::point::Point;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelBufferError {
    #[error("pixel at x:{}, y:{} outside of {}x{} grid", pixel.x, pixel.y, grid.width(), grid.height())]
    PixelOutsideBounds { pixel: Point, grid: PixelGrid },
    #[error("pixel grid size {grid_size} does not match buffer size {buffer_size}")]
    BoundsMismatch { grid_size: usize, buffer_size: usize },
}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA raster.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    grid: PixelGrid,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(grid: PixelGrid) -> Self {
        Self {
            grid,
            buffer: vec![0; grid.rgba_len()],
        }
    }

    pub fn from_data(grid: PixelGrid, buffer: PixelBufferData) -> Result<Self, PixelBufferError> {
        let grid_size = grid.rgba_len();

        if grid_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                grid_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { grid, buffer })
    }

    #[must_use]
    pub fn grid(&self) -> PixelGrid {
        self.grid
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.buffer
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        if !self.grid.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                grid: self.grid,
            });
        }

        let index = ((pixel.y as usize) * (self.grid.width() as usize) + pixel.x as usize) * 4;
        self.buffer[index..index + 4].copy_from_slice(&colour.to_rgba());

        Ok(())
    }

    /// Iterates over pixels as RGB triples, dropping alpha.
    pub fn rgb_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.buffer
            .chunks_exact(4)
            .flat_map(|rgba| rgba[..3].iter().copied())
    }
}
