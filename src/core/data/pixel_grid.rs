use thiserror::Error;

use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelGridError {
    #[error("pixel grid must be at least 2x2: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Raster dimensions of a basin render.
///
/// Both sides must be at least two pixels: the pixel-to-plane mapping
/// divides by `width - 1` and `height - 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32) -> Result<Self, PixelGridError> {
        if width < 2 || height < 2 {
            return Err(PixelGridError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Byte length of an RGBA raster covering the grid.
    #[must_use]
    pub fn rgba_len(&self) -> usize {
        self.size() as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_grid_dimensions() {
        let grid = PixelGrid::new(121, 101).unwrap();

        assert_eq!(grid.width(), 121);
        assert_eq!(grid.height(), 101);
        assert_eq!(grid.size(), 12221);
        assert_eq!(grid.rgba_len(), 48884);
    }

    #[test]
    fn test_pixel_grid_must_be_at_least_two_pixels_wide_and_tall() {
        assert_eq!(
            PixelGrid::new(1, 1),
            Err(PixelGridError::InvalidSize {
                width: 1,
                height: 1
            })
        );
        assert_eq!(
            PixelGrid::new(11, 1),
            Err(PixelGridError::InvalidSize {
                width: 11,
                height: 1
            })
        );
        assert_eq!(
            PixelGrid::new(0, 11),
            Err(PixelGridError::InvalidSize {
                width: 0,
                height: 11
            })
        );
        assert!(PixelGrid::new(2, 2).is_ok());
    }

    #[test]
    fn test_pixel_grid_contains_point() {
        let grid = PixelGrid::new(3, 3).unwrap();

        assert!(grid.contains_point(Point { x: 0, y: 0 }));
        assert!(grid.contains_point(Point { x: 2, y: 2 }));
        assert!(!grid.contains_point(Point { x: 3, y: 1 }));
        assert!(!grid.contains_point(Point { x: 1, y: 3 }));
    }
}
