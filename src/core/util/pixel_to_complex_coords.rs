use thiserror::Error;

use crate::core::data::complex::Complex;
use crate::core::data::pixel_grid::PixelGrid;
use crate::core::data::point::Point;
use crate::core::data::view_window::ViewWindow;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum PixelToComplexCoordsError {
    #[error("point (x: {}, y: {}) is outside the {}x{} grid", point.x, point.y, grid.width(), grid.height())]
    PointOutsideGrid { point: Point, grid: PixelGrid },
}

/// Maps a pixel onto the view so that pixel `(0, 0)` lands on
/// `(min_re, min_im)` and the last pixel of each axis on the maximum.
pub fn pixel_to_complex_coords(
    pixel_position: Point,
    grid: PixelGrid,
    view: ViewWindow,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !grid.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideGrid {
            point: pixel_position,
            grid,
        });
    }

    let real = view.min_re
        + (f64::from(pixel_position.x) / f64::from(grid.width() - 1)) * view.width();
    let imag = view.min_im
        + (f64::from(pixel_position.y) / f64::from(grid.height() - 1)) * view.height();

    Ok(Complex { real, imag })
}
