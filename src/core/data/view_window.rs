use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::data::complex::Complex;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewWindowError {
    #[error("view window extent must be positive: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// Axis-aligned rectangle of the complex plane shown by a basin render.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewWindow {
    pub min_re: f64,
    pub max_re: f64,
    pub min_im: f64,
    pub max_im: f64,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            min_re: -2.0,
            max_re: 2.0,
            min_im: -2.0,
            max_im: 2.0,
        }
    }
}

impl ViewWindow {
    pub fn new(min_re: f64, max_re: f64, min_im: f64, max_im: f64) -> Result<Self, ViewWindowError> {
        let view = Self {
            min_re,
            max_re,
            min_im,
            max_im,
        };
        view.validate()?;
        Ok(view)
    }

    pub fn validate(&self) -> Result<(), ViewWindowError> {
        let width = self.width();
        let height = self.height();

        // Negated comparison so NaN extents are rejected too.
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(ViewWindowError::InvalidSize { width, height });
        }

        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_re - self.min_re
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_im - self.min_im
    }

    #[must_use]
    pub fn centre(&self) -> Complex {
        Complex {
            real: (self.min_re + self.max_re) / 2.0,
            imag: (self.min_im + self.max_im) / 2.0,
        }
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        self.min_re <= point.real
            && self.min_im <= point.imag
            && self.max_re >= point.real
            && self.max_im >= point.imag
    }

    /// Scales the window about its centre. A factor below one zooms in.
    #[must_use]
    pub fn zoomed(&self, factor: f64) -> Self {
        let centre = self.centre();
        let half_width = self.width() * factor / 2.0;
        let half_height = self.height() * factor / 2.0;

        Self {
            min_re: centre.real - half_width,
            max_re: centre.real + half_width,
            min_im: centre.imag - half_height,
            max_im: centre.imag + half_height,
        }
    }

    /// Shifts the window by a drag of `(dx, dy)` pixels on a canvas of the
    /// given size. Dragging right moves the view left; dragging down moves
    /// it towards larger imaginary parts.
    #[must_use]
    pub fn panned(&self, dx: f64, dy: f64, canvas_width: f64, canvas_height: f64) -> Self {
        let shift_re = (-dx / canvas_width) * self.width();
        let shift_im = (dy / canvas_height) * self.height();

        Self {
            min_re: self.min_re + shift_re,
            max_re: self.max_re + shift_re,
            min_im: self.min_im + shift_im,
            max_im: self.max_im + shift_im,
        }
    }

    /// Narrows the window to a box dragged between two canvas positions.
    /// Corners are clamped to the canvas and may be given in any order.
    pub fn box_selected(
        &self,
        start: (f64, f64),
        end: (f64, f64),
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<Self, ViewWindowError> {
        let clamp_x = |x: f64| x.clamp(0.0, canvas_width);
        let clamp_y = |y: f64| y.clamp(0.0, canvas_height);

        let (sx, sy) = (clamp_x(start.0), clamp_y(start.1));
        let (ex, ey) = (clamp_x(end.0), clamp_y(end.1));
        let (x0, x1) = (sx.min(ex), sx.max(ex));
        let (y0, y1) = (sy.min(ey), sy.max(ey));

        Self::new(
            self.min_re + (x0 / canvas_width) * self.width(),
            self.min_re + (x1 / canvas_width) * self.width(),
            self.min_im + (y0 / canvas_height) * self.height(),
            self.min_im + (y1 / canvas_height) * self.height(),
        )
    }
}
