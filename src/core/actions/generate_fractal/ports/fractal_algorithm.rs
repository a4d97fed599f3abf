use std::error::Error;

use crate::core::data::point::Point;

/// Per-pixel computation of a fractal.
pub trait FractalAlgorithm {
    type Success;
    type Failure: Error;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure>;
}
