use thiserror::Error;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::method::Method;
use crate::core::data::pixel_grid::PixelGrid;
use crate::core::data::point::Point;
use crate::core::data::view_window::ViewWindow;
use crate::core::functions::evaluable::ComplexFunction;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};

/// Offset of the secant's shadow point from the starting pixel.
pub const SECANT_SHADOW_OFFSET: Complex = Complex::new(1e-3, 1e-3);

/// Secant denominators smaller than this end the pixel's iteration.
pub const SECANT_DENOMINATOR_FLOOR: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BasinAlgorithmError {
    #[error("{0} cannot render basins; use newton, secant or picard")]
    UnsupportedMethod(Method),
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),
}

/// Iterations that run in the complex plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BasinMethod {
    Newton,
    Secant,
    Picard,
}

impl TryFrom<Method> for BasinMethod {
    type Error = BasinAlgorithmError;

    fn try_from(method: Method) -> Result<Self, Self::Error> {
        match method {
            Method::Newton => Ok(Self::Newton),
            Method::Secant => Ok(Self::Secant),
            Method::Picard => Ok(Self::Picard),
            other => Err(BasinAlgorithmError::UnsupportedMethod(other)),
        }
    }
}

/// Where a starting point ended up and how many steps it took.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelOrbit {
    pub terminal: Complex,
    pub iterations: u32,
}

#[derive(Debug, Clone)]
pub struct BasinAlgorithm {
    grid: PixelGrid,
    view: ViewWindow,
    function: ComplexFunction,
    fixed_point_map: Option<ComplexFunction>,
    method: BasinMethod,
    max_iterations: u32,
    tolerance: f64,
}

impl BasinAlgorithm {
    pub fn new(
        grid: PixelGrid,
        view: ViewWindow,
        function: ComplexFunction,
        method: Method,
        max_iterations: u32,
        tolerance: f64,
    ) -> Result<Self, BasinAlgorithmError> {
        let method = BasinMethod::try_from(method)?;

        if max_iterations == 0 {
            return Err(BasinAlgorithmError::ZeroMaxIterations);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(BasinAlgorithmError::Tolerance(tolerance));
        }

        Ok(Self {
            grid,
            view,
            function,
            fixed_point_map: None,
            method,
            max_iterations,
            tolerance,
        })
    }

    /// Sets `φ` for Picard. Without one Picard iterates `z - f(z)`.
    #[must_use]
    pub fn with_fixed_point_map(mut self, phi: ComplexFunction) -> Self {
        self.fixed_point_map = Some(phi);
        self
    }

    #[must_use]
    pub fn grid(&self) -> PixelGrid {
        self.grid
    }

    #[must_use]
    pub fn view(&self) -> ViewWindow {
        self.view
    }

    #[must_use]
    pub fn method(&self) -> BasinMethod {
        self.method
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Runs the iteration from `start` until `|f(z)|` drops below the
    /// tolerance or the budget is spent. Numerical trouble is not an error:
    /// the orbit simply ends where it is.
    #[must_use]
    pub fn iterate(&self, start: Complex) -> PixelOrbit {
        let mut z = start;
        let mut z_prev = start + SECANT_SHADOW_OFFSET;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            let fz = self.function.value_at(z);
            if fz.magnitude() < self.tolerance {
                break;
            }

            z = match self.method {
                BasinMethod::Newton => z - fz / self.function.slope_at(z),
                BasinMethod::Secant => {
                    let denom = fz - self.function.value_at(z_prev);
                    let size = denom.magnitude();
                    if !size.is_finite() || size < SECANT_DENOMINATOR_FLOOR {
                        break;
                    }

                    let next = z - fz * (z - z_prev) / denom;
                    z_prev = z;
                    next
                }
                BasinMethod::Picard => match &self.fixed_point_map {
                    Some(phi) => phi.value_at(z),
                    None => z - fz,
                },
            };
            iterations += 1;
        }

        PixelOrbit {
            terminal: z,
            iterations,
        }
    }
}

impl FractalAlgorithm for BasinAlgorithm {
    type Success = PixelOrbit;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let start = pixel_to_complex_coords(pixel, self.grid, self.view)?;
        Ok(self.iterate(start))
    }
}
