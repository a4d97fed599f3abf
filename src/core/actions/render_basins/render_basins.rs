use std::time::Instant;

use log::{debug, info};
use thiserror::Error;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::generate_fractal_rows::{
    GenerateFractalError, generate_fractal_rows,
};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::basin_request::{BasinRequest, BasinRequestError};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::progress::ProgressEvent;
use crate::core::fractals::basin::algorithm::BasinAlgorithm;
use crate::core::fractals::basin::palette::{BasinPalette, ClassifiedPixel};
use crate::core::fractals::basin::root_registry::RootRegistry;
use crate::core::functions::compiler::ExpressionCompiler;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;

#[derive(Debug, Error)]
pub enum RenderBasinsError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(transparent)]
    Request(#[from] BasinRequestError),
    #[error("algorithm error: {0}")]
    Algorithm(#[from] PixelToComplexCoordsError),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

impl From<GenerateFractalError<PixelToComplexCoordsError>> for RenderBasinsError {
    fn from(err: GenerateFractalError<PixelToComplexCoordsError>) -> Self {
        match err {
            GenerateFractalError::Cancelled(cancelled) => Self::Cancelled(cancelled),
            GenerateFractalError::Algorithm(err) => Self::Algorithm(err),
        }
    }
}

/// A finished basin render.
#[derive(Debug, Clone, PartialEq)]
pub struct BasinImage {
    pub pixel_buffer: PixelBuffer,
    /// Roots in the order they were discovered; colour `i` belongs to root `i`.
    pub registry: RootRegistry,
}

/// Renders the basins of `algorithm` row by row.
///
/// Pixels of a row are iterated in parallel, but every terminal point is
/// classified in row-major order, so the root indices and therefore the
/// bytes are the same on every run. `on_progress` is called after every
/// twentieth row and after the last one.
pub fn render_basins<C, P>(
    algorithm: &BasinAlgorithm,
    cancel: &C,
    mut on_progress: P,
) -> Result<BasinImage, RenderBasinsError>
where
    C: CancelToken,
    P: FnMut(ProgressEvent),
{
    let grid = algorithm.grid();
    let palette = BasinPalette::new(algorithm.max_iterations());
    let mut registry = RootRegistry::new();
    let mut buffer: PixelBufferData = Vec::with_capacity(grid.rgba_len());
    let start = Instant::now();

    debug!(
        "rendering {}x{} basins with {:?}, {} iterations, {}",
        grid.width(),
        grid.height(),
        algorithm.method(),
        algorithm.max_iterations(),
        palette.display_name()
    );

    generate_fractal_rows(grid, algorithm, cancel, |y, orbits| {
        for orbit in orbits {
            let class = registry.classify(orbit.terminal);
            let Ok(colour) = palette.map(ClassifiedPixel {
                class,
                iterations: orbit.iterations,
            });
            buffer.extend_from_slice(&colour.to_rgba());
        }

        if let Some(event) = ProgressEvent::after_row(y, grid.height()) {
            on_progress(event);
        }
    })?;

    let pixel_buffer = PixelBuffer::from_data(grid, buffer)?;

    info!(
        "rendered {}x{} basins in {:?}, {} roots found",
        grid.width(),
        grid.height(),
        start.elapsed(),
        registry.len()
    );

    Ok(BasinImage {
        pixel_buffer,
        registry,
    })
}

/// Compiles `request` with `compiler` and renders it.
pub fn render_request<C, P>(
    request: &BasinRequest,
    compiler: &dyn ExpressionCompiler,
    cancel: &C,
    on_progress: P,
) -> Result<BasinImage, RenderBasinsError>
where
    C: CancelToken,
    P: FnMut(ProgressEvent),
{
    let algorithm = request.compile(compiler)?;
    render_basins(&algorithm, cancel, on_progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;
    use crate::core::data::method::Method;
    use crate::core::functions::catalog::FunctionCatalog;
    use crate::core::fractals::basin::palette::BASIN_PALETTE;

    fn request(width: u32, height: u32) -> BasinRequest {
        BasinRequest {
            width,
            height,
            ..BasinRequest::default()
        }
    }

    #[test]
    fn test_buffer_covers_grid() {
        let image = render_request(&request(7, 5), &FunctionCatalog::new(), &NeverCancel, |_| {}).unwrap();

        assert_eq!(image.pixel_buffer.buffer_size(), 7 * 5 * 4);
        assert!(image.pixel_buffer.buffer().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_first_pixel_takes_first_palette_colour() {
        let image = render_request(&request(4, 4), &FunctionCatalog::new(), &NeverCancel, |_| {}).unwrap();

        let first = &image.pixel_buffer.buffer()[..3];
        let Colour { r, g, b } = BASIN_PALETTE[0];

        // Shading only ever brightens the base colour.
        assert!(first[0] >= r && first[1] >= g && first[2] >= b);
    }

    #[test]
    fn test_progress_events() {
        let mut events = Vec::new();

        render_request(&request(3, 45), &FunctionCatalog::new(), &NeverCancel, |event| {
            events.push(event.percent);
        })
        .unwrap();

        assert_eq!(events, vec![100.0 * 20.0 / 45.0, 100.0 * 40.0 / 45.0, 100.0]);
    }

    #[test]
    fn test_cancelled_render_returns_no_image() {
        let result = render_request(&request(8, 8), &FunctionCatalog::new(), &|| true, |_| {});

        assert!(matches!(result, Err(RenderBasinsError::Cancelled(_))));
    }

    #[test]
    fn test_request_errors_are_reported() {
        let request = BasinRequest {
            method: Method::Aitken,
            ..request(4, 4)
        };

        let result = render_request(&request, &FunctionCatalog::new(), &NeverCancel, |_| {});

        assert!(matches!(result, Err(RenderBasinsError::Request(_))));
    }
}
