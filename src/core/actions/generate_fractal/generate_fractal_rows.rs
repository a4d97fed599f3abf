use rayon::prelude::*;
use thiserror::Error;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_grid::PixelGrid;
use crate::core::data::point::Point;

/// Distinguishes cancellation from algorithm failures so callers can treat
/// the former as control flow rather than an error to display.
#[derive(Debug, Error)]
pub enum GenerateFractalError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("algorithm error: {0}")]
    Algorithm(#[source] E),
}

/// Computes the grid one row at a time, top to bottom, handing each finished
/// row to `on_row` in order.
///
/// Pixels within a row are computed in parallel on rayon's pool; rows are
/// not. The token is checked before every row, so a cancelled run stops at
/// the next row boundary.
pub fn generate_fractal_rows<Alg, C, F>(
    grid: PixelGrid,
    algorithm: &Alg,
    cancel: &C,
    mut on_row: F,
) -> Result<(), GenerateFractalError<Alg::Failure>>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send,
    C: CancelToken,
    F: FnMut(u32, Vec<Alg::Success>),
{
    for y in 0..grid.height() {
        if cancel.is_cancelled() {
            return Err(GenerateFractalError::Cancelled(Cancelled));
        }

        let row = (0..grid.width())
            .into_par_iter()
            .map(|x| algorithm.compute(Point { x, y }))
            .collect::<Result<Vec<_>, _>>()
            .map_err(GenerateFractalError::Algorithm)?;

        on_row(y, row);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq, Error)]
    #[error("StubError")]
    struct StubError;

    #[derive(Debug)]
    struct StubSuccessAlgorithm;

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok(u64::from(pixel.x) + 100 * u64::from(pixel.y))
        }
    }

    #[derive(Debug)]
    struct StubFailureAlgorithm;

    impl FractalAlgorithm for StubFailureAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            Err(StubError)
        }
    }

    #[test]
    fn test_rows_arrive_in_order_with_pixels_in_order() {
        let grid = PixelGrid::new(4, 3).unwrap();
        let mut rows = Vec::new();

        generate_fractal_rows(grid, &StubSuccessAlgorithm, &|| false, |y, row| rows.push((y, row)))
            .unwrap();

        assert_eq!(
            rows,
            vec![
                (0, vec![0, 1, 2, 3]),
                (1, vec![100, 101, 102, 103]),
                (2, vec![200, 201, 202, 203]),
            ]
        );
    }

    #[test]
    fn test_propagates_algorithm_failure() {
        let grid = PixelGrid::new(3, 4).unwrap();

        let result = generate_fractal_rows(grid, &StubFailureAlgorithm, &|| false, |_, _| {});

        assert!(matches!(result, Err(GenerateFractalError::Algorithm(StubError))));
    }

    #[test]
    fn test_stops_at_row_boundary_when_cancelled() {
        let grid = PixelGrid::new(5, 10).unwrap();
        let rows_seen = AtomicU32::new(0);
        let cancel = || rows_seen.load(Ordering::Relaxed) >= 2;

        let result = generate_fractal_rows(grid, &StubSuccessAlgorithm, &cancel, |_, _| {
            rows_seen.fetch_add(1, Ordering::Relaxed);
        });

        assert!(matches!(result, Err(GenerateFractalError::Cancelled(_))));
        assert_eq!(rows_seen.load(Ordering::Relaxed), 2);
    }
}
