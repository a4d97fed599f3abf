use std::path::Path;
use std::time::Instant;

use log::info;
use thiserror::Error;

use crate::controllers::job::{RenderJobError, spawn_render};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::basin_request::{BasinRequest, BasinRequestError};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_grid::{PixelGrid, PixelGridError};
use crate::core::data::render_message::RenderMessage;
use crate::core::functions::compiler::ExpressionCompiler;

#[derive(Debug, Error)]
pub enum BasinCliError {
    #[error(transparent)]
    Request(#[from] BasinRequestError),
    #[error(transparent)]
    Job(#[from] RenderJobError),
    #[error(transparent)]
    Grid(#[from] PixelGridError),
    #[error(transparent)]
    PixelBuffer(#[from] PixelBufferError),
    #[error("render finished without an image")]
    NoImage,
}

/// Renders one basin image in the background and hands it to a file
/// presenter.
pub struct BasinCliController<P: FilePresenterPort> {
    presenter: P,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> BasinCliController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            buffer: None,
        }
    }

    pub fn generate(
        &mut self,
        request: &BasinRequest,
        compiler: &dyn ExpressionCompiler,
    ) -> Result<(), BasinCliError> {
        println!("Rendering basins of {}...", request.expr);
        println!("Image size: {}x{}", request.width, request.height);
        println!("Method: {}", request.method.display_name());
        println!("Max iterations: {}", request.max_iter);

        let start = Instant::now();
        let job = spawn_render(request, compiler)?;
        let mut image = None;

        for message in job.events() {
            match message {
                RenderMessage::Progress { progress } => info!("{progress:.0}% rendered"),
                RenderMessage::Image {
                    width,
                    height,
                    pixels,
                } => image = Some(PixelBuffer::from_data(PixelGrid::new(width, height)?, pixels)?),
            }
        }
        job.join()?;

        println!("Duration:   {:?}", start.elapsed());

        self.buffer = Some(image.ok_or(BasinCliError::NoImage)?);
        Ok(())
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath)?
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::core::functions::catalog::FunctionCatalog;

    #[derive(Default)]
    struct RecordingPresenter {
        written: Mutex<Vec<(PathBuf, usize)>>,
    }

    impl FilePresenterPort for &RecordingPresenter {
        fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
            self.written
                .lock()
                .unwrap()
                .push((filepath.as_ref().to_path_buf(), buffer.buffer_size()));
            Ok(())
        }
    }

    fn small_request() -> BasinRequest {
        BasinRequest {
            width: 8,
            height: 6,
            max_iter: 20,
            ..BasinRequest::default()
        }
    }

    #[test]
    fn test_generate_then_write_presents_the_image() {
        let presenter = RecordingPresenter::default();
        let mut controller = BasinCliController::new(&presenter);

        controller.generate(&small_request(), &FunctionCatalog::new()).unwrap();
        controller.write("out.ppm").unwrap();

        let written = presenter.written.lock().unwrap();
        assert_eq!(written.as_slice(), &[(PathBuf::from("out.ppm"), 8 * 6 * 4)]);
    }

    #[test]
    fn test_write_without_image_is_a_no_op() {
        let presenter = RecordingPresenter::default();
        let controller = BasinCliController::new(&presenter);

        controller.write("out.ppm").unwrap();

        assert!(presenter.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_bad_expression_is_reported_before_rendering() {
        let presenter = RecordingPresenter::default();
        let mut controller = BasinCliController::new(&presenter);
        let request = BasinRequest {
            expr: "sin(z) +".to_string(),
            ..small_request()
        };

        let result = controller.generate(&request, &FunctionCatalog::new());

        assert!(matches!(result, Err(BasinCliError::Request(_))));
        assert!(controller.buffer().is_none());
    }
}
