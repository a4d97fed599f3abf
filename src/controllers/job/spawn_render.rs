use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use log::warn;
use thiserror::Error;

use crate::core::actions::cancellation::CancelFlag;
use crate::core::actions::render_basins::{RenderBasinsError, render_basins};
use crate::core::data::basin_request::{BasinRequest, BasinRequestError};
use crate::core::data::render_message::RenderMessage;
use crate::core::functions::compiler::ExpressionCompiler;

#[derive(Debug, Error)]
pub enum RenderJobError {
    #[error(transparent)]
    Render(#[from] RenderBasinsError),
    #[error("render thread panicked")]
    Panicked,
}

/// Handle to a render running in the background.
///
/// Messages arrive in order: zero or more progress reports, then the image.
/// A failed or cancelled job closes the channel without an image.
#[derive(Debug)]
pub struct RenderJob {
    events: Receiver<RenderMessage>,
    cancel: CancelFlag,
    handle: JoinHandle<Result<(), RenderBasinsError>>,
}

impl RenderJob {
    #[must_use]
    pub fn events(&self) -> &Receiver<RenderMessage> {
        &self.events
    }

    /// A handle that can cancel the job from elsewhere.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Asks the render to stop at its next row boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the render thread to finish.
    pub fn join(self) -> Result<(), RenderJobError> {
        match self.handle.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(RenderJobError::Panicked),
        }
    }
}

/// Compiles `request` and starts rendering it on a new thread.
///
/// Compilation happens before the thread starts, so a bad expression is
/// reported here rather than through the job.
pub fn spawn_render(
    request: &BasinRequest,
    compiler: &dyn ExpressionCompiler,
) -> Result<RenderJob, BasinRequestError> {
    let algorithm = request.compile(compiler)?;
    let cancel = CancelFlag::new();
    let (sender, events) = mpsc::channel();

    let worker_cancel = cancel.clone();
    let handle = thread::spawn(move || {
        let progress_sender = sender.clone();
        let result = render_basins(&algorithm, &worker_cancel, |event| {
            // A dropped receiver only means nobody is listening any more.
            let _ = progress_sender.send(RenderMessage::from(event));
        });

        match result {
            Ok(image) => {
                let _ = sender.send(RenderMessage::from(image.pixel_buffer));
                Ok(())
            }
            Err(err) => {
                warn!("background render stopped: {err}");
                Err(err)
            }
        }
    });

    Ok(RenderJob {
        events,
        cancel,
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::method::Method;
    use crate::core::functions::catalog::FunctionCatalog;

    fn request(width: u32, height: u32) -> BasinRequest {
        BasinRequest {
            width,
            height,
            max_iter: 20,
            ..BasinRequest::default()
        }
    }

    #[test]
    fn test_progress_then_image() {
        let job = spawn_render(&request(5, 41), &FunctionCatalog::new()).unwrap();

        let messages: Vec<RenderMessage> = job.events().iter().collect();
        job.join().unwrap();

        let (image, progress) = messages.split_last().unwrap();
        let percents: Vec<f64> = progress
            .iter()
            .map(|m| match m {
                RenderMessage::Progress { progress } => *progress,
                other => panic!("expected progress, got {other:?}"),
            })
            .collect();

        assert_eq!(percents.len(), 3);
        assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(percents.last(), Some(&100.0));
        assert!(matches!(
            image,
            RenderMessage::Image { width: 5, height: 41, pixels } if pixels.len() == 5 * 41 * 4
        ));
    }

    #[test]
    fn test_bad_request_fails_before_spawning() {
        let request = BasinRequest {
            method: Method::Aitken,
            ..request(4, 4)
        };

        assert!(spawn_render(&request, &FunctionCatalog::new()).is_err());
    }

    #[test]
    fn test_cancel_before_start_yields_no_image() {
        let job = spawn_render(&request(400, 400), &FunctionCatalog::new()).unwrap();
        job.cancel();

        let images = job
            .events()
            .iter()
            .filter(|m| matches!(m, RenderMessage::Image { .. }))
            .count();
        let result = job.join();

        // The render may finish a few rows before seeing the flag, but never
        // the whole 400 rows.
        assert_eq!(images, 0);
        assert!(matches!(
            result,
            Err(RenderJobError::Render(RenderBasinsError::Cancelled(_)))
        ));
    }
}
