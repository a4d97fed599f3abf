use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::debug;

use crate::controllers::interactive::events::render_event::{
    FrameData, ProgressData, RenderError, RenderEvent,
};
use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;
use crate::core::actions::render_basins::{RenderBasinsError, render_request};
use crate::core::data::basin_request::BasinRequest;
use crate::core::data::progress::ProgressEvent;
use crate::core::functions::compiler::ExpressionCompiler;

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, Arc<BasinRequest>)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    compiler: Arc<dyn ExpressionCompiler>,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

impl SharedState {
    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation.load(Ordering::Acquire)
    }

    /// Presents `event` only if `generation` is still the newest. The request
    /// lock is held across the check and the call, and submissions bump the
    /// generation under the same lock, so a superseded event cannot slip
    /// through.
    fn present_if_current(&self, generation: u64, event: RenderEvent) -> bool {
        let _guard = self
            .latest_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !self.is_current(generation) {
            return false;
        }

        self.presenter_port.present(event);
        true
    }
}

pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(
        compiler: Arc<dyn ExpressionCompiler>,
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
    ) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            compiler,
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Queues `request`, superseding whatever was queued or rendering, and
    /// returns its generation id.
    pub fn submit_request(&self, request: Arc<BasinRequest>) -> u64 {
        let generation = {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *guard = Some((generation, request));
            generation
        };

        self.shared.wake.notify_one();

        generation
    }

    /// Queues the reduced-budget variant of `request` used while the view is
    /// being manipulated.
    pub fn submit_preview(&self, request: &BasinRequest) -> u64 {
        self.submit_request(Arc::new(request.preview()))
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let cancel_token = || {
                shared.shutdown.load(Ordering::Relaxed)
                    || job_generation != shared.generation.load(Ordering::Relaxed)
            };

            let on_progress = |event: ProgressEvent| {
                shared.present_if_current(
                    job_generation,
                    RenderEvent::Progress(ProgressData {
                        generation: job_generation,
                        percent: event.percent,
                    }),
                );
            };

            let start = Instant::now();
            let result = render_request(
                &request,
                shared.compiler.as_ref(),
                &cancel_token,
                on_progress,
            );
            let render_duration = start.elapsed();

            let event = match result {
                Ok(image) => RenderEvent::Frame(FrameData {
                    generation: job_generation,
                    root_count: image.registry.len(),
                    pixel_buffer: image.pixel_buffer,
                    render_duration,
                }),
                Err(RenderBasinsError::Cancelled(_)) => {
                    debug!("render generation {job_generation} superseded");
                    continue;
                }
                Err(err) => RenderEvent::Error(RenderError {
                    generation: job_generation,
                    message: err.to_string(),
                }),
            };

            if !shared.present_if_current(job_generation, event) {
                continue;
            }

            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
        }
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
