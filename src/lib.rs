pub mod controllers;
pub mod core;
pub mod presenters;

pub use controllers::cli::{BasinCliController, BasinCliError, IterateCliController, IterateCliError};
pub use controllers::interactive::{
    FrameData, InteractiveController, InteractiveControllerPresenterPort, ProgressData, RenderError,
    RenderEvent,
};
pub use controllers::job::{RenderJob, RenderJobError, spawn_render};
pub use controllers::ports::file_presenter::FilePresenterPort;
pub use controllers::stepping::{IterationController, RunState};
pub use crate::core::actions::cancellation::{CancelFlag, CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::render_basins::{BasinImage, RenderBasinsError, render_basins, render_request};
pub use crate::core::data::basin_request::{BasinRequest, BasinRequestError};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::iteration_step::{Bracket, IterationStep, PlotRange};
pub use crate::core::data::method::Method;
pub use crate::core::data::render_message::RenderMessage;
pub use crate::core::data::view_window::ViewWindow;
pub use crate::core::functions::catalog::FunctionCatalog;
pub use crate::core::functions::compiler::{ExpressionCompiler, ParseError};
pub use crate::core::iteration::config::{ConfigError, IterationConfig};
pub use crate::core::iteration::engine::RootIterationEngine;
pub use crate::core::iteration::outcome::{FailureReason, StepOutcome};
pub use crate::core::iteration::request::{IterationRequest, IterationRequestError};
pub use crate::core::iteration::stability_guard::StabilityGuard;
pub use presenters::file::ppm::PpmFilePresenter;
