//! Interactive controller for basin rendering.
//!
//! Requests are rendered on a background worker. Submitting a new request
//! supersedes the one in flight: the old render stops at its next row
//! boundary and nothing it produced is presented.
//!
//! # Architecture
//!
//! The interactive controller follows the ports & adapters pattern:
//! - **Input**: [`BasinRequest`](crate::core::data::basin_request::BasinRequest)
//!   snapshots describing what to render
//! - **Output**: [`InteractiveControllerPresenterPort`] receiving progress,
//!   frames and errors
//! - **Core**: Uses the render action from `core/` for actual computation

mod controller;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;
pub use events::render_event::{FrameData, ProgressData, RenderError, RenderEvent};
pub use ports::presenter_port::InteractiveControllerPresenterPort;
