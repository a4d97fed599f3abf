//! One-shot basin render on its own thread, reported over a channel.

mod spawn_render;

pub use spawn_render::{RenderJob, RenderJobError, spawn_render};
