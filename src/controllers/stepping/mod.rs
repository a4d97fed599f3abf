//! Drives a [`RootIterationEngine`](crate::core::iteration::engine::RootIterationEngine)
//! on an external clock: one step per tick until the run ends.

mod controller;

pub use controller::{IterationController, RunState};
