//! Evaluable functions and the compiler seam that produces them.

pub mod catalog;
pub mod compiler;
pub mod differencing;
pub mod evaluable;
