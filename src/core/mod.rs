pub mod actions;
pub mod data;
pub mod fractals;
pub mod functions;
pub mod iteration;
pub mod util;
