pub mod basin_request;
pub mod colour;
pub mod complex;
pub mod iteration_step;
pub mod method;
pub mod pixel_buffer;
pub mod pixel_grid;
pub mod point;
pub mod progress;
pub mod render_message;
pub mod view_window;
