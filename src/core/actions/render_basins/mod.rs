mod render_basins;

pub use render_basins::{BasinImage, RenderBasinsError, render_basins, render_request};
