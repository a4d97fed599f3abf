pub mod generate_fractal_rows;
pub mod ports;
