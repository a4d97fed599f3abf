use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes buffers as binary PPM. PPM has no alpha channel, so it is dropped.
#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(filepath)?);
        encode_ppm(buffer, &mut file)?;
        file.flush()
    }
}

pub fn encode_ppm<W: Write>(buffer: &PixelBuffer, out: &mut W) -> std::io::Result<()> {
    let grid = buffer.grid();

    // P6: binary RGB, then width, height and max colour value
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", grid.width(), grid.height())?;
    writeln!(out, "255")?;

    let rgb: Vec<u8> = buffer.rgb_bytes().collect();
    out.write_all(&rgb)
}
