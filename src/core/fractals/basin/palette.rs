use std::convert::Infallible;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::basin::root_registry::BasinClass;

/// Root colours, cycled by registry index.
pub const BASIN_PALETTE: [Colour; 6] = [
    Colour::new(16, 185, 129),
    Colour::new(59, 130, 246),
    Colour::new(244, 63, 94),
    Colour::new(234, 179, 8),
    Colour::new(99, 102, 241),
    Colour::new(147, 51, 234),
];

/// Base colour of pixels whose iteration diverged.
pub const DIVERGED_COLOUR: Colour = Colour::new(15, 23, 42);

/// Most a channel is brightened, reached when the whole budget was used.
pub const SHADE_RANGE: f64 = 50.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClassifiedPixel {
    pub class: BasinClass,
    pub iterations: u32,
}

/// Colours a pixel by its root and brightens it by the share of the
/// iteration budget it used.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BasinPalette {
    max_iterations: u32,
}

impl BasinPalette {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    fn shade(&self, channel: u8, iterations: u32) -> u8 {
        let share = f64::from(iterations) / f64::from(self.max_iterations.max(1));
        (f64::from(channel) + SHADE_RANGE * share).min(255.0).round_ties_even() as u8
    }
}

impl ColourMap for BasinPalette {
    type T = ClassifiedPixel;
    type Failure = Infallible;

    fn map(&self, pixel: ClassifiedPixel) -> Result<Colour, Infallible> {
        let base = match pixel.class {
            BasinClass::Root(index) => BASIN_PALETTE[index % BASIN_PALETTE.len()],
            BasinClass::Diverged => DIVERGED_COLOUR,
        };

        Ok(Colour::new(
            self.shade(base.r, pixel.iterations),
            self.shade(base.g, pixel.iterations),
            self.shade(base.b, pixel.iterations),
        ))
    }

    fn display_name(&self) -> &str {
        "basin palette"
    }
}
