//! A simple Driver for 1.54" 200x200 monochrome E-Ink Displays via SPI
//!
//! This driver was built using [`embedded-hal`] traits and supports two controller
//! revisions of the panel:
//!
//! - [GDEY0154D67](epd1in54_d67) with full, partial and fast refreshes
//! - [GDEW0154M09](epd1in54_m09) with full and partial refreshes from uploaded waveforms
//!
//! Both implement [EpdDriver](prelude::EpdDriver). The drivers own the control lines,
//! the SPI device and the delay are borrowed by every call.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//!
//! ### Other....
//!
//! - Chip select and busy are optional, use [NoPin](prelude::NoPin) to name their type
//!   when passing `None`. Without busy line every busy wait sleeps its whole timeout.
//! - The reset line has to report its level (`StatefulOutputPin`). Deep sleep is skipped
//!   while it reads low.
//! - Buffersize: Wherever a buffer is used it always needs to be of the size: `width / 8 * height`,
//!   where width and height being either the full e-ink size or the partial update window size.
//!   A set bit is a white pixel.
//!
//! # Examples
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::*;
//!# fn main() -> Result<(), embedded_hal::spi::ErrorKind> {
//!use embedded_graphics::{
//!    prelude::*,
//!    primitives::{Line, PrimitiveStyle},
//!};
//!use epd154::{epd1in54_m09::*, graphics::DisplayRotation, prelude::*};
//!#
//!# let expectations = [];
//!# let mut spi = spi::Mock::new(&expectations);
//!# let expectations = [];
//!# let cs_pin = digital::Mock::new(&expectations);
//!# let busy_in = digital::Mock::new(&expectations);
//!# let dc = digital::Mock::new(&expectations);
//!# let rst = digital::Mock::new(&expectations);
//!# let mut delay = delay::NoopDelay::new();
//!
//!// Setup EPD
//!let mut epd = Epd1in54M09::new(Some(busy_in), Some(cs_pin), dc, rst, RefreshMode::Full, None);
//!
//!// Use display graphics from embedded-graphics
//!let mut display = Display1in54::default();
//!display.set_rotation(DisplayRotation::Rotate90);
//!
//!// Use embedded graphics for drawing a line
//!let _ = Line::new(Point::new(0, 120), Point::new(0, 199))
//!    .into_styled(PrimitiveStyle::with_stroke(Color::Black, 1))
//!    .draw(&mut display);
//!
//!// Display updated frame
//!epd.set_frame_memory(&mut spi, &mut delay, display.buffer(), 0, 0, WIDTH, HEIGHT)?;
//!
//!// Set the EPD to sleep
//!epd.sleep(&mut spi, &mut delay)?;
//!# Ok(())
//!# }
//!```
#![cfg_attr(not(test), no_std)]

#[cfg(feature = "graphics")]
pub mod graphics;

mod log;

mod traits;

pub mod color;

/// Interface for the physical connection between display and the controlling device
mod interface;

mod power;

mod ram;

pub mod rect;

pub mod epd1in54_d67;
pub mod epd1in54_m09;

#[cfg(test)]
mod test_utils;

/// Includes everything important besides the chosen display
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::interface::NoPin;
    pub use crate::traits::{EpdDriver, Orientation, PowerState, RefreshMode};
    pub use crate::SPI_MODE;

    #[cfg(feature = "graphics")]
    pub use crate::graphics::{Display1in54, DisplayRotation};
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};
