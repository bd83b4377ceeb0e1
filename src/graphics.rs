//! Graphics Support for the 1.54" panels

use crate::color::Color;
use embedded_graphics_core::prelude::*;

/// Width of the panel in pixels
const WIDTH: u32 = 200;
/// Height of the panel in pixels
const HEIGHT: u32 = 200;
const BYTECOUNT: usize = (WIDTH / 8 * HEIGHT) as usize;

/// Display rotation, only 90° increments supported
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Full frame buffer used for drawing with embedded graphics
///
/// One bit per pixel, rows top to bottom, most significant bit leftmost. The buffer
/// is what `set_frame_memory` expects for a full panel write.
pub struct Display1in54 {
    buffer: [u8; BYTECOUNT],
    rotation: DisplayRotation,
}

impl Default for Display1in54 {
    /// A white frame
    // inline is necessary here to allow heap allocation via Box on stack limited programs
    #[inline(always)]
    fn default() -> Self {
        Display1in54 {
            buffer: [Color::White.get_byte_value(); BYTECOUNT],
            rotation: DisplayRotation::default(),
        }
    }
}

/// For use with embedded_grahics
impl DrawTarget for Display1in54 {
    type Color = Color;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_pixel(pixel);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(color.get_byte_value());
        Ok(())
    }
}

/// For use with embedded_grahics
impl OriginDimensions for Display1in54 {
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => Size::new(WIDTH, HEIGHT),
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => Size::new(HEIGHT, WIDTH),
        }
    }
}

impl Display1in54 {
    /// get internal buffer to use it (to draw in epd)
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Set the display rotation.
    ///
    /// This only concerns future drawing made to it. Anything aready drawn
    /// stays as it is in the buffer.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Get current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Set a specific pixel color on this display. Pixels outside are ignored.
    pub fn set_pixel(&mut self, pixel: Pixel<Color>) {
        let Pixel(point, color) = pixel;
        let (w, h) = (WIDTH as i32, HEIGHT as i32);

        // final coordinates
        let (x, y) = match self.rotation {
            DisplayRotation::Rotate0 => (point.x, point.y),
            DisplayRotation::Rotate90 => (w - 1 - point.y, point.x),
            DisplayRotation::Rotate180 => (w - 1 - point.x, h - 1 - point.y),
            DisplayRotation::Rotate270 => (point.y, h - 1 - point.x),
        };

        if x < 0 || x >= w || y < 0 || y >= h {
            return;
        }

        let index = x as usize / 8 + y as usize * (WIDTH / 8) as usize;
        let (mask, bits) = color.bitmask(x as u32);
        self.buffer[index] = self.buffer[index] & mask | bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::*,
        primitives::{Line, PrimitiveStyle},
    };

    fn black_line(rotation: DisplayRotation, from: Point, to: Point) -> Display1in54 {
        let mut display = Display1in54::default();
        display.set_rotation(rotation);
        let _ = Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(Color::Black, 1))
            .draw(&mut display);
        display
    }

    fn assert_only_first_byte_black(display: &Display1in54) {
        let buffer = display.buffer();
        assert_eq!(buffer[0], Color::Black.get_byte_value());
        for &byte in buffer.iter().skip(1) {
            assert_eq!(byte, Color::White.get_byte_value());
        }
    }

    #[test]
    fn graphics_size() {
        let display = Display1in54::default();
        assert_eq!(display.buffer().len(), 5000);
        assert_eq!(display.size(), Size::new(200, 200));
    }

    #[test]
    fn graphics_default_is_white() {
        let display = Display1in54::default();
        for &byte in display.buffer() {
            assert_eq!(byte, 0xFF);
        }
    }

    #[test]
    fn graphics_clear() {
        let mut display = Display1in54::default();
        display.clear(Color::Black).unwrap();
        assert!(display.buffer().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn graphics_rotation_0() {
        let display = black_line(DisplayRotation::Rotate0, Point::new(0, 0), Point::new(7, 0));
        assert_only_first_byte_black(&display);
    }

    #[test]
    fn graphics_rotation_90() {
        let display = black_line(
            DisplayRotation::Rotate90,
            Point::new(0, 192),
            Point::new(0, 199),
        );
        assert_only_first_byte_black(&display);
    }

    #[test]
    fn graphics_rotation_180() {
        let display = black_line(
            DisplayRotation::Rotate180,
            Point::new(192, 199),
            Point::new(199, 199),
        );
        assert_only_first_byte_black(&display);
    }

    #[test]
    fn graphics_rotation_270() {
        let display = black_line(
            DisplayRotation::Rotate270,
            Point::new(199, 0),
            Point::new(199, 7),
        );
        assert_only_first_byte_black(&display);
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut display = Display1in54::default();
        display.set_pixel(Pixel(Point::new(200, 0), Color::Black));
        display.set_pixel(Pixel(Point::new(0, 200), Color::Black));
        display.set_pixel(Pixel(Point::new(-1, 5), Color::Black));
        assert!(display.buffer().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn single_pixel() {
        let mut display = Display1in54::default();
        display.set_pixel(Pixel(Point::new(9, 1), Color::Black));
        assert_eq!(display.buffer()[25 + 1], 0b1011_1111);
    }

    #[test]
    fn rotated_size() {
        let mut display = Display1in54::default();
        display.set_rotation(DisplayRotation::Rotate90);
        assert_eq!(display.rotation(), DisplayRotation::Rotate90);
        assert_eq!(display.size(), Size::new(200, 200));
    }
}
