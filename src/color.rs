//! B/W Color for EPDs

#[cfg(feature = "graphics")]
use embedded_graphics_core::pixelcolor::BinaryColor;
#[cfg(feature = "graphics")]
use embedded_graphics_core::prelude::PixelColor;

/// Color of a pixel. In the frame buffer a set bit is white.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Black color
    Black,
    /// White color
    #[default]
    White,
}

impl Color {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(&self) -> u8 {
        match self {
            Color::White => 1u8,
            Color::Black => 0u8,
        }
    }

    /// Gets a full byte of black or white pixels, e.g. as fill for
    /// `clear_frame_memory`
    pub fn get_byte_value(&self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }

    /// Mask clearing the bit of pixel `x` in its byte, and the bit to set instead
    pub(crate) fn bitmask(&self, x: u32) -> (u8, u8) {
        let bit = 0x80 >> (x % 8);
        let bits = if self.get_bit_value() == 1 { bit } else { 0 };
        (!bit, bits)
    }
}

#[cfg(feature = "graphics")]
impl PixelColor for Color {
    type Raw = ();
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for BinaryColor {
    fn from(c: Color) -> BinaryColor {
        match c {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_values() {
        assert_eq!(Color::White.get_byte_value(), 0xFF);
        assert_eq!(Color::Black.get_byte_value(), 0x00);
        assert_eq!(Color::default(), Color::White);
    }

    #[test]
    fn bitmask_is_msb_first() {
        assert_eq!(Color::White.bitmask(0), (0x7F, 0x80));
        assert_eq!(Color::White.bitmask(15), (0xFE, 0x01));
        assert_eq!(Color::Black.bitmask(3), (0xEF, 0x00));
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn from_binary_color() {
        assert_eq!(Color::from(BinaryColor::On), Color::Black);
        assert_eq!(Color::from(BinaryColor::Off), Color::White);
        assert_eq!(BinaryColor::from(Color::Black), BinaryColor::On);
    }
}
