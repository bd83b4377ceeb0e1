//! Mapping of pixel rectangles onto the controller RAM
//!
//! The RAM is addressed in byte columns (8 horizontal pixels) and pixel rows.

use crate::traits::Orientation;

/// Size of the panel in pixels
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DisplayGeometry {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl DisplayGeometry {
    pub(crate) const fn new(width: u32, height: u32) -> Self {
        DisplayGeometry { width, height }
    }

    /// Last byte column
    pub(crate) const fn max_column(&self) -> u32 {
        self.width / 8 - 1
    }

    /// Last pixel row
    pub(crate) const fn max_row(&self) -> u32 {
        self.height - 1
    }

    /// Bytes needed for one full frame
    pub(crate) const fn buffer_len(&self) -> u32 {
        self.width / 8 * self.height
    }

    /// Inclusive window covering the whole panel
    pub(crate) const fn full_window(&self) -> RamWindow {
        RamWindow {
            x: 0,
            y: 0,
            x_end: self.width - 1,
            y_end: self.height - 1,
        }
    }

    /// Turns a pixel rectangle into an inclusive window inside the panel
    ///
    /// x and width are rounded down to multiples of 8. A rectangle reaching the edge of
    /// the panel ends on the last pixel, starts are clamped into the panel and the end
    /// never lies before the start.
    pub(crate) fn calc_coords(&self, x: u32, y: u32, width: u32, height: u32) -> RamWindow {
        let x = (x & !7).min(self.width - 8);
        let width = width & !7;
        let y = y.min(self.height - 1);

        let x_end = if x.saturating_add(width) >= self.width {
            self.width - 1
        } else {
            (x + width).saturating_sub(1).max(x)
        };
        let y_end = if y.saturating_add(height) >= self.height {
            self.height - 1
        } else {
            (y + height).saturating_sub(1).max(y)
        };

        RamWindow { x, y, x_end, y_end }
    }

    /// Byte columns and rows the window occupies for the given orientation
    ///
    /// Inverted addressing mirrors both axes, so start and end swap places.
    pub(crate) fn map(&self, window: RamWindow, orientation: Orientation) -> RamArea {
        let (col_start, col_end) = (window.x / 8, window.x_end / 8);
        match orientation {
            Orientation::Normal => RamArea {
                col_start,
                col_end,
                row_start: window.y,
                row_end: window.y_end,
            },
            Orientation::Inverted => RamArea {
                col_start: self.max_column() - col_start,
                col_end: self.max_column() - col_end,
                row_start: self.max_row() - window.y,
                row_end: self.max_row() - window.y_end,
            },
        }
    }
}

/// Inclusive pixel window, x is a multiple of 8
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RamWindow {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) x_end: u32,
    pub(crate) y_end: u32,
}

/// A window in RAM address units, in the order the address counters run
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RamArea {
    pub(crate) col_start: u32,
    pub(crate) col_end: u32,
    pub(crate) row_start: u32,
    pub(crate) row_end: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: DisplayGeometry = DisplayGeometry::new(200, 200);

    fn window(x: u32, y: u32, x_end: u32, y_end: u32) -> RamWindow {
        RamWindow { x, y, x_end, y_end }
    }

    #[test]
    fn geometry() {
        assert_eq!(PANEL.max_column(), 24);
        assert_eq!(PANEL.max_row(), 199);
        assert_eq!(PANEL.buffer_len(), 5000);
        assert_eq!(PANEL.full_window(), window(0, 0, 199, 199));
    }

    #[test]
    fn calc_coords_clips_at_the_edge() {
        assert_eq!(PANEL.calc_coords(196, 196, 20, 20), window(192, 196, 199, 199));
        assert_eq!(PANEL.calc_coords(0, 0, 200, 200), window(0, 0, 199, 199));
    }

    #[test]
    fn calc_coords_aligns_to_bytes() {
        assert_eq!(PANEL.calc_coords(13, 5, 21, 10), window(8, 5, 23, 14));
        assert_eq!(PANEL.calc_coords(64, 64, 64, 16), window(64, 64, 127, 79));
    }

    #[test]
    fn calc_coords_clamps_degenerate_requests() {
        // narrower than a byte collapses to one column
        assert_eq!(PANEL.calc_coords(16, 0, 7, 1), window(16, 0, 16, 0));
        // start beyond the panel
        assert_eq!(PANEL.calc_coords(400, 300, 8, 8), window(192, 199, 199, 199));
        assert_eq!(PANEL.calc_coords(8, 8, 0, 0), window(8, 8, 8, 8));
    }

    #[test]
    fn normal_mapping() {
        let area = PANEL.map(window(8, 5, 23, 14), Orientation::Normal);
        assert_eq!(
            area,
            RamArea {
                col_start: 1,
                col_end: 2,
                row_start: 5,
                row_end: 14
            }
        );
    }

    #[test]
    fn inverted_mapping_reflects_both_axes() {
        let area = PANEL.map(window(0, 0, 7, 0), Orientation::Inverted);
        assert_eq!(
            area,
            RamArea {
                col_start: 24,
                col_end: 24,
                row_start: 199,
                row_end: 199
            }
        );
        let area = PANEL.map(PANEL.full_window(), Orientation::Inverted);
        assert_eq!(
            area,
            RamArea {
                col_start: 24,
                col_end: 0,
                row_start: 199,
                row_end: 0
            }
        );
    }
}
