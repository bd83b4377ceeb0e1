//! Dirty rectangles handed to partial refreshes
use crate::ram::{DisplayGeometry, RamWindow};
use core::cmp;

/// A rectangle in panel pixels, may lie partly or fully outside the panel
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Rect {
    /// Origin X
    pub x: i32,
    /// Origin Y
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Construct a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Test whether the rectangle covers no pixel
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Cuts off everything outside of a `width` x `height` panel
    pub fn clip(&self, width: i32, height: i32) -> Rect {
        let (x, w) = clip_axis(self.x, self.w, width);
        let (y, h) = clip_axis(self.y, self.h, height);
        Rect { x, y, w, h }
    }

    /// Grows the rectangle horizontally to whole bytes
    ///
    /// The start moves left to a multiple of 8, the width grows by the same amount and
    /// is then rounded up to a multiple of 8.
    pub fn expand_to_bytes(&self) -> Rect {
        let shift = self.x.rem_euclid(8);
        let w = self.w.saturating_add(shift);
        Rect {
            x: self.x - shift,
            y: self.y,
            w: w.saturating_add(7) & !7,
            h: self.h,
        }
    }

    /// Inclusive RAM window of a clipped, non-empty rectangle
    pub(crate) fn to_window(self, geometry: &DisplayGeometry) -> RamWindow {
        geometry.calc_coords(self.x as u32, self.y as u32, self.w as u32, self.h as u32)
    }
}

fn clip_axis(start: i32, len: i32, limit: i32) -> (i32, i32) {
    let len = if start < 0 { len.saturating_add(start) } else { len };
    let start = cmp::max(start, 0);
    (start, cmp::min(len, limit.saturating_sub(start)))
}
