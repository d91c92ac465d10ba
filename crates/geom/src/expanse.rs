use serde::{Deserialize, Serialize};

use super::{Axis, Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Content sizes are expressed as expanses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expanse {
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Expanse {
    /// Construct a new expanse.
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The extent along an axis.
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Build an expanse from main and cross extents.
    pub fn from_main_cross(axis: Axis, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self { w: main, h: cross },
            Axis::Vertical => Self { w: cross, h: main },
        }
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }

    /// True if this expanse can completely enclose the target in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// The difference `self - visible` per axis, floored at zero. This is
    /// the scrollable range of a viewport of size `visible` over content of
    /// this size.
    pub fn overflow(&self, visible: Self) -> Point {
        Point {
            x: self.w.saturating_sub(visible.w).max(0),
            y: self.h.saturating_sub(visible.h).max(0),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(i32, i32)> for Expanse {
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
