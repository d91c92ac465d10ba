use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{Axis, Rect};

/// A signed 2D point.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the origin point.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Return true when both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// The coordinate along an axis.
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Shift the point by an offset, saturating at the bounds of `i32`.
    pub fn scroll(&self, x: i32, y: i32) -> Self {
        Self {
            x: self.x.saturating_add(x),
            y: self.y.saturating_add(y),
        }
    }

    /// Clamp a point, constraining it to fall within `rect`. Degenerate
    /// rectangles clamp to their origin.
    pub fn clamp(&self, rect: Rect) -> Self {
        Self {
            x: self.x.clamp(rect.x, rect.x.saturating_add(rect.w.max(0))),
            y: self.y.clamp(rect.y, rect.y.saturating_add(rect.h.max(0))),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        assert_eq!(Point::zero() + (1, 1).into(), (1, 1).into());
        assert_eq!(Point::new(3, 4) - Point::new(1, 6), Point::new(2, -2));
        assert_eq!(-Point::new(3, -4), Point::new(-3, 4));
    }

    #[test]
    fn scroll_saturates() {
        assert_eq!(Point::new(i32::MAX, 0).scroll(1, -5), Point::new(i32::MAX, -5));
    }

    #[test]
    fn clamp_degenerate() {
        let r = Rect::new(10, 10, -5, 0);
        assert_eq!(Point::new(50, 50).clamp(r), Point::new(10, 10));
        assert_eq!(Point::new(0, 0).clamp(Rect::new(2, 2, 4, 4)), Point::new(2, 2));
    }
}
