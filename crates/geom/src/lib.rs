//! Geometry primitives used across trellis.
//!
//! All coordinates are signed. Layout is allowed to produce degenerate
//! rectangles (zero or negative extents) and scroll offsets may push content
//! to negative positions, so nothing here saturates at zero.

/// Padding and inset helpers.
mod edges;
/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use edges::Edges;
pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;

/// A layout axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
