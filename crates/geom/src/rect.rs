use serde::{Deserialize, Serialize};

use super::{Axis, Edges, Expanse, Point};

/// A rectangle with a signed origin and signed extents.
///
/// Negative extents are legal and describe a degenerate rectangle that
/// contains no points.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Does this rect contain no points?
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Start coordinate along an axis.
    pub fn start(&self, axis: Axis) -> i32 {
        self.origin().along(axis)
    }

    /// Extent along an axis.
    pub fn extent(&self, axis: Axis) -> i32 {
        self.expanse().along(axis)
    }

    /// Set the start coordinate along an axis.
    pub fn set_start(&mut self, axis: Axis, v: i32) {
        match axis {
            Axis::Horizontal => self.x = v,
            Axis::Vertical => self.y = v,
        }
    }

    /// Set the extent along an axis.
    pub fn set_extent(&mut self, axis: Axis, v: i32) {
        match axis {
            Axis::Horizontal => self.w = v,
            Axis::Vertical => self.h = v,
        }
    }

    /// Does the rect contain the point? The right and bottom edges are
    /// exclusive.
    pub fn contains_point(&self, p: impl Into<Point>) -> bool {
        let p = p.into();
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Intersection of two rects, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        ))
    }

    /// Shrink the rect by the given edges. The result may be degenerate.
    pub fn inset(&self, edges: Edges) -> Self {
        Self {
            x: self.x.saturating_add(edges.left),
            y: self.y.saturating_add(edges.top),
            w: self.w.saturating_sub(edges.horizontal()),
            h: self.h.saturating_sub(edges.vertical()),
        }
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}
