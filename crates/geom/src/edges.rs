use serde::{Deserialize, Serialize};

use super::Axis;

/// Per-side insets, used for padding.
///
/// Serialized as a `[top, right, bottom, left]` array.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Edges {
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
    /// Left inset.
    pub left: i32,
}

impl Edges {
    /// Construct edges in CSS order.
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same inset on every side.
    pub fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Zero insets.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Left plus right, saturating.
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Top plus bottom, saturating.
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// Inset before content along an axis.
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Sum of both insets along an axis.
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// Replace negative insets with zero.
    pub fn clamped(&self) -> Self {
        Self::new(
            self.top.max(0),
            self.right.max(0),
            self.bottom.max(0),
            self.left.max(0),
        )
    }
}

impl From<[i32; 4]> for Edges {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Edges> for [i32; 4] {
    fn from(e: Edges) -> Self {
        [e.top, e.right, e.bottom, e.left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_order() {
        let e: Edges = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(e, Edges::new(1, 2, 3, 4));
        assert_eq!(e.horizontal(), 6);
        assert_eq!(e.vertical(), 4);
        assert_eq!(e.leading(Axis::Horizontal), 4);
        assert_eq!(serde_json::to_string(&e).unwrap(), "[1,2,3,4]");
    }

    #[test]
    fn clamp_negative() {
        assert_eq!(Edges::new(-1, 2, -3, 4).clamped(), Edges::new(0, 2, 0, 4));
    }
}
