//! Per-node layout style.

use serde::{Deserialize, Serialize};

use crate::{error::Result, geom::Edges};

/// How a container arranges its children.
///
/// `Center`, `Left` and `Right` are alignment overrides: on a child of a
/// vertical container they replace the container's `align` for that child.
/// A node using one of them for itself does not position its own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Children keep the geometry they were given.
    #[default]
    Absolute,
    /// Children are distributed left to right.
    Horizontal,
    /// Children are distributed top to bottom.
    Vertical,
    /// Children are placed in uniform cells.
    Grid,
    /// Center this node horizontally within a vertical parent.
    Center,
    /// Align this node to the left of a vertical parent.
    Left,
    /// Align this node to the right of a vertical parent.
    Right,
}

impl Mode {
    /// The alignment override carried by this mode, if any.
    pub fn align_override(self) -> Option<Align> {
        match self {
            Self::Center => Some(Align::Center),
            Self::Left => Some(Align::Left),
            Self::Right => Some(Align::Right),
            _ => None,
        }
    }
}

/// Cross-axis alignment of children in a vertical container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Align {
    /// Flush with the left padding edge.
    #[default]
    Left,
    /// Centered within the content box.
    Center,
    /// Flush with the right padding edge.
    Right,
}

/// Layout configuration for a node.
///
/// Deserializes from the loader's JSON shape, for example
/// `{"mode": "Vertical", "padding": [10, 10, 10, 10], "spacing": 4}`. Missing
/// fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutStyle {
    /// Arrangement of children.
    pub mode: Mode,
    /// Cross-axis alignment for vertical containers.
    pub align: Align,
    /// Padding in `[top, right, bottom, left]` order.
    pub padding: Edges,
    /// Gap between consecutive children.
    pub spacing: i32,
    /// Column count for grid layout.
    pub columns: i32,
}

impl LayoutStyle {
    /// A style with the given mode and everything else defaulted.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Left-to-right distribution.
    pub fn horizontal() -> Self {
        Self::new(Mode::Horizontal)
    }

    /// Top-to-bottom distribution.
    pub fn vertical() -> Self {
        Self::new(Mode::Vertical)
    }

    /// Uniform grid with the given column count.
    pub fn grid(columns: i32) -> Self {
        Self {
            columns,
            ..Self::new(Mode::Grid)
        }
    }

    /// Set padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set spacing.
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the column count.
    pub fn columns(mut self, columns: i32) -> Self {
        self.columns = columns;
        self
    }

    /// Parse a style from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Padding with negative insets replaced by zero.
    pub(crate) fn safe_padding(&self) -> Edges {
        self.padding.clamped()
    }

    /// Spacing, with negative values replaced by zero.
    pub(crate) fn safe_spacing(&self) -> i32 {
        self.spacing.max(0)
    }

    /// Column count, at least one.
    pub(crate) fn safe_columns(&self) -> i32 {
        self.columns.max(1)
    }
}
