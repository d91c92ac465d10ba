//! Engine-wide layout constants.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fallback extents and step sizes used when nodes do not specify their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Width of a horizontal child with neither flex nor fixed width.
    pub default_width: i32,
    /// Height of a vertical child with neither flex nor fixed height, when
    /// flexible siblings are present.
    pub default_height: i32,
    /// Height of a generated list item when the template does not set one.
    pub list_item_height: i32,
    /// Spacing between list items when the list has no style.
    pub list_spacing: i32,
    /// Scroll distance per wheel notch.
    pub scroll_step: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_width: 50,
            default_height: 30,
            list_item_height: 30,
            list_spacing: 5,
            scroll_step: 20,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override() -> Result<()> {
        let c = LayoutConfig::from_json(r#"{"defaultWidth": 64, "scrollStep": 8}"#)?;
        assert_eq!(c.default_width, 64);
        assert_eq!(c.scroll_step, 8);
        assert_eq!(c.default_height, 30);
        assert_eq!(c.list_spacing, 5);
        Ok(())
    }
}
