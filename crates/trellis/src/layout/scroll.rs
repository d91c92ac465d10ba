//! Scroll offset bookkeeping for node owners.
//!
//! Layout only reads scroll offsets, biasing the start cursor of each
//! scrolling axis. Keeping offsets in range is the owner's job; these helpers
//! implement it against the content size recorded by the last layout pass.

use crate::{
    geom::{Point, Rect},
    id::NodeId,
    node::{Node, ScrollMode},
    tree::Tree,
};

/// The largest valid scroll offset of a node: content minus the padded
/// viewport, floored at zero, and zero on axes the node does not scroll.
pub fn max_scroll(node: &Node) -> Point {
    let view = node.content_box().expanse();
    let pad = node.style.map(|s| s.safe_padding()).unwrap_or_default();
    let mut content = node.content;
    content.w = content.w.saturating_sub(pad.horizontal());
    content.h = content.h.saturating_sub(pad.vertical());
    let over = content.overflow(view);
    Point::new(
        if matches!(node.scroll_mode, ScrollMode::Horizontal | ScrollMode::Both) {
            over.x
        } else {
            0
        },
        if matches!(node.scroll_mode, ScrollMode::Vertical | ScrollMode::Both) {
            over.y
        } else {
            0
        },
    )
}

/// Clamp a node's scroll offset into `[0, max_scroll]`. Returns true if the
/// offset changed.
pub fn clamp_scroll(node: &mut Node) -> bool {
    let before = node.scroll;
    let max = max_scroll(node);
    node.scroll = node.scroll.clamp(Rect::new(0, 0, max.x, max.y));
    before != node.scroll
}

/// Shift a node's scroll offset and clamp it. Returns true if the offset
/// changed.
pub fn scroll_by(tree: &mut Tree, id: NodeId, x: i32, y: i32) -> bool {
    if let Some(node) = tree.node_mut(id) {
        let before = node.scroll;
        node.scroll = node.scroll.scroll(x, y);
        clamp_scroll(node);
        before != node.scroll
    } else {
        false
    }
}

/// Set a node's scroll offset and clamp it. Returns true if the offset
/// changed.
pub fn scroll_to(tree: &mut Tree, id: NodeId, x: i32, y: i32) -> bool {
    if let Some(node) = tree.node_mut(id) {
        let before = node.scroll;
        node.scroll = Point::new(x, y);
        clamp_scroll(node);
        before != node.scroll
    } else {
        false
    }
}
