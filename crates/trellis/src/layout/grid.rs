//! Uniform cell placement.

use tracing::trace;

use crate::{
    geom::{Axis, Expanse, Rect},
    id::NodeId,
    tree::Tree,
};

/// Place the visible children of `id` row-major into equal cells.
pub fn arrange(tree: &mut Tree, id: NodeId) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let style = node.style.unwrap_or_default();
    let columns = style.safe_columns();
    let spacing = style.safe_spacing();
    let pad = style.safe_padding();
    let content = node.content_box();
    let rect = node.rect;
    let origin_x = content.x.saturating_sub(node.scroll_bias(Axis::Horizontal));
    let origin_y = content.y.saturating_sub(node.scroll_bias(Axis::Vertical));

    let visible: Vec<NodeId> = node
        .children()
        .iter()
        .copied()
        .filter(|c| tree.node(*c).is_some_and(|n| n.visible))
        .collect();
    if visible.is_empty() {
        if let Some(node) = tree.node_mut(id) {
            node.content = rect.expanse();
        }
        return;
    }

    let count = i32::try_from(visible.len()).unwrap_or(i32::MAX);
    let rows = (count - 1) / columns + 1;
    let cell_w = content.w.saturating_sub(gaps(columns, spacing)) / columns;
    let cell_h = content.h.saturating_sub(gaps(rows, spacing)) / rows;
    trace!(grid = ?id, columns, rows, cell_w, cell_h, "grid cells");

    for (i, child) in (0..).zip(&visible) {
        let (row, col) = (i / columns, i % columns);
        if let Some(n) = tree.node_mut(*child) {
            n.rect = Rect::new(
                origin_x.saturating_add(col.saturating_mul(cell_w.saturating_add(spacing))),
                origin_y.saturating_add(row.saturating_mul(cell_h.saturating_add(spacing))),
                cell_w,
                cell_h,
            );
        }
    }

    if let Some(node) = tree.node_mut(id) {
        node.content = Expanse::new(
            track(columns, cell_w, spacing).saturating_add(pad.horizontal()),
            track(rows, cell_h, spacing).saturating_add(pad.vertical()),
        );
    }
}

/// Total spacing between `n` tracks.
fn gaps(n: i32, spacing: i32) -> i32 {
    (n - 1).max(0).saturating_mul(spacing)
}

/// Extent of `n` tracks of size `cell` separated by `spacing`.
fn track(n: i32, cell: i32, spacing: i32) -> i32 {
    n.saturating_mul(cell).saturating_add(gaps(n, spacing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, geom::Edges, node::Node, style::LayoutStyle};

    #[test]
    fn three_columns() -> Result<()> {
        let mut t = Tree::new();
        let g = t.insert(
            Node::grid(3)
                .with_rect(Rect::new(0, 0, 320, 210))
                .with_style(LayoutStyle::grid(3).spacing(10).padding(Edges::all(5))),
        );
        let kids = (0..5)
            .map(|_| t.insert_child(g, Node::leaf()))
            .collect::<Result<Vec<_>>>()?;
        arrange(&mut t, g);

        // 310 wide, two gaps -> 96; 200 high, two rows, one gap -> 95.
        assert_eq!(t.get(kids[0])?.rect, Rect::new(5, 5, 96, 95));
        assert_eq!(t.get(kids[2])?.rect, Rect::new(5 + 2 * 106, 5, 96, 95));
        assert_eq!(t.get(kids[4])?.rect, Rect::new(5 + 106, 5 + 105, 96, 95));
        assert_eq!(
            t.get(g)?.content,
            Expanse::new(3 * 96 + 20 + 10, 2 * 95 + 10 + 10)
        );
        Ok(())
    }

    #[test]
    fn bad_columns_clamp_to_one() -> Result<()> {
        let mut t = Tree::new();
        let g = t.insert(Node::grid(0).with_rect(Rect::new(0, 0, 50, 100)));
        let a = t.insert_child(g, Node::leaf())?;
        let b = t.insert_child(g, Node::leaf())?;
        arrange(&mut t, g);
        assert_eq!(t.get(a)?.rect, Rect::new(0, 0, 50, 50));
        assert_eq!(t.get(b)?.rect, Rect::new(0, 50, 50, 50));
        Ok(())
    }

    #[test]
    fn huge_column_count_degenerates() -> Result<()> {
        let mut t = Tree::new();
        let g = t.insert(
            Node::grid(i32::MAX)
                .with_rect(Rect::new(0, 0, 90, 40))
                .with_style(LayoutStyle::grid(i32::MAX).spacing(3)),
        );
        let kids = (0..3)
            .map(|_| t.insert_child(g, Node::leaf()))
            .collect::<Result<Vec<_>>>()?;
        arrange(&mut t, g);

        // The gaps alone saturate the width, leaving a one-row strip of
        // zero-width cells.
        assert_eq!(t.get(kids[0])?.rect, Rect::new(0, 0, 0, 40));
        assert_eq!(t.get(kids[2])?.rect, Rect::new(6, 0, 0, 40));
        assert_eq!(t.get(g)?.content, Expanse::new(i32::MAX, 40));
        Ok(())
    }

    #[test]
    fn extreme_spacing_saturates() -> Result<()> {
        let mut t = Tree::new();
        let g = t.insert(
            Node::grid(2)
                .with_rect(Rect::new(0, 0, 100, 100))
                .with_style(LayoutStyle::grid(2).spacing(i32::MAX)),
        );
        let kids = (0..4)
            .map(|_| t.insert_child(g, Node::leaf()))
            .collect::<Result<Vec<_>>>()?;
        arrange(&mut t, g);

        // 100 - MAX split over two tracks.
        let cell = (100 - i32::MAX) / 2;
        assert_eq!(t.get(kids[0])?.rect, Rect::new(0, 0, cell, cell));
        let step = cell + i32::MAX;
        assert_eq!(t.get(kids[3])?.rect, Rect::new(step, step, cell, cell));
        assert_eq!(t.get(g)?.content, Expanse::new(2 * cell + i32::MAX, 2 * cell + i32::MAX));
        Ok(())
    }

    #[test]
    fn hidden_cells_skipped() -> Result<()> {
        let mut t = Tree::new();
        let g = t.insert(Node::grid(2).with_rect(Rect::new(0, 0, 100, 100)));
        let _hidden = t.insert_child(g, Node::leaf().hidden())?;
        let a = t.insert_child(g, Node::leaf())?;
        arrange(&mut t, g);
        assert_eq!(t.get(a)?.rect, Rect::new(0, 0, 50, 100));
        Ok(())
    }
}
