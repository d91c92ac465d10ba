//! Data-driven list materialization.

use tracing::{debug, warn};

use crate::{
    config::LayoutConfig,
    data::substitute,
    geom::{Axis, Edges, Expanse, Rect},
    id::NodeId,
    tree::Tree,
};

/// Rebuild the children of list node `id` from its template and bound data,
/// stacking them top to bottom.
///
/// Existing children are always freed. Without a template or live data the
/// list is left empty.
pub fn materialize(tree: &mut Tree, id: NodeId, config: &LayoutConfig) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let rect = node.rect;
    let pad = node.style.map(|s| s.safe_padding()).unwrap_or_default();
    let spacing = node
        .style
        .map(|s| s.safe_spacing())
        .unwrap_or(config.list_spacing);
    let origin_x = rect
        .x
        .saturating_add(pad.left)
        .saturating_sub(node.scroll_bias(Axis::Horizontal));
    let mut cursor = rect
        .y
        .saturating_add(pad.top)
        .saturating_sub(node.scroll_bias(Axis::Vertical));
    let template = node.template();
    let data = node.data();

    tree.clear_children(id);

    let (Some(template), Some(data)) = (template, data) else {
        set_content(tree, id, rect, pad, 0, 0, spacing);
        return;
    };
    let Some(t) = tree.node(template) else {
        set_content(tree, id, rect, pad, 0, 0, spacing);
        return;
    };
    let height = if t.hints.fixed_height > 0 {
        t.hints.fixed_height
    } else if t.rect.h > 0 {
        t.rect.h
    } else {
        config.list_item_height
    };
    let width = rect.w.saturating_sub(pad.horizontal());

    let records = data.records();
    let mut count = 0;
    for record in &records {
        let item = match tree.clone_subtree(template) {
            Ok(item) => item,
            Err(e) => {
                warn!(list = ?id, error = %e, "template copy failed");
                break;
            }
        };
        for n in tree.pre_order(item) {
            if let Some(node) = tree.node_mut(n)
                && node.text.contains("${")
            {
                node.text = substitute(&node.text, record);
            }
        }
        if let Some(node) = tree.node_mut(item) {
            node.rect = Rect::new(origin_x, cursor, width, height);
        }
        if tree.attach(id, item).is_err() {
            if let Err(e) = tree.remove_subtree(item) {
                warn!(list = ?id, error = %e, "stray list item");
            }
            break;
        }
        cursor = cursor.saturating_add(height).saturating_add(spacing);
        count += 1;
    }

    debug!(list = ?id, items = count, "regenerated list items");
    set_content(tree, id, rect, pad, count, height, spacing);
}

/// Record the content size of a list with `count` items.
fn set_content(
    tree: &mut Tree,
    id: NodeId,
    rect: Rect,
    pad: Edges,
    count: i32,
    height: i32,
    spacing: i32,
) {
    let items = count
        .saturating_mul(height)
        .saturating_add((count - 1).max(0).saturating_mul(spacing));
    if let Some(node) = tree.node_mut(id) {
        node.content = Expanse::new(rect.w, items.saturating_add(pad.vertical()));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::{data::DataSource, error::Result, node::Node, style::LayoutStyle};

    fn people() -> Result<Rc<DataSource>> {
        DataSource::from_json(
            &json!([
                {"name": "Ann", "age": 41},
                {"name": "Bob", "age": 30},
                {"name": "Cy", "age": 7},
            ])
            .to_string(),
        )
    }

    #[test]
    fn generates_one_child_per_record() -> Result<()> {
        let data = people()?;
        let mut t = Tree::new();
        let list = t.insert(Node::list().with_rect(Rect::new(0, 0, 200, 400)));
        let tmpl = t.insert(Node::leaf().fixed_height(20).with_text("${name} (${age})"));
        t.set_template(list, tmpl)?;
        t.bind_data(list, &data)?;

        materialize(&mut t, list, &LayoutConfig::default());
        let kids = t.children(list).to_vec();
        assert_eq!(kids.len(), 3);
        assert_eq!(t.get(kids[1])?.text, "Bob (30)");
        assert_eq!(t.get(kids[1])?.rect, Rect::new(0, 25, 200, 20));
        assert_eq!(t.get(list)?.content, Expanse::new(200, 3 * 20 + 2 * 5));
        // Template itself is untouched.
        assert_eq!(t.get(tmpl)?.text, "${name} (${age})");
        Ok(())
    }

    #[test]
    fn regeneration_frees_old_items() -> Result<()> {
        let data = people()?;
        let mut t = Tree::new();
        let list = t.insert(Node::list().with_rect(Rect::new(0, 0, 200, 400)));
        let tmpl = t.insert(Node::leaf());
        t.set_template(list, tmpl)?;
        t.bind_data(list, &data)?;

        materialize(&mut t, list, &LayoutConfig::default());
        let first = t.children(list).to_vec();
        let before = t.len();
        data.set(data.records().into_iter().take(1).collect());
        materialize(&mut t, list, &LayoutConfig::default());
        assert_eq!(t.children(list).len(), 1);
        assert_eq!(t.len(), before - 2);
        assert!(first.iter().all(|id| !t.contains(*id)));
        Ok(())
    }

    #[test]
    fn extreme_spacing_saturates() -> Result<()> {
        let data = people()?;
        let mut t = Tree::new();
        let list = t.insert(
            Node::list()
                .with_rect(Rect::new(0, 0, 200, 400))
                .with_style(LayoutStyle::vertical().spacing(i32::MAX)),
        );
        let tmpl = t.insert(Node::leaf().fixed_height(20));
        t.set_template(list, tmpl)?;
        t.bind_data(list, &data)?;

        materialize(&mut t, list, &LayoutConfig::default());
        let kids = t.children(list).to_vec();
        assert_eq!(kids.len(), 3);
        assert_eq!(t.get(kids[0])?.rect.y, 0);
        assert_eq!(t.get(kids[1])?.rect.y, i32::MAX);
        assert_eq!(t.get(list)?.content, Expanse::new(200, i32::MAX));
        Ok(())
    }

    #[test]
    fn dropped_data_empties_list() -> Result<()> {
        let data = people()?;
        let mut t = Tree::new();
        let list = t.insert(Node::list().with_rect(Rect::new(0, 0, 200, 400)));
        let tmpl = t.insert(Node::leaf());
        t.set_template(list, tmpl)?;
        t.bind_data(list, &data)?;
        materialize(&mut t, list, &LayoutConfig::default());
        assert_eq!(t.children(list).len(), 3);

        drop(data);
        materialize(&mut t, list, &LayoutConfig::default());
        assert!(t.children(list).is_empty());
        assert_eq!(t.get(list)?.content, Expanse::new(200, 0));
        Ok(())
    }
}
