//! Geometry resolution.
//!
//! [`LayoutEngine::resolve`] walks a subtree top-down. Each node positions
//! its own visible children according to its kind and style, then the engine
//! recurses into those children and into the node's overlay root, and
//! finally gives the node's behavior a chance to adjust the result.

/// Horizontal and vertical distribution.
mod flex;
/// Uniform cell placement.
mod grid;
/// Template-driven list items.
mod list;
/// Scroll offset helpers.
pub mod scroll;

use tracing::trace;

use crate::{
    config::LayoutConfig,
    geom::{Axis, Expanse},
    id::NodeId,
    node::NodeKind,
    style::Mode,
    tree::Tree,
};

/// Resolves node geometry.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    /// Fallback extents.
    config: LayoutConfig,
}

impl LayoutEngine {
    /// An engine using the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Resolve the geometry of `id` and everything below it.
    ///
    /// A stale handle or a hidden node is a no-op. The node's own rect is
    /// taken as given, except that a styled node with a zero extent inherits
    /// that extent from its parent.
    pub fn resolve(&self, tree: &mut Tree, id: NodeId) {
        let parent = tree
            .parent(id)
            .and_then(|p| tree.node(p))
            .map(|p| p.rect.expanse());
        self.resolve_node(tree, id, parent);
    }

    /// Resolve one node, then recurse.
    fn resolve_node(&self, tree: &mut Tree, id: NodeId, parent: Option<Expanse>) {
        let Some(node) = tree.node_mut(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        if let (Some(_), Some(parent)) = (node.style, parent) {
            if node.rect.w == 0 {
                node.rect.w = parent.w;
            }
            if node.rect.h == 0 {
                node.rect.h = parent.h;
            }
        }

        let kind = node.kind;
        let mode = node.style.map(|s| s.mode);
        match (kind, mode) {
            (NodeKind::List, _) => list::materialize(tree, id, &self.config),
            (NodeKind::Grid, _) | (_, Some(Mode::Grid)) => grid::arrange(tree, id),
            (_, Some(Mode::Horizontal)) => {
                flex::arrange(tree, id, Axis::Horizontal, &self.config)
            }
            (_, Some(Mode::Vertical)) => flex::arrange(tree, id, Axis::Vertical, &self.config),
            _ => node.content = node.rect.expanse(),
        }

        let Some(node) = tree.node(id) else {
            return;
        };
        trace!(
            node = ?id,
            name = %node.name,
            rect = ?node.rect,
            content = ?node.content,
            "resolved"
        );
        let extent = node.rect.expanse();
        let children = node.children().to_vec();
        let overlay = node.overlay_root();

        for child in children {
            self.resolve_node(tree, child, Some(extent));
        }
        if let Some(overlay) = overlay {
            self.resolve_node(tree, overlay, Some(extent));
        }

        tree.with_behavior(id, |behavior, ctx| behavior.layout(ctx));
    }
}
