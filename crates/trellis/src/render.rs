//! Draw-order traversal handed to an external renderer.

use std::slice;

use crate::{
    geom::Rect,
    id::NodeId,
    node::{Node, ScrollMode},
    tree::Tree,
};

/// A single draw instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCmd {
    /// Paint a node's box.
    Node {
        /// Node being painted.
        id: NodeId,
        /// Outer rectangle.
        rect: Rect,
        /// Clip imposed by scrollable ancestors, if any.
        clip: Option<Rect>,
    },
    /// Paint a node's text.
    Text {
        /// Node owning the text.
        id: NodeId,
        /// Outer rectangle of the node.
        rect: Rect,
        /// Text to draw.
        text: String,
    },
}

impl DrawCmd {
    /// The node this command belongs to.
    pub fn id(&self) -> NodeId {
        match self {
            Self::Node { id, .. } | Self::Text { id, .. } => *id,
        }
    }
}

/// An ordered list of draw commands. Later commands paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    /// Commands in paint order.
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    /// Commands in paint order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Node boxes in paint order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Node { id, .. } => Some(*id),
                DrawCmd::Text { .. } => None,
            })
            .collect()
    }

    /// Append the visible part of a tree in pre-order.
    pub fn append_tree(&mut self, tree: &Tree, root: NodeId) {
        self.append_node(tree, root, None);
    }

    /// Append one node, its children and its overlay root.
    fn append_node(&mut self, tree: &Tree, id: NodeId, clip: Option<Rect>) {
        let Some(node) = tree.node(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        self.push(DrawCmd::Node {
            id,
            rect: node.rect,
            clip,
        });
        if !node.text.is_empty() {
            self.push(DrawCmd::Text {
                id,
                rect: node.rect,
                text: node.text.clone(),
            });
        }
        if let Some(behavior) = &node.behavior {
            behavior.draw(id, node, self);
        }

        let inner = child_clip(node, clip);
        for child in node.children() {
            self.append_node(tree, *child, inner);
        }
        if let Some(overlay) = node.overlay_root() {
            self.append_node(tree, overlay, clip);
        }
    }
}

/// The clip for a node's children.
fn child_clip(node: &Node, clip: Option<Rect>) -> Option<Rect> {
    if node.scroll_mode == ScrollMode::None {
        return clip;
    }
    let content = node.content_box();
    let clipped = match clip {
        Some(c) => c
            .intersect(&content)
            .unwrap_or(Rect::new(content.x, content.y, 0, 0)),
        None => content,
    };
    Some(clipped)
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCmd;
    type IntoIter = slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}
