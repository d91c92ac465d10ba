//! The node arena.

use std::{mem, rc::Rc};

use slotmap::SlotMap;
use tracing::trace;

use crate::{
    behavior::{Behavior, NodeContext},
    data::DataSource,
    error::{Error, Result},
    geom::Point,
    id::NodeId,
    node::Node,
};

/// Generational arena owning every node of one or more trees.
///
/// A node is either attached (it has a parent) or a root. Templates and
/// overlay roots are owned by their node without being children of it.
#[derive(Debug, Default)]
pub struct Tree {
    /// Node storage.
    nodes: SlotMap<NodeId, Node>,
}

impl Tree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.template = None;
        node.overlay_root = None;
        self.nodes.insert(node)
    }

    /// Insert a node and attach it under a parent.
    pub fn insert_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let id = self.insert(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Does the arena hold this node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, including templates and overlay roots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Borrow a node, failing on a stale handle.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Mutably borrow a node, failing on a stale handle.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Children of a node, or an empty slice for a stale handle.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Look up a node by name within a subtree, in pre-order.
    pub fn find(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.pre_order(root)
            .into_iter()
            .find(|id| self.nodes.get(*id).is_some_and(|n| n.name == name))
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Does `owner` own `node`, directly or through children, templates and
    /// overlay roots? A node owns itself.
    pub fn owns(&self, owner: NodeId, node: NodeId) -> bool {
        owner == node || self.owned_post_order(owner).contains(&node)
    }

    /// Attach a child at the end of a parent's children. A child that is
    /// already attached elsewhere is moved.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.contains(child) {
            return Err(Error::NodeNotFound(child));
        }
        if self.owns(child, parent) {
            return Err(Error::InvalidOperation(
                "attach would create a cycle".into(),
            ));
        }
        self.detach(child)?;
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Detach a node from its parent, leaving it in the arena as a root.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let parent = self.get(child)?.parent;
        let Some(parent) = parent else {
            return Ok(());
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        Ok(())
    }

    /// Remove a node, its descendants, and every template and overlay root
    /// they own.
    pub fn remove_subtree(&mut self, root: NodeId) -> Result<()> {
        self.detach(root)?;
        for id in self.owned_post_order(root) {
            self.nodes.remove(id);
        }
        Ok(())
    }

    /// Free every child of a node. Templates and overlay roots of the node
    /// itself are kept.
    pub(crate) fn clear_children(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
            }
            for n in self.owned_post_order(child) {
                self.nodes.remove(n);
            }
        }
    }

    /// Install a detached subtree as a node's list template, freeing any
    /// previous template.
    pub fn set_template(&mut self, id: NodeId, template: NodeId) -> Result<()> {
        self.adopt_detached(id, template)?;
        let old = self.get_mut(id)?.template.replace(template);
        if let Some(old) = old.filter(|old| *old != template) {
            self.remove_subtree(old)?;
        }
        Ok(())
    }

    /// Install a detached subtree as a node's overlay root, freeing any
    /// previous one.
    pub fn set_overlay_root(&mut self, id: NodeId, root: NodeId) -> Result<()> {
        self.adopt_detached(id, root)?;
        let old = self.get_mut(id)?.overlay_root.replace(root);
        if let Some(old) = old.filter(|old| *old != root) {
            self.remove_subtree(old)?;
        }
        Ok(())
    }

    /// Validate a subtree about to be owned by `owner` outside its children.
    fn adopt_detached(&mut self, owner: NodeId, sub: NodeId) -> Result<()> {
        if !self.contains(owner) {
            return Err(Error::NodeNotFound(owner));
        }
        if self.owns(sub, owner) {
            return Err(Error::InvalidOperation(
                "a node cannot own its own ancestor".into(),
            ));
        }
        self.detach(sub)
    }

    /// Bind a list node to a data source.
    pub fn bind_data(&mut self, id: NodeId, data: &Rc<DataSource>) -> Result<()> {
        self.get_mut(id)?.data = Some(Rc::downgrade(data));
        Ok(())
    }

    /// Show or hide a node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    /// Deep-copy a subtree: the node, its children, template and overlay
    /// root, behaviors included. The copy is detached.
    pub fn clone_subtree(&mut self, root: NodeId) -> Result<NodeId> {
        let src = self.get(root)?;
        let copy = src.duplicate();
        let children = src.children.clone();
        let template = src.template;
        let overlay_root = src.overlay_root;

        let id = self.nodes.insert(copy);
        for child in children {
            let c = self.clone_subtree(child)?;
            if let Some(node) = self.nodes.get_mut(c) {
                node.parent = Some(id);
            }
            if let Some(node) = self.nodes.get_mut(id) {
                node.children.push(c);
            }
        }
        if let Some(t) = template {
            let t = self.clone_subtree(t)?;
            if let Some(node) = self.nodes.get_mut(id) {
                node.template = Some(t);
            }
        }
        if let Some(o) = overlay_root {
            let o = self.clone_subtree(o)?;
            if let Some(node) = self.nodes.get_mut(id) {
                node.overlay_root = Some(o);
            }
        }
        Ok(id)
    }

    /// Collect a subtree in pre-order, including the root. Only children are
    /// followed.
    pub fn pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Collect everything a node owns in post-order: children, templates and
    /// overlay roots, recursively, then the node itself.
    fn owned_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                out.push(id);
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            stack.push((id, true));
            for owned in node
                .children
                .iter()
                .rev()
                .chain(node.template.iter())
                .chain(node.overlay_root.iter())
            {
                stack.push((*owned, false));
            }
        }
        out
    }

    /// The deepest visible node under a point, searching from `root`. Later
    /// siblings win over earlier ones.
    pub fn locate(&self, root: NodeId, point: Point) -> Option<NodeId> {
        let node = self.nodes.get(root)?;
        if !node.visible || !node.rect.contains_point(point) {
            return None;
        }
        let mut cur = root;
        'descend: loop {
            for child in self.children(cur).iter().rev() {
                if self
                    .nodes
                    .get(*child)
                    .is_some_and(|n| n.visible && n.rect.contains_point(point))
                {
                    cur = *child;
                    continue 'descend;
                }
            }
            return Some(cur);
        }
    }

    /// Call a closure with a node's behavior taken out of its slot, so that
    /// the closure can mutate the tree through a [`NodeContext`]. The behavior
    /// is put back afterwards unless the node was removed, or the slot was
    /// refilled, in the meantime.
    ///
    /// Returns `None` if the node is gone or has no behavior.
    pub fn with_behavior<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Behavior, &mut NodeContext<'_>) -> R,
    ) -> Option<R> {
        self.dispatch(id, f).map(|(out, _)| out)
    }

    /// Like [`Tree::with_behavior`], also reporting whether the callback
    /// requested that its node be closed.
    pub(crate) fn dispatch<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Behavior, &mut NodeContext<'_>) -> R,
    ) -> Option<(R, bool)> {
        let mut behavior = self.nodes.get_mut(id)?.behavior.take()?;
        trace!(node = ?id, behavior = behavior.name(), "behavior callback");
        let (out, close) = {
            let mut ctx = NodeContext::new(self, id);
            let out = f(behavior.as_mut(), &mut ctx);
            (out, ctx.close_requested())
        };
        if let Some(node) = self.nodes.get_mut(id)
            && node.behavior.is_none()
        {
            node.behavior = Some(behavior);
        }
        Some((out, close))
    }
}
