//! Node capabilities.
//!
//! A node is whatever its behavior implements: custom layout, input handling,
//! drawing. Every method has a no-op default, so a behavior only overrides
//! the capabilities it actually has.

use std::any::type_name;

use crate::{
    event::{EventKind, KeyEvent, MouseEvent, ScrollEvent},
    geom::Rect,
    id::NodeId,
    node::Node,
    render::DrawList,
    tree::Tree,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and changed state.
    Handle,
    /// The event was processed without a state change.
    Consume,
    /// The event was not handled.
    Ignore,
}

impl EventOutcome {
    /// Did the handler process the event?
    pub fn is_handled(self) -> bool {
        self != Self::Ignore
    }
}

/// Mutable access to the tree on behalf of one node, handed to behavior
/// callbacks.
///
/// While a callback runs, the node's own behavior slot is empty; the
/// behavior is restored when the callback returns.
pub struct NodeContext<'a> {
    /// Tree holding the node.
    tree: &'a mut Tree,
    /// Node the callback is running for.
    id: NodeId,
    /// Set by [`NodeContext::request_close`].
    close: bool,
}

impl<'a> NodeContext<'a> {
    /// Construct a context for a node.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self {
            tree,
            id,
            close: false,
        }
    }

    /// Ask for this node to be closed once the callback returns.
    ///
    /// An overlay stack honours the request by removing the node's entry,
    /// which fires its close callback. Outside an overlay stack the request
    /// has no effect.
    pub fn request_close(&mut self) {
        self.close = true;
    }

    /// Has a close been requested during this callback?
    pub fn close_requested(&self) -> bool {
        self.close
    }

    /// The node this context is bound to.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node, if it still exists.
    pub fn node(&self) -> Option<&Node> {
        self.tree.node(self.id)
    }

    /// Mutable access to the node, if it still exists.
    pub fn node_mut(&mut self) -> Option<&mut Node> {
        self.tree.node_mut(self.id)
    }

    /// The node's rectangle, or an empty rect if the node is gone.
    pub fn rect(&self) -> Rect {
        self.node().map(|n| n.rect).unwrap_or_default()
    }

    /// Replace the node's rectangle.
    pub fn set_rect(&mut self, rect: Rect) {
        if let Some(node) = self.node_mut() {
            node.rect = rect;
        }
    }

    /// The node's children in order.
    pub fn children(&self) -> Vec<NodeId> {
        self.tree.children(self.id).to_vec()
    }

    /// The whole tree.
    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    /// The whole tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut *self.tree
    }
}

/// Behavior attached to a node.
///
/// Behaviors must be cloneable so that list templates can be deep-copied;
/// any `Clone` type gets that for free through [`BehaviorClone`].
pub trait Behavior: BehaviorClone {
    /// Adjust geometry after the engine's structural pass over this node and
    /// its descendants.
    fn layout(&mut self, _ctx: &mut NodeContext<'_>) {}

    /// Handle a mouse event.
    fn on_mouse(&mut self, _ctx: &mut NodeContext<'_>, _event: &MouseEvent) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Handle a key event.
    fn on_key(&mut self, _ctx: &mut NodeContext<'_>, _event: &KeyEvent) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Handle a scroll event.
    fn on_scroll(&mut self, _ctx: &mut NodeContext<'_>, _event: &ScrollEvent) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Does this behavior listen for events of this kind? An overlay that
    /// listens counts as handling a broadcast even when it returns
    /// [`EventOutcome::Ignore`].
    fn listens(&self, _kind: EventKind) -> bool {
        false
    }

    /// Append custom draw commands for this node.
    fn draw(&self, _id: NodeId, _node: &Node, _list: &mut DrawList) {}

    /// Can this node take keyboard focus?
    fn accept_focus(&self) -> bool {
        false
    }

    /// Short name for diagnostics.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Object-safe cloning for boxed behaviors.
pub trait BehaviorClone {
    /// Clone into a new box.
    fn clone_box(&self) -> Box<dyn Behavior>;
}

impl<T> BehaviorClone for T
where
    T: Behavior + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Behavior> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Behavior> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Convert behaviors into boxed trait objects.
impl<B> From<B> for Box<dyn Behavior>
where
    B: Behavior + 'static,
{
    fn from(b: B) -> Self {
        Box::new(b)
    }
}
