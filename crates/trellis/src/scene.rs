//! Event routing across a tree and its overlays.

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    event::{KeyEvent, MouseEvent, ScrollEvent},
    id::NodeId,
    layout::{LayoutEngine, scroll},
    node::{Node, ScrollMode},
    overlay::OverlayStack,
    registry::Registry,
    render::DrawList,
    tree::Tree,
};

/// A named action, bound to nodes through `on_click` and `on_scroll`. It
/// receives the tree and the node that triggered it.
pub type Action = Box<dyn FnMut(&mut Tree, NodeId)>;

/// A tree with its overlays, actions, and focus.
///
/// Input goes to overlays first. Only events no overlay handles reach the
/// tree.
pub struct Scene {
    /// Main node tree.
    tree: Tree,
    /// Root of the main tree.
    root: NodeId,
    /// Active floating surfaces.
    overlays: OverlayStack,
    /// Named actions.
    actions: Registry<Action>,
    /// Geometry resolver.
    engine: LayoutEngine,
    /// Node receiving key events.
    focus: Option<NodeId>,
}

impl Scene {
    /// A scene over a tree rooted at `root`, with a default engine.
    pub fn new(tree: Tree, root: NodeId) -> Result<Self> {
        if !tree.contains(root) {
            return Err(Error::NodeNotFound(root));
        }
        Ok(Self {
            tree,
            root,
            overlays: OverlayStack::new(),
            actions: Registry::new(),
            engine: LayoutEngine::default(),
            focus: None,
        })
    }

    /// Replace the layout engine.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// The main tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The main tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Root of the main tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The overlay stack.
    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    /// The overlay stack, mutably.
    pub fn overlays_mut(&mut self) -> &mut OverlayStack {
        &mut self.overlays
    }

    /// The action registry.
    pub fn actions(&self) -> &Registry<Action> {
        &self.actions
    }

    /// The action registry, mutably.
    pub fn actions_mut(&mut self) -> &mut Registry<Action> {
        &mut self.actions
    }

    /// The focused node, if it still exists.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus.filter(|id| self.tree.contains(*id))
    }

    /// Focus a node.
    pub fn set_focus(&mut self, id: NodeId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(Error::NodeNotFound(id));
        }
        self.focus = Some(id);
        Ok(())
    }

    /// Resolve the main tree and every overlay.
    pub fn resolve(&mut self) {
        self.engine.resolve(&mut self.tree, self.root);
        self.overlays.resolve(&self.engine);
    }

    /// Route a mouse event. Returns true if anything handled it.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if event.is_press() && !self.overlays.hit_test(event.pos) {
            let closed = self.overlays.close_auto();
            if closed > 0 {
                debug!(closed, "press outside overlays");
            }
        }
        if self.overlays.broadcast_mouse(event) {
            return true;
        }
        let Some(target) = self.tree.locate(self.root, event.pos) else {
            return false;
        };

        let mut handled = false;
        let mut cur = Some(target);
        while let Some(id) = cur {
            let outcome = self.tree.with_behavior(id, |b, ctx| b.on_mouse(ctx, event));
            if outcome.is_some_and(|o| o.is_handled()) {
                handled = true;
                break;
            }
            cur = self.tree.parent(id);
        }

        if event.is_press() {
            if let Some(id) = self.nearest(target, |n| n.accepts_focus()) {
                self.focus = Some(id);
            }
            if let Some(id) = self.nearest(target, |n| n.on_click.is_some()) {
                if let Some(name) = self.tree.node(id).and_then(|n| n.on_click.clone()) {
                    handled |= self.fire(id, &name);
                }
            }
        }
        handled
    }

    /// Route a key event. Returns true if anything handled it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if self.overlays.broadcast_key(event) {
            return true;
        }
        let Some(focus) = self.focus() else {
            return false;
        };
        self.tree
            .with_behavior(focus, |b, ctx| b.on_key(ctx, event))
            .is_some_and(|o| o.is_handled())
    }

    /// Route a scroll event. Unhandled scrolls move the deepest scrollable
    /// node under the pointer. Returns true if anything handled it.
    pub fn handle_scroll(&mut self, event: &ScrollEvent) -> bool {
        if self.overlays.broadcast_scroll(event) {
            return true;
        }
        let Some(target) = self.tree.locate(self.root, event.pos) else {
            return false;
        };
        let Some(id) = self.nearest(target, |n| n.scroll_mode != ScrollMode::None) else {
            return false;
        };
        let outcome = self.tree.with_behavior(id, |b, ctx| b.on_scroll(ctx, event));
        if outcome.is_some_and(|o| o.is_handled()) {
            return true;
        }

        let step = self.engine.config().scroll_step;
        let dx = event.delta.x.saturating_mul(step);
        let dy = event.delta.y.saturating_mul(step);
        if !scroll::scroll_by(&mut self.tree, id, dx, dy) {
            return false;
        }
        self.engine.resolve(&mut self.tree, id);
        if let Some(name) = self.tree.node(id).and_then(|n| n.on_scroll.clone()) {
            self.fire(id, &name);
        }
        true
    }

    /// Draw commands for the tree, then the overlays bottom to top.
    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new();
        list.append_tree(&self.tree, self.root);
        self.overlays.draw(&mut list);
        list
    }

    /// The closest node to `start`, walking up through ancestors, that
    /// satisfies a predicate.
    fn nearest(&self, start: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut cur = Some(start);
        while let Some(id) = cur {
            if self.tree.node(id).is_some_and(&pred) {
                return Some(id);
            }
            cur = self.tree.parent(id);
        }
        None
    }

    /// Run a named action for a node.
    fn fire(&mut self, id: NodeId, name: &str) -> bool {
        match self.actions.get_mut(name) {
            Some(action) => {
                debug!(action = %name, node = ?id, "firing action");
                action(&mut self.tree, id);
                true
            }
            None => {
                warn!(action = %name, node = ?id, "no action registered");
                false
            }
        }
    }
}
