//! Priority-ordered floating surfaces.
//!
//! The stack owns its overlay nodes in a private [`Tree`]. Producers create a
//! node with [`OverlayStack::create`], activate it with [`OverlayStack::add`],
//! and hold on to the returned handles. Removing an entry unlinks it, fires its
//! close callback, then frees the node subtree.

use std::{fmt, mem};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::{
    behavior::{Behavior, EventOutcome, NodeContext},
    error::{Error, Result},
    event::{EventKind, KeyEvent, MouseEvent, ScrollEvent},
    geom::Point,
    id::{NodeId, OverlayId},
    layout::LayoutEngine,
    node::Node,
    render::DrawList,
    tree::Tree,
};

/// What an overlay is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// A dropdown attached to a control.
    Dropdown,
    /// A context or menu-bar menu.
    Menu,
    /// A modal or modeless dialog.
    Dialog,
    /// A hover tooltip.
    Tooltip,
}

/// Passed to a close callback while the overlay node is still alive.
#[derive(Debug)]
pub struct OverlayClosed<'a> {
    /// Handle of the closing node. It is freed once the callback returns.
    pub id: NodeId,
    /// The closing node.
    pub node: &'a Node,
    /// Entry kind.
    pub kind: OverlayKind,
    /// Entry priority.
    pub priority: i32,
}

/// One-shot notification fired when an entry is removed.
type CloseCallback = Box<dyn FnOnce(&OverlayClosed<'_>)>;

/// An entry in the stack.
pub struct OverlayEntry {
    /// Overlay node in the stack's tree.
    node: NodeId,
    /// Entry kind.
    kind: OverlayKind,
    /// Higher values sit closer to the top.
    priority: i32,
    /// Close when the user presses outside every overlay.
    auto_close: bool,
    /// Fired once on removal.
    on_close: Option<CloseCallback>,
}

impl OverlayEntry {
    /// An auto-closing entry for a node created in the stack.
    pub fn new(node: NodeId, kind: OverlayKind, priority: i32) -> Self {
        Self {
            node,
            kind,
            priority,
            auto_close: true,
            on_close: None,
        }
    }

    /// Set whether a press outside every overlay closes this one.
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    /// Register a close callback.
    pub fn on_close(mut self, f: impl FnOnce(&OverlayClosed<'_>) + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// The overlay node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Entry kind.
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    /// Entry priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Does a press outside close this entry?
    pub fn is_auto_close(&self) -> bool {
        self.auto_close
    }
}

impl fmt::Debug for OverlayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayEntry")
            .field("node", &self.node)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .field("auto_close", &self.auto_close)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Active overlays, highest priority first.
#[derive(Debug, Default)]
pub struct OverlayStack {
    /// Arena for overlay nodes.
    tree: Tree,
    /// Entry storage.
    entries: SlotMap<OverlayId, OverlayEntry>,
    /// Stack order; the head is the top.
    order: Vec<OverlayId>,
}

impl OverlayStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// The overlay node arena.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The overlay node arena, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Insert a floating node into the overlay arena. It is not active until
    /// it is added.
    pub fn create(&mut self, node: Node) -> NodeId {
        self.tree.insert(node)
    }

    /// Activate an entry.
    ///
    /// The entry goes before the first entry with the same or lower priority.
    /// Fails without changing the stack if the node is stale or already
    /// active.
    pub fn add(&mut self, entry: OverlayEntry) -> Result<OverlayId> {
        self.validate();
        let node = entry.node;
        if !self.tree.contains(node) {
            return Err(Error::NodeNotFound(node));
        }
        if self.contains(node) {
            return Err(Error::DuplicateOverlay(node));
        }
        let priority = entry.priority;
        let kind = entry.kind;
        let pos = self
            .order
            .iter()
            .position(|id| self.entries.get(*id).is_some_and(|e| e.priority <= priority))
            .unwrap_or(self.order.len());
        let id = self.entries.insert(entry);
        self.order.insert(pos, id);
        debug!(overlay = ?id, node = ?node, ?kind, priority, depth = pos, "overlay added");
        Ok(id)
    }

    /// Remove the entry for a node. Returns false if no active entry refers
    /// to it.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.validate();
        let Some(pos) = self
            .order
            .iter()
            .position(|id| self.entries.get(*id).is_some_and(|e| e.node == node))
        else {
            return false;
        };
        let id = self.order.remove(pos);
        if let Some(entry) = self.entries.remove(id) {
            self.finish(entry);
        }
        true
    }

    /// Remove an entry by its handle.
    pub fn remove_entry(&mut self, id: OverlayId) -> Result<()> {
        let node = self
            .entries
            .get(id)
            .map(|e| e.node)
            .ok_or(Error::OverlayNotFound(id))?;
        if self.remove(node) {
            Ok(())
        } else {
            Err(Error::OverlayNotFound(id))
        }
    }

    /// Remove every entry. Callbacks fire from top to bottom after all
    /// entries are unlinked.
    pub fn close_all(&mut self) {
        self.validate();
        let order = mem::take(&mut self.order);
        let entries: Vec<OverlayEntry> = order
            .into_iter()
            .filter_map(|id| self.entries.remove(id))
            .collect();
        debug!(count = entries.len(), "closing all overlays");
        for entry in entries {
            self.finish(entry);
        }
    }

    /// Remove every entry of a kind. Returns how many were removed.
    pub fn close_kind(&mut self, kind: OverlayKind) -> usize {
        self.close_where(|e| e.kind == kind)
    }

    /// Remove every auto-closing entry. Returns how many were removed.
    pub fn close_auto(&mut self) -> usize {
        self.close_where(|e| e.auto_close)
    }

    /// Remove every entry matching a predicate, top to bottom.
    fn close_where(&mut self, pred: impl Fn(&OverlayEntry) -> bool) -> usize {
        self.validate();
        let nodes: Vec<NodeId> = self
            .iter()
            .filter(|e| pred(e))
            .map(|e| e.node)
            .collect();
        nodes.into_iter().filter(|n| self.remove(*n)).count()
    }

    /// Fire an unlinked entry's callback, then free its node.
    fn finish(&mut self, mut entry: OverlayEntry) {
        if let Some(cb) = entry.on_close.take()
            && let Some(node) = self.tree.node(entry.node)
        {
            cb(&OverlayClosed {
                id: entry.node,
                node,
                kind: entry.kind,
                priority: entry.priority,
            });
        }
        if self.tree.remove_subtree(entry.node).is_err() {
            warn!(node = ?entry.node, "overlay node already gone");
        }
        debug!(node = ?entry.node, kind = ?entry.kind, "overlay removed");
    }

    /// The top entry.
    pub fn top(&self) -> Option<&OverlayEntry> {
        self.order.first().and_then(|id| self.entries.get(*id))
    }

    /// Look up an entry by handle.
    pub fn entry(&self, id: OverlayId) -> Option<&OverlayEntry> {
        self.entries.get(id)
    }

    /// Is there an active entry for this node?
    pub fn contains(&self, node: NodeId) -> bool {
        self.iter().any(|e| e.node == node)
    }

    /// Entries from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayEntry> {
        self.order.iter().filter_map(|id| self.entries.get(*id))
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Is the stack empty?
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Does the point fall within any visible overlay?
    pub fn hit_test(&self, point: Point) -> bool {
        self.iter().any(|e| {
            self.tree
                .node(e.node)
                .is_some_and(|n| n.visible && n.rect.contains_point(point))
        })
    }

    /// Send a mouse event to every overlay, top first.
    pub fn broadcast_mouse(&mut self, event: &MouseEvent) -> bool {
        self.broadcast(EventKind::Mouse, |b, ctx| b.on_mouse(ctx, event))
    }

    /// Send a key event to every overlay, top first.
    pub fn broadcast_key(&mut self, event: &KeyEvent) -> bool {
        self.broadcast(EventKind::Key, |b, ctx| b.on_key(ctx, event))
    }

    /// Send a scroll event to every overlay, top first.
    pub fn broadcast_scroll(&mut self, event: &ScrollEvent) -> bool {
        self.broadcast(EventKind::Scroll, |b, ctx| b.on_scroll(ctx, event))
    }

    /// Dispatch to every overlay behavior. True if any overlay listens for
    /// this kind of event or handled it.
    ///
    /// Overlays that request a close are removed once every overlay has seen
    /// the event, and entries whose node a handler freed are dropped.
    fn broadcast(
        &mut self,
        kind: EventKind,
        mut f: impl FnMut(&mut dyn Behavior, &mut NodeContext<'_>) -> EventOutcome,
    ) -> bool {
        self.validate();
        let nodes: Vec<NodeId> = self.iter().map(|e| e.node).collect();
        let mut handled = false;
        let mut closing = Vec::new();
        for node in nodes {
            let out = self.tree.dispatch(node, |b, ctx| {
                let listening = b.listens(kind);
                f(b, ctx).is_handled() || listening
            });
            if let Some((hit, close)) = out {
                handled |= hit;
                if close {
                    closing.push(node);
                }
            }
        }
        for node in closing {
            self.remove(node);
        }
        self.validate();
        handled
    }

    /// Lay out every overlay subtree.
    pub fn resolve(&mut self, engine: &LayoutEngine) {
        self.validate();
        let nodes: Vec<NodeId> = self.iter().map(|e| e.node).collect();
        for node in nodes {
            engine.resolve(&mut self.tree, node);
        }
    }

    /// Append overlays bottom to top, so the top entry paints last.
    pub fn draw(&self, list: &mut DrawList) {
        for id in self.order.iter().rev() {
            if let Some(e) = self.entries.get(*id) {
                list.append_tree(&self.tree, e.node);
            }
        }
    }

    /// Check every entry against the arenas.
    ///
    /// Entries whose node was freed behind the stack's back are dropped
    /// without their callbacks. A stale entry handle means the stack itself
    /// is corrupt, and resets it. Returns false if a reset happened.
    fn validate(&mut self) -> bool {
        let orphans: Vec<OverlayId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.entries
                    .get(*id)
                    .is_some_and(|e| !self.tree.contains(e.node))
            })
            .collect();
        for id in orphans {
            if let Some(entry) = self.entries.remove(id) {
                warn!(
                    node = ?entry.node,
                    kind = ?entry.kind,
                    "overlay node freed outside the stack"
                );
            }
            self.order.retain(|o| *o != id);
        }

        let consistent = self.order.len() == self.entries.len()
            && self.order.iter().all(|id| self.entries.contains_key(*id));
        if !consistent {
            warn!(
                entries = self.entries.len(),
                order = self.order.len(),
                "overlay stack inconsistent, resetting"
            );
            self.order.clear();
            self.entries.clear();
            self.tree = Tree::new();
        }
        consistent
    }

    /// Push a stale handle onto the order.
    #[cfg(test)]
    pub(crate) fn corrupt(&mut self) {
        let node = self.tree.insert(Node::leaf());
        let stale = self
            .entries
            .insert(OverlayEntry::new(node, OverlayKind::Tooltip, 0));
        self.entries.remove(stale);
        self.order.push(stale);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::geom::Rect;

    fn add(stack: &mut OverlayStack, kind: OverlayKind, priority: i32) -> Result<NodeId> {
        let n = stack.create(Node::container());
        stack.add(OverlayEntry::new(n, kind, priority))?;
        Ok(n)
    }

    #[test]
    fn priority_order() -> Result<()> {
        let mut s = OverlayStack::new();
        let a = add(&mut s, OverlayKind::Menu, 1)?;
        let b = add(&mut s, OverlayKind::Dialog, 5)?;
        let c = add(&mut s, OverlayKind::Tooltip, 1)?;
        let order: Vec<NodeId> = s.iter().map(|e| e.node()).collect();
        assert_eq!(order, vec![b, c, a]);
        assert_eq!(s.top().map(|e| e.node()), Some(b));
        Ok(())
    }

    #[test]
    fn duplicate_add_rejected() -> Result<()> {
        let mut s = OverlayStack::new();
        let a = add(&mut s, OverlayKind::Menu, 1)?;
        let r = s.add(OverlayEntry::new(a, OverlayKind::Menu, 9));
        assert!(matches!(r, Err(Error::DuplicateOverlay(n)) if n == a));
        assert_eq!(s.len(), 1);
        assert_eq!(s.top().map(|e| e.priority()), Some(1));
        Ok(())
    }

    #[test]
    fn remove_fires_callback_before_free() -> Result<()> {
        let mut s = OverlayStack::new();
        let n = s.create(Node::leaf().named("menu"));
        let seen = Rc::new(RefCell::new(None));
        let seen2 = seen.clone();
        s.add(
            OverlayEntry::new(n, OverlayKind::Menu, 0)
                .on_close(move |c| *seen2.borrow_mut() = Some(c.node.name.clone())),
        )?;
        assert!(s.remove(n));
        assert_eq!(seen.borrow().as_deref(), Some("menu"));
        assert!(!s.tree().contains(n));
        assert!(!s.remove(n));
        Ok(())
    }

    #[test]
    fn corruption_resets() -> Result<()> {
        let mut s = OverlayStack::new();
        add(&mut s, OverlayKind::Menu, 0)?;
        s.corrupt();
        assert!(s.top().is_some());
        assert!(!s.broadcast_key(&'q'.into()));
        assert!(s.is_empty());
        assert!(s.tree().is_empty());
        Ok(())
    }

    #[test]
    fn hit_and_draw_order() -> Result<()> {
        let mut s = OverlayStack::new();
        let low = s.create(Node::leaf().with_rect(Rect::new(0, 0, 10, 10)));
        let high = s.create(Node::leaf().with_rect(Rect::new(20, 20, 10, 10)));
        s.add(OverlayEntry::new(low, OverlayKind::Tooltip, 0))?;
        s.add(OverlayEntry::new(high, OverlayKind::Dialog, 10))?;
        assert!(s.hit_test(Point::new(25, 25)));
        assert!(!s.hit_test(Point::new(15, 15)));
        let mut list = DrawList::new();
        s.draw(&mut list);
        assert_eq!(list.nodes(), vec![low, high]);
        Ok(())
    }

    /// Closes its own overlay on any press.
    #[derive(Clone)]
    struct Picker {
        /// Free the node directly instead of asking the stack.
        direct: bool,
    }

    impl Behavior for Picker {
        fn on_mouse(&mut self, ctx: &mut NodeContext<'_>, event: &MouseEvent) -> EventOutcome {
            if !event.is_press() {
                return EventOutcome::Ignore;
            }
            if self.direct {
                let id = ctx.id();
                if ctx.tree_mut().remove_subtree(id).is_err() {
                    return EventOutcome::Ignore;
                }
            } else {
                ctx.request_close();
            }
            EventOutcome::Handle
        }
    }

    /// Listens for mouse input without ever claiming it.
    #[derive(Clone)]
    struct Watcher;

    impl Behavior for Watcher {
        fn listens(&self, kind: EventKind) -> bool {
            kind == EventKind::Mouse
        }
    }

    fn tooltip_with_callback(s: &mut OverlayStack) -> Result<(NodeId, Rc<RefCell<u32>>)> {
        let fired = Rc::new(RefCell::new(0));
        let counter = fired.clone();
        let tip = s.create(Node::leaf());
        s.add(
            OverlayEntry::new(tip, OverlayKind::Tooltip, 1)
                .on_close(move |_| *counter.borrow_mut() += 1),
        )?;
        Ok((tip, fired))
    }

    #[test]
    fn overlay_closes_itself() -> Result<()> {
        let mut s = OverlayStack::new();
        let (tip, tip_closed) = tooltip_with_callback(&mut s)?;
        let menu_closed = Rc::new(RefCell::new(0));
        let counter = menu_closed.clone();
        let menu = s.create(Node::container().with_behavior(Picker { direct: false }));
        s.add(
            OverlayEntry::new(menu, OverlayKind::Menu, 5)
                .on_close(move |_| *counter.borrow_mut() += 1),
        )?;

        assert!(s.broadcast_mouse(&MouseEvent::press(1, 1)));
        assert_eq!(*menu_closed.borrow(), 1);
        assert!(!s.tree().contains(menu));
        assert_eq!(s.top().map(|e| e.node()), Some(tip));
        assert_eq!(*tip_closed.borrow(), 0);

        s.close_all();
        assert_eq!(*tip_closed.borrow(), 1);
        assert_eq!(*menu_closed.borrow(), 1);
        Ok(())
    }

    #[test]
    fn freed_node_drops_only_its_entry() -> Result<()> {
        let mut s = OverlayStack::new();
        let (tip, tip_closed) = tooltip_with_callback(&mut s)?;
        let menu = s.create(Node::container().with_behavior(Picker { direct: true }));
        s.add(OverlayEntry::new(menu, OverlayKind::Menu, 5))?;

        assert!(s.broadcast_mouse(&MouseEvent::press(1, 1)));
        assert_eq!(s.top().map(|e| e.node()), Some(tip));
        assert_eq!(s.len(), 1);
        assert!(s.tree().contains(tip));

        s.close_all();
        assert_eq!(*tip_closed.borrow(), 1);
        assert!(s.tree().is_empty());
        Ok(())
    }

    #[test]
    fn listening_counts_as_handled() -> Result<()> {
        let mut s = OverlayStack::new();
        let n = s.create(Node::container().with_behavior(Watcher));
        s.add(OverlayEntry::new(n, OverlayKind::Menu, 0))?;
        assert!(s.broadcast_mouse(&MouseEvent::press(3, 3)));
        assert!(!s.broadcast_key(&'k'.into()));
        Ok(())
    }

    #[test]
    fn close_by_kind_and_auto() -> Result<()> {
        let mut s = OverlayStack::new();
        add(&mut s, OverlayKind::Menu, 0)?;
        add(&mut s, OverlayKind::Menu, 2)?;
        let d = s.create(Node::leaf());
        s.add(OverlayEntry::new(d, OverlayKind::Dialog, 1).auto_close(false))?;
        add(&mut s, OverlayKind::Tooltip, 0)?;
        assert_eq!(s.close_kind(OverlayKind::Menu), 2);
        assert_eq!(s.close_auto(), 1);
        assert_eq!(s.len(), 1);
        assert_eq!(s.top().map(|e| e.node()), Some(d));
        Ok(())
    }
}
