use std::{
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    behavior::Behavior,
    data::DataSource,
    geom::{Axis, Expanse, Point, Rect},
    id::NodeId,
    style::LayoutStyle,
};

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Lays out the children it was given.
    #[default]
    Container,
    /// Regenerates its children from a template and bound data.
    List,
    /// Places its children in uniform cells.
    Grid,
    /// Has no children of its own.
    Leaf,
}

/// Which axes of a node scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollMode {
    /// Not scrollable.
    #[default]
    None,
    /// Scrolls along y.
    Vertical,
    /// Scrolls along x.
    Horizontal,
    /// Scrolls along both axes.
    Both,
}

impl ScrollMode {
    /// Does this mode scroll along the given axis?
    pub fn scrolls(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Self::Both, _)
                | (Self::Vertical, Axis::Vertical)
                | (Self::Horizontal, Axis::Horizontal)
        )
    }
}

/// Sizing hints consulted by the parent's layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHints {
    /// Proportional share of the parent's free main-axis space. Zero or
    /// negative means "not flexible".
    pub flex: f32,
    /// Fixed width, used when positive.
    pub fixed_width: i32,
    /// Fixed height, used when positive.
    pub fixed_height: i32,
}

impl SizeHints {
    /// Is this node flexible?
    pub fn is_flex(&self) -> bool {
        self.flex > 0.0
    }

    /// The fixed extent along an axis, if set.
    pub fn fixed(&self, axis: Axis) -> Option<i32> {
        let v = match axis {
            Axis::Horizontal => self.fixed_width,
            Axis::Vertical => self.fixed_height,
        };
        (v > 0).then_some(v)
    }
}

/// Core node data stored in the [`Tree`](crate::Tree) arena.
///
/// Nodes are built with the constructor helpers and the `with_*` methods,
/// then handed to [`Tree::insert`](crate::Tree::insert). Structural fields
/// (children, template, overlay root) are only reachable through the tree,
/// which keeps ownership consistent.
#[derive(Default)]
pub struct Node {
    /// Loader-assigned name, used for diagnostics and lookup.
    pub name: String,
    /// Structural role.
    pub kind: NodeKind,
    /// Outer rectangle in screen coordinates.
    pub rect: Rect,
    /// Accumulated extent of the children plus padding and spacing.
    pub content: Expanse,
    /// Scroll offset. Never clamped by layout.
    pub scroll: Point,
    /// Axes along which the scroll offset applies.
    pub scroll_mode: ScrollMode,
    /// Layout configuration. `None` means children are not positioned.
    pub style: Option<LayoutStyle>,
    /// Sizing hints for the parent's pass.
    pub hints: SizeHints,
    /// Display text. List items substitute `${key}` placeholders here.
    pub text: String,
    /// Hidden nodes are skipped by layout, hit testing and drawing.
    pub visible: bool,
    /// Registry action fired when the node is clicked.
    pub on_click: Option<String>,
    /// Registry action fired after the node scrolls.
    pub on_scroll: Option<String>,

    /// Parent in the tree, for nodes attached as children.
    pub(crate) parent: Option<NodeId>,
    /// Children in layout order.
    pub(crate) children: Vec<NodeId>,
    /// Prototype subtree for list items.
    pub(crate) template: Option<NodeId>,
    /// Independently laid out secondary subtree.
    pub(crate) overlay_root: Option<NodeId>,
    /// Bound list data, owned elsewhere.
    pub(crate) data: Option<Weak<DataSource>>,
    /// Capability object.
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

impl Node {
    /// A node of the given kind, visible, with everything else defaulted.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            visible: true,
            ..Default::default()
        }
    }

    /// A container node.
    pub fn container() -> Self {
        Self::new(NodeKind::Container)
    }

    /// A leaf node.
    pub fn leaf() -> Self {
        Self::new(NodeKind::Leaf)
    }

    /// A list node. Bind a template and data through the tree.
    pub fn list() -> Self {
        Self::new(NodeKind::List)
    }

    /// A grid node with the given column count.
    pub fn grid(columns: i32) -> Self {
        Self::new(NodeKind::Grid).with_style(LayoutStyle::grid(columns))
    }

    /// Set the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the rectangle.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Set the layout style.
    pub fn with_style(mut self, style: LayoutStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the flex ratio.
    pub fn flex(mut self, flex: f32) -> Self {
        self.hints.flex = flex;
        self
    }

    /// Set a fixed width.
    pub fn fixed_width(mut self, w: i32) -> Self {
        self.hints.fixed_width = w;
        self
    }

    /// Set a fixed height.
    pub fn fixed_height(mut self, h: i32) -> Self {
        self.hints.fixed_height = h;
        self
    }

    /// Set the display text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Make the node scrollable.
    pub fn scrollable(mut self, mode: ScrollMode) -> Self {
        self.scroll_mode = mode;
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attach a behavior.
    pub fn with_behavior(mut self, behavior: impl Into<Box<dyn Behavior>>) -> Self {
        self.behavior = Some(behavior.into());
        self
    }

    /// Bind a click action name.
    pub fn on_click(mut self, action: impl Into<String>) -> Self {
        self.on_click = Some(action.into());
        self
    }

    /// Bind a scroll action name.
    pub fn on_scroll(mut self, action: impl Into<String>) -> Self {
        self.on_scroll = Some(action.into());
        self
    }

    /// Bind list data. Only a weak reference is kept; dropping the source
    /// empties the list on its next layout pass.
    pub fn bind(mut self, data: &Rc<DataSource>) -> Self {
        self.data = Some(Rc::downgrade(data));
        self
    }

    /// Parent in the tree, if attached as a child.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in layout order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// List item template, if any.
    pub fn template(&self) -> Option<NodeId> {
        self.template
    }

    /// Secondary subtree laid out outside normal flow.
    pub fn overlay_root(&self) -> Option<NodeId> {
        self.overlay_root
    }

    /// The bound data source, if it is still alive.
    pub fn data(&self) -> Option<Rc<DataSource>> {
        self.data.as_ref().and_then(Weak::upgrade)
    }

    /// Does this node carry a behavior?
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Does the behavior accept keyboard focus?
    pub fn accepts_focus(&self) -> bool {
        self.behavior.as_ref().is_some_and(|b| b.accept_focus())
    }

    /// The box inside the padding.
    pub fn content_box(&self) -> Rect {
        match &self.style {
            Some(style) => self.rect.inset(style.safe_padding()),
            None => self.rect,
        }
    }

    /// The scroll offset along an axis, or zero if the node does not scroll
    /// along it.
    pub fn scroll_bias(&self, axis: Axis) -> i32 {
        if self.scroll_mode.scrolls(axis) {
            self.scroll.along(axis)
        } else {
            0
        }
    }

    /// Copy every non-structural field. Structure is rebuilt by the tree.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            rect: self.rect,
            content: self.content,
            scroll: self.scroll,
            scroll_mode: self.scroll_mode,
            style: self.style,
            hints: self.hints,
            text: self.text.clone(),
            visible: self.visible,
            on_click: self.on_click.clone(),
            on_scroll: self.on_scroll.clone(),
            parent: None,
            children: Vec::new(),
            template: None,
            overlay_root: None,
            data: self.data.clone(),
            behavior: self.behavior.clone(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("rect", &self.rect)
            .field("content", &self.content)
            .field("scroll", &self.scroll)
            .field("visible", &self.visible)
            .field("children", &self.children.len())
            .field("behavior", &self.behavior.as_ref().map(|b| b.name()))
            .finish()
    }
}
