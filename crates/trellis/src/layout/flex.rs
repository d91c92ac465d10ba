//! Horizontal and vertical distribution.

use tracing::trace;

use crate::{
    config::LayoutConfig,
    geom::{Axis, Expanse, Rect},
    id::NodeId,
    node::SizeHints,
    style::Align,
    tree::Tree,
};

/// How a child's main-axis extent is decided.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sizing {
    /// Share of the free space.
    Flex(f32),
    /// Fixed extent.
    Fixed(i32),
    /// Neither; the axis default applies.
    Auto,
}

impl Sizing {
    /// Classify a child along an axis.
    fn of(hints: &SizeHints, axis: Axis) -> Self {
        if hints.is_flex() {
            Self::Flex(hints.flex)
        } else if let Some(v) = hints.fixed(axis) {
            Self::Fixed(v)
        } else {
            Self::Auto
        }
    }
}

/// Split `available` across flex ratios.
///
/// Each share is `available * ratio / total` rounded down; the leftover units
/// go to the largest fractional remainders, earlier children first on ties,
/// so the shares sum to exactly `available`. When nothing is available the
/// shares are truncated toward zero instead.
pub fn allocate_flex_shares(available: i32, ratios: &[f32]) -> Vec<i32> {
    let total: f64 = ratios.iter().map(|r| f64::from(r.max(0.0))).sum();
    if ratios.is_empty() || total <= 0.0 {
        return vec![0; ratios.len()];
    }
    if available <= 0 {
        return ratios
            .iter()
            .map(|r| (f64::from(available) * f64::from(r.max(0.0)) / total) as i32)
            .collect();
    }

    let mut base = Vec::with_capacity(ratios.len());
    let mut rem = Vec::with_capacity(ratios.len());
    for r in ratios {
        let exact = f64::from(available) * f64::from(r.max(0.0)) / total;
        let floor = exact.floor();
        base.push(floor as i32);
        rem.push(exact - floor);
    }

    let used: i32 = base.iter().sum();
    let extra = (available - used).max(0) as usize;
    if extra == 0 {
        return base;
    }

    let mut idx: Vec<usize> = (0..ratios.len()).collect();
    idx.sort_by(|a, b| rem[*b].total_cmp(&rem[*a]).then_with(|| a.cmp(b)));
    for target in idx.into_iter().cycle().take(extra) {
        base[target] += 1;
    }
    base
}

/// A visible child with what the pass needs to know about it.
struct Item {
    /// Child handle.
    id: NodeId,
    /// Main-axis sizing.
    sizing: Sizing,
    /// Fixed cross-axis extent, if any.
    cross: Option<i32>,
    /// Alignment override from the child's own style.
    align: Option<Align>,
}

/// Distribute the visible children of `id` along `axis`.
pub fn arrange(tree: &mut Tree, id: NodeId, axis: Axis, config: &LayoutConfig) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let Some(style) = node.style else {
        return;
    };
    let cross_axis = axis.cross();
    let pad = style.safe_padding();
    let spacing = style.safe_spacing();
    let content = node.content_box();
    let main_bias = node.scroll_bias(axis);
    let cross_bias = node.scroll_bias(cross_axis);
    let rect = node.rect;

    let items: Vec<Item> = node
        .children()
        .iter()
        .filter_map(|c| tree.node(*c).filter(|n| n.visible).map(|n| (*c, n)))
        .map(|(c, n)| Item {
            id: c,
            sizing: Sizing::of(&n.hints, axis),
            cross: n.hints.fixed(cross_axis),
            align: n.style.and_then(|s| s.mode.align_override()),
        })
        .collect();

    if items.is_empty() {
        if let Some(node) = tree.node_mut(id) {
            node.content = rect.expanse();
        }
        return;
    }

    let n = i32::try_from(items.len()).unwrap_or(i32::MAX);
    let gaps = spacing.saturating_mul(n - 1);
    let ratios: Vec<f32> = items
        .iter()
        .filter_map(|i| match i.sizing {
            Sizing::Flex(r) => Some(r),
            _ => None,
        })
        .collect();
    let any_flex = !ratios.is_empty();
    let auto_count = items.iter().filter(|i| i.sizing == Sizing::Auto).count();
    let auto_count = i32::try_from(auto_count).unwrap_or(i32::MAX);

    // Vertical auto children only claim a default extent when they compete
    // with flexible siblings; otherwise they split the free space.
    let auto_default = match axis {
        Axis::Horizontal => Some(config.default_width),
        Axis::Vertical if any_flex => Some(config.default_height),
        Axis::Vertical => None,
    };

    let fixed_sum: i32 = items
        .iter()
        .map(|i| match i.sizing {
            Sizing::Fixed(v) => v,
            Sizing::Auto => auto_default.unwrap_or(0),
            Sizing::Flex(_) => 0,
        })
        .fold(0, i32::saturating_add);
    let available = content
        .extent(axis)
        .saturating_sub(fixed_sum)
        .saturating_sub(gaps);
    let auto_extent = match auto_default {
        Some(v) => v,
        None if auto_count > 0 => available / auto_count,
        None => 0,
    };
    let mut shares = allocate_flex_shares(available, &ratios).into_iter();

    let align = style.align;
    let cross_start = content.start(cross_axis).saturating_sub(cross_bias);
    let cross_room = content.extent(cross_axis);
    let mut cursor = content.start(axis).saturating_sub(main_bias);
    let mut main_total: i32 = 0;
    let mut cross_max = 0;

    for item in &items {
        let extent = match item.sizing {
            Sizing::Flex(_) => shares.next().unwrap_or(0),
            Sizing::Fixed(v) => v,
            Sizing::Auto => auto_extent,
        };
        let cross_extent = item.cross.unwrap_or(cross_room);
        let slack = cross_room.saturating_sub(cross_extent);
        let cross_pos = match axis {
            Axis::Horizontal => cross_start,
            Axis::Vertical => match item.align.unwrap_or(align) {
                Align::Left => cross_start,
                Align::Center => cross_start.saturating_add(slack / 2),
                Align::Right => cross_start.saturating_add(slack),
            },
        };

        let mut r = Rect::default();
        r.set_start(axis, cursor);
        r.set_extent(axis, extent);
        r.set_start(cross_axis, cross_pos);
        r.set_extent(cross_axis, cross_extent);
        if let Some(child) = tree.node_mut(item.id) {
            child.rect = r;
        }
        trace!(parent = ?id, child = ?item.id, rect = ?r, "placed");

        cursor = cursor.saturating_add(extent).saturating_add(spacing);
        main_total = main_total.saturating_add(extent);
        cross_max = cross_max.max(cross_extent);
    }

    if let Some(node) = tree.node_mut(id) {
        node.content = Expanse::from_main_cross(
            axis,
            main_total.saturating_add(gaps).saturating_add(pad.along(axis)),
            cross_max.saturating_add(pad.along(cross_axis)),
        );
    }
}
