//! Trellis: layout resolution and overlay management for UI node trees.
//!
//! Trellis positions and sizes a tree of UI nodes and arbitrates which
//! transient floating surfaces (dropdowns, menus, dialogs, tooltips) are
//! active and in what order.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Tree`] - The node arena
//! - [`LayoutEngine`] - Resolves geometry for a subtree
//! - [`OverlayStack`] - Priority-ordered floating surfaces
//! - [`Scene`] - Routes input across a tree and its overlays
//! - [`Behavior`] - The trait implemented by node capabilities
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse, Edges)
//! - [`layout`] - Flex, list, grid and scroll handling

#![warn(missing_docs)]

/// Node capabilities and callback context.
pub mod behavior;
/// Engine-wide constants.
pub mod config;
/// List data sources and placeholder substitution.
pub mod data;
/// Error types.
pub mod error;
/// Input events.
pub mod event;
/// Node and overlay handles.
mod id;
pub mod layout;
/// Node data.
pub mod node;
/// Floating surfaces.
pub mod overlay;
/// Named handlers.
pub mod registry;
/// Draw-order traversal.
pub mod render;
/// Input routing.
pub mod scene;
/// Layout style.
pub mod style;
/// The node arena.
pub mod tree;

pub use trellis_geom as geom;

pub use behavior::{Behavior, EventOutcome, NodeContext};
pub use config::LayoutConfig;
pub use data::{DataSource, Record};
pub use error::{Error, Result};
pub use event::EventKind;
pub use id::{NodeId, OverlayId};
pub use layout::LayoutEngine;
pub use node::{Node, NodeKind, ScrollMode, SizeHints};
pub use overlay::{OverlayClosed, OverlayEntry, OverlayKind, OverlayStack};
pub use registry::Registry;
pub use render::{DrawCmd, DrawList};
pub use scene::{Action, Scene};
pub use style::{Align, LayoutStyle, Mode};
pub use tree::Tree;
