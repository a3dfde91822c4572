//! Layout: geometry resolution, the visibility gate, and the container
//! strategies.
//!
//! A container strategy is a pure function over the tree and the surface: it
//! reads the container's configuration and its children's, then patches
//! style onto the surface. Strategies share the box/visibility preamble
//! here; what differs is how each positions children.

pub mod bound;
pub mod free;
pub mod linear;
pub mod resolve;
pub mod visibility;

use crate::attr::config::{FocusMode, NodeConfig, ScrollMode};
use crate::attr::value::Value;
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;
use crate::tree::Tree;

/// Apply a node's focus mode to the surface.
pub(crate) fn apply_focus_mode(surface: &mut dyn Surface, node: NodeId, config: &NodeConfig) {
    match config.focus_mode {
        Some(FocusMode::None) => {
            surface.set(node, Prop::UserSelect, "none");
            surface.clear(node, Prop::Cursor);
        }
        Some(FocusMode::Select) => {
            surface.set(node, Prop::UserSelect, "text");
            surface.set(node, Prop::Cursor, "text");
        }
        Some(FocusMode::Button) => {
            surface.clear(node, Prop::UserSelect);
            surface.set(node, Prop::Cursor, "pointer");
        }
        None => {}
    }
}

/// Apply a container's scroll mode. Absent or `none` pins both axes.
pub(crate) fn apply_scroll(surface: &mut dyn Surface, node: NodeId, config: &NodeConfig) {
    let (x, y) = match config.scroll {
        Some(ScrollMode::Vertical) => ("hidden", "auto"),
        Some(ScrollMode::Horizontal) => ("auto", "hidden"),
        Some(ScrollMode::Both) => ("auto", "auto"),
        Some(ScrollMode::None) | None => ("hidden", "hidden"),
    };
    surface.set(node, Prop::OverflowX, x);
    surface.set(node, Prop::OverflowY, y);
}

/// Grow an auto-sized container to the largest measured child extent.
///
/// Only axes declared `auto` are touched; explicit and percentage extents
/// stay with the host.
pub(crate) fn autosize_to_children(
    tree: &Tree,
    surface: &mut dyn Surface,
    container: NodeId,
    config: &NodeConfig,
) {
    let auto_w = matches!(config.width, Some(Value::Auto));
    let auto_h = matches!(config.height, Some(Value::Auto));
    if !auto_w && !auto_h {
        return;
    }

    let mut max_w: f32 = 0.0;
    let mut max_h: f32 = 0.0;
    for &child in tree.children(container) {
        let measured = surface.measured(child);
        max_w = max_w.max(measured.width);
        max_h = max_h.max(measured.height);
    }

    if auto_w {
        surface.set(container, Prop::Width, &Value::Px(max_w).to_string());
    }
    if auto_h {
        surface.set(container, Prop::Height, &Value::Px(max_h).to_string());
    }
}

/// Per-child preamble shared by every strategy: resolved box, visibility
/// gate, focus mode. Returns the children that remain visible.
pub(crate) fn prepare_children(
    tree: &mut Tree,
    surface: &mut dyn Surface,
    container: NodeId,
) -> Vec<NodeId> {
    let children: Vec<NodeId> = tree.children(container).to_vec();
    let mut visible = Vec::with_capacity(children.len());
    for child in children {
        let config = match tree.get(child) {
            Some(data) => data.config.clone(),
            None => continue,
        };
        resolve::resolve(&config).apply_to(surface, child);
        apply_focus_mode(surface, child, &config);
        if visibility::apply_gate(tree, surface, child) == visibility::Visibility::Visible {
            visible.push(child);
        }
    }
    visible
}
