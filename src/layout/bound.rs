//! The bound container strategy: children fill the parent exactly.
//!
//! Used for layered content (the modal stack, external content hosts, and
//! plain binding wrappers): every child is pinned to the parent's origin at
//! the parent's full extent with margins zeroed, so layers stack without
//! affecting each other's geometry.

use crate::layout::{autosize_to_children, prepare_children};
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;
use crate::tree::Tree;

/// Run the bound strategy for `container`.
pub fn layout(tree: &mut Tree, surface: &mut dyn Surface, container: NodeId) {
    surface.set(container, Prop::OverflowX, "hidden");
    surface.set(container, Prop::OverflowY, "hidden");

    let config = match tree.get(container) {
        Some(data) => data.config.clone(),
        None => return,
    };

    for child in prepare_children(tree, surface, container) {
        surface.set(child, Prop::Position, "absolute");
        surface.set(child, Prop::Top, "0");
        surface.set(child, Prop::Left, "0");
        surface.set(child, Prop::Width, "100%");
        surface.set(child, Prop::Height, "100%");
        surface.set(child, Prop::MarginTop, "0");
        surface.set(child, Prop::MarginRight, "0");
        surface.set(child, Prop::MarginBottom, "0");
        surface.set(child, Prop::MarginLeft, "0");
    }

    autosize_to_children(tree, surface, container, &config);
}

// ===========================================================================
// Tests
// ===========================================================================
