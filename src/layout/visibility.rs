//! The visibility gate.
//!
//! A node hides when declared invisible or when the viewport falls below its
//! declared minimum window extents. Hiding stashes the computed display mode
//! on the node so a later show restores exactly what the host had computed;
//! the presence of the stash is itself the hidden marker, so the gate is
//! idempotent in both directions.

use crate::attr::config::NodeConfig;
use crate::geometry::Size;
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Decide visibility from the attribute record and the current viewport.
pub fn evaluate(config: &NodeConfig, viewport: Size) -> Visibility {
    if config.declared_hidden() {
        return Visibility::Hidden;
    }
    if let Some(min_w) = config.min_window_width.as_ref().and_then(|v| v.as_px()) {
        if viewport.width < min_w {
            return Visibility::Hidden;
        }
    }
    if let Some(min_h) = config.min_window_height.as_ref().and_then(|v| v.as_px()) {
        if viewport.height < min_h {
            return Visibility::Hidden;
        }
    }
    Visibility::Visible
}

/// Evaluate and enforce the gate for one node.
///
/// On hide, the host's computed display is cached once; on show, the cache
/// is drained back into the surface. An empty cached value clears the
/// property instead.
pub fn apply_gate(tree: &mut Tree, surface: &mut dyn Surface, node: NodeId) -> Visibility {
    let Some(data) = tree.get(node) else {
        return Visibility::Hidden;
    };
    let verdict = evaluate(&data.config, surface.viewport());
    match verdict {
        Visibility::Hidden => {
            if data.cached_display.is_none() {
                let current = surface.computed_display(node);
                if let Some(data) = tree.get_mut(node) {
                    data.cached_display = Some(current);
                }
            }
            surface.set(node, Prop::Display, "none");
        }
        Visibility::Visible => {
            let cached = tree.get_mut(node).and_then(|data| data.cached_display.take());
            if let Some(display) = cached {
                if display.is_empty() || display == "none" {
                    surface.clear(node, Prop::Display);
                } else {
                    surface.set(node, Prop::Display, &display);
                }
            }
        }
    }
    verdict
}

// ===========================================================================
// Tests
// ===========================================================================
