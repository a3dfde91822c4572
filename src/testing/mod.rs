//! In-memory surface for exercising the engine headless.
//!
//! [`TestSurface`] records every style write per node and lets tests script
//! what the host would have measured or computed. `dump` renders a node's
//! style block sorted by property name, which keeps snapshot assertions
//! stable.

use std::collections::{BTreeMap, HashMap};

use crate::geometry::{Edges, Size};
use crate::surface::{Prop, Surface};
use crate::tree::node::NodeId;

/// Scriptable in-memory [`Surface`].
#[derive(Debug, Default)]
pub struct TestSurface {
    viewport: Size,
    styles: HashMap<NodeId, BTreeMap<&'static str, String>>,
    measured: HashMap<NodeId, Size>,
    display: HashMap<NodeId, String>,
    position: HashMap<NodeId, String>,
    margins: HashMap<NodeId, Edges>,
    markup: HashMap<NodeId, String>,
    content: HashMap<NodeId, Option<String>>,
}

impl TestSurface {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        TestSurface {
            viewport: Size::new(viewport_width, viewport_height),
            ..Default::default()
        }
    }

    // ── Scripting the host side ──────────────────────────────────────

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    pub fn set_measured(&mut self, node: NodeId, size: Size) {
        self.measured.insert(node, size);
    }

    pub fn set_computed_display(&mut self, node: NodeId, display: &str) {
        self.display.insert(node, display.to_owned());
    }

    pub fn set_computed_position(&mut self, node: NodeId, position: &str) {
        self.position.insert(node, position.to_owned());
    }

    pub fn set_computed_margin(&mut self, node: NodeId, margin: Edges) {
        self.margins.insert(node, margin);
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The inline style the engine wrote for one property, if any.
    pub fn style(&self, node: NodeId, prop: Prop) -> Option<&str> {
        self.styles
            .get(&node)
            .and_then(|block| block.get(prop.name()))
            .map(String::as_str)
    }

    /// Render a node's style block as sorted `prop: value` lines.
    pub fn dump(&self, node: NodeId) -> String {
        let Some(block) = self.styles.get(&node) else {
            return String::new();
        };
        let mut out = String::new();
        for (name, value) in block {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// The markup last written to a node, if any.
    pub fn markup(&self, node: NodeId) -> Option<&str> {
        self.markup.get(&node).map(String::as_str)
    }

    /// The content source last loaded into a node. Outer `None` means no
    /// load happened; inner `None` means the node was detached.
    pub fn loaded_src(&self, node: NodeId) -> Option<Option<&str>> {
        self.content.get(&node).map(|src| src.as_deref())
    }
}

impl Surface for TestSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measured(&self, node: NodeId) -> Size {
        self.measured.get(&node).copied().unwrap_or(Size::ZERO)
    }

    fn computed_display(&self, node: NodeId) -> String {
        if let Some(display) = self.display.get(&node) {
            return display.clone();
        }
        self.style(node, Prop::Display)
            .map(str::to_owned)
            .unwrap_or_else(|| "block".to_owned())
    }

    fn computed_position(&self, node: NodeId) -> String {
        if let Some(position) = self.position.get(&node) {
            return position.clone();
        }
        self.style(node, Prop::Position)
            .map(str::to_owned)
            .unwrap_or_else(|| "static".to_owned())
    }

    fn computed_margin(&self, node: NodeId) -> Edges {
        self.margins.get(&node).copied().unwrap_or(Edges::ZERO)
    }

    fn set(&mut self, node: NodeId, prop: Prop, value: &str) {
        self.styles
            .entry(node)
            .or_default()
            .insert(prop.name(), value.to_owned());
    }

    fn clear(&mut self, node: NodeId, prop: Prop) {
        if let Some(block) = self.styles.get_mut(&node) {
            block.remove(prop.name());
        }
    }

    fn set_markup(&mut self, node: NodeId, markup: &str) {
        self.markup.insert(node, markup.to_owned());
    }

    fn load_content(&mut self, node: NodeId, src: Option<&str>) {
        self.content.insert(node, src.map(str::to_owned));
    }
}

// ===========================================================================
// Tests
// ===========================================================================
