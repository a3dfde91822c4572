//! The engine: attribute dispatch, structural invalidation, and the timer
//! pump.
//!
//! Every mutation funnels through here. Attribute writes update the typed
//! config and apply exactly the style consequences that attribute has;
//! structural changes invalidate the containers they disturb. Each container
//! carries a single-pass guard so re-entrant triggers raised while its
//! strategy runs are dropped rather than recursed into.

use std::time::Instant;

use thiserror::Error;

use crate::attr::key::AttrKey;
use crate::layout::{self, resolve, visibility};
use crate::modal::{self, ModalContent, ModalOptions, TimerQueue};
use crate::surface::{Prop, Surface};
use crate::tree::node::{NodeData, NodeId, NodeKind};
use crate::tree::Tree;

/// Errors surfaced by engine operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("node not found in the layout tree")]
    NodeNotFound,
    #[error("node is not a modal container")]
    NotAModalContainer,
    #[error("no node with element id `{0}`")]
    UnknownElementId(String),
}

/// The layout engine. Owns the tree and the deferred-step queue; borrows
/// the surface per call so hosts keep ownership of their rendering layer.
#[derive(Debug, Default)]
pub struct Engine {
    tree: Tree,
    timers: TimerQueue,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    // ── Structure ────────────────────────────────────────────────────

    /// Insert a detached node and make it the tree root.
    pub fn insert_root(&mut self, data: NodeData) -> NodeId {
        let id = self.tree.insert(data);
        self.tree.set_root(id);
        id
    }

    /// Insert a node under `parent` and relayout the disturbed containers.
    pub fn insert_child(
        &mut self,
        surface: &mut dyn Surface,
        parent: NodeId,
        data: NodeData,
    ) -> Result<NodeId, EngineError> {
        if !self.tree.contains(parent) {
            return Err(EngineError::NodeNotFound);
        }
        let id = self.tree.insert_child(parent, data);
        self.on_structural_change(surface, id);
        Ok(id)
    }

    /// Remove a subtree and relayout the container it came out of.
    pub fn remove(&mut self, surface: &mut dyn Surface, node: NodeId) -> Result<(), EngineError> {
        if !self.tree.contains(node) {
            return Err(EngineError::NodeNotFound);
        }
        let parent = self.tree.parent(node);
        self.tree.remove(node);
        if let Some(parent) = parent {
            self.request_layout(surface, parent);
        }
        Ok(())
    }

    /// Find a node by its markup element id.
    pub fn node_by_id(&self, element_id: &str) -> Result<NodeId, EngineError> {
        self.tree
            .node_by_element_id(element_id)
            .ok_or_else(|| EngineError::UnknownElementId(element_id.to_owned()))
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Apply one attribute write (or removal, for `None`) and its style
    /// consequences.
    pub fn set_attr(
        &mut self,
        surface: &mut dyn Surface,
        node: NodeId,
        key: AttrKey,
        value: Option<&str>,
    ) -> Result<(), EngineError> {
        let config = self
            .tree
            .get(node)
            .ok_or(EngineError::NodeNotFound)?
            .config
            .apply(key, value);
        if let Some(data) = self.tree.get_mut(node) {
            data.config = config.clone();
        }

        use AttrKey::*;
        match key {
            Background => match &config.background {
                Some(color) => surface.set(node, Prop::BackgroundColor, color),
                None => surface.clear(node, Prop::BackgroundColor),
            },
            Elevation => {
                if config.elevation == Some(true) {
                    surface.set(node, Prop::BoxShadow, resolve::ELEVATION_SHADOW);
                } else {
                    surface.clear(node, Prop::BoxShadow);
                }
            }
            FocusMode => layout::apply_focus_mode(surface, node, &config),

            Visible | MinWindowWidth | MinWindowHeight => {
                visibility::apply_gate(&mut self.tree, surface, node);
                self.invalidate_enclosing(surface, node);
            }

            Orientation | Gravity | GravityHorizontal | GravityVertical | AutoWrap => {
                self.request_layout(surface, node);
            }
            Scroll => layout::apply_scroll(surface, node, &config),
            Sticky => {
                if let Some(parent) = self.tree.parent(node) {
                    self.request_layout(surface, parent);
                }
            }

            Src => surface.load_content(node, value),

            // Modal configuration only matters the next time the stack is
            // driven; nothing to patch now.
            ModalCorner | ModalBackground | ModalElevation | BackdropMode
            | TransitionDuration => {}

            // Everything else is box geometry.
            _ => {
                resolve::resolve(&config).apply_to(surface, node);
                if let Some(parent) = self.tree.parent(node) {
                    self.request_layout(surface, parent);
                }
            }
        }
        Ok(())
    }

    /// Remove one attribute and roll back its style consequences.
    pub fn remove_attr(
        &mut self,
        surface: &mut dyn Surface,
        node: NodeId,
        key: AttrKey,
    ) -> Result<(), EngineError> {
        self.set_attr(surface, node, key, None)
    }

    /// Attach a click handler to a node.
    pub fn set_on_click(
        &mut self,
        node: NodeId,
        callback: impl Fn() + 'static,
    ) -> Result<(), EngineError> {
        let data = self.tree.get_mut(node).ok_or(EngineError::NodeNotFound)?;
        data.on_click = Some(crate::tree::node::Callback::new(callback));
        Ok(())
    }

    // ── Invalidation ─────────────────────────────────────────────────

    /// Run the layout strategy for one container, unless a pass for it is
    /// already on the stack.
    pub fn request_layout(&mut self, surface: &mut dyn Surface, node: NodeId) {
        let Some(data) = self.tree.get(node) else { return };
        if data.layout_running {
            return;
        }
        let kind = data.kind();
        if !kind.is_container() {
            return;
        }
        if let Some(data) = self.tree.get_mut(node) {
            data.layout_running = true;
        }
        match kind {
            NodeKind::Linear => layout::linear::layout(&mut self.tree, surface, node),
            NodeKind::Free => layout::free::layout(&mut self.tree, surface, node),
            NodeKind::Bound | NodeKind::Modal | NodeKind::Content => {
                layout::bound::layout(&mut self.tree, surface, node)
            }
            NodeKind::View => {}
        }
        if let Some(data) = self.tree.get_mut(node) {
            data.layout_running = false;
        }
    }

    fn invalidate_enclosing(&mut self, surface: &mut dyn Surface, node: NodeId) {
        if self.tree.get(node).map(|d| d.is_container()).unwrap_or(false) {
            self.request_layout(surface, node);
        }
        let ancestors: Vec<NodeId> = self.tree.ancestors(node).collect();
        for ancestor in ancestors {
            let container = self
                .tree
                .get(ancestor)
                .map(|d| d.is_container())
                .unwrap_or(false);
            if container {
                self.request_layout(surface, ancestor);
                break;
            }
        }
    }

    /// A node was inserted, removed, or moved.
    pub fn on_structural_change(&mut self, surface: &mut dyn Surface, node: NodeId) {
        self.invalidate_enclosing(surface, node);
    }

    /// The host re-measured a node to a different size.
    pub fn on_measured_size_change(&mut self, surface: &mut dyn Surface, node: NodeId) {
        self.invalidate_enclosing(surface, node);
    }

    /// The viewport changed; every container re-runs its strategy.
    pub fn on_viewport_resize(&mut self, surface: &mut dyn Surface) {
        let containers: Vec<NodeId> = self
            .tree
            .iter_ids()
            .filter(|&id| self.tree.get(id).map(|d| d.is_container()).unwrap_or(false))
            .collect();
        for container in containers {
            self.request_layout(surface, container);
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Deliver a click to a node. Cancelable modal backdrops dismiss their
    /// own entry; everything else runs the node's handler, if any.
    pub fn click(
        &mut self,
        surface: &mut dyn Surface,
        node: NodeId,
        now: Instant,
    ) -> Result<(), EngineError> {
        let data = self.tree.get(node).ok_or(EngineError::NodeNotFound)?;
        let cancels = data.cancel_dismisses.clone();
        let handler = data.on_click.clone();

        if let Some(id) = cancels {
            let container = {
                let tree = &self.tree;
                tree.ancestors(node).find(|&ancestor| {
                    tree.get(ancestor)
                        .map(|d| d.kind() == NodeKind::Modal)
                        .unwrap_or(false)
                })
            };
            if let Some(container) = container {
                return modal::dismiss(
                    &mut self.tree,
                    surface,
                    &mut self.timers,
                    container,
                    &id,
                    now,
                );
            }
        }
        if let Some(handler) = handler {
            handler.invoke();
        }
        Ok(())
    }

    // ── Modal stack ──────────────────────────────────────────────────

    pub fn show_modal(
        &mut self,
        surface: &mut dyn Surface,
        container: NodeId,
        id: &str,
        content: ModalContent,
        options: ModalOptions,
        now: Instant,
    ) -> Result<(), EngineError> {
        modal::show(
            &mut self.tree,
            surface,
            &mut self.timers,
            container,
            id,
            content,
            options,
            now,
        )
    }

    pub fn dismiss_modal(
        &mut self,
        surface: &mut dyn Surface,
        container: NodeId,
        id: &str,
        now: Instant,
    ) -> Result<(), EngineError> {
        modal::dismiss(&mut self.tree, surface, &mut self.timers, container, id, now)
    }

    pub fn dismiss_all_modals(
        &mut self,
        surface: &mut dyn Surface,
        container: NodeId,
        now: Instant,
    ) -> Result<(), EngineError> {
        modal::dismiss_all(&mut self.tree, surface, &mut self.timers, container, now)
    }

    // ── Timer pump ───────────────────────────────────────────────────

    /// The earliest pending deferred step, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Run every deferred step due at `now`.
    pub fn fire_due(&mut self, surface: &mut dyn Surface, now: Instant) {
        while let Some(action) = self.timers.pop_due(now) {
            modal::fire(&mut self.tree, surface, action);
        }
    }

    /// Drive the timer queue to empty, sleeping between deadlines.
    pub async fn run_until_idle(&mut self, surface: &mut dyn Surface) {
        while let Some(deadline) = self.next_deadline() {
            let wait = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(wait).await;
            self.fire_due(surface, deadline);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
