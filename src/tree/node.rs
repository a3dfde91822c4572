//! Node records: kind, configuration, and per-node engine state.

use std::fmt;
use std::rc::Rc;

use slotmap::new_key_type;

use crate::attr::config::NodeConfig;

new_key_type! {
    /// Arena key for a layout node. Stable across unrelated mutations and
    /// safe against reuse after removal.
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// What a node is, which decides the layout strategy applied to its
/// children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf box with no layout strategy of its own.
    View,
    /// Flex container: one main axis, gravity, wrap, scroll, sticky.
    Linear,
    /// Absolute-positioning container: children anchored per axis.
    Free,
    /// Fill-parent container: children pinned to the parent's full extent.
    Bound,
    /// The modal stack host. Laid out like [`NodeKind::Bound`].
    Modal,
    /// External-content host (`src`). Laid out like [`NodeKind::Bound`].
    Content,
}

impl NodeKind {
    /// Whether this kind runs a layout pass over its children.
    pub fn is_container(self) -> bool {
        !matches!(self, NodeKind::View)
    }
}

// ---------------------------------------------------------------------------
// ModalState
// ---------------------------------------------------------------------------

/// Lifecycle of one entry in a modal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// Inserted invisible, waiting for the enter timer.
    Entering,
    /// Fully faded in and interactive.
    Shown,
    /// Fading out, waiting for removal.
    Exiting,
}

// ---------------------------------------------------------------------------
// Callback
// ---------------------------------------------------------------------------

/// A click handler attached to a node.
#[derive(Clone)]
pub struct Callback(pub Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Callback(Rc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Everything the engine tracks per node.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    /// Layout strategy selector.
    pub kind: Option<NodeKind>,
    /// Markup element id, if the hosting layer assigned one.
    pub id: Option<String>,
    /// Typed attribute record.
    pub config: NodeConfig,

    /// Single-pass guard for the invalidation controller. While a layout
    /// pass for this container runs, further triggers are dropped.
    pub layout_running: bool,

    /// Display mode stashed by the visibility gate while the node is
    /// hidden. Presence doubles as the hidden marker.
    pub cached_display: Option<String>,
    /// Position stashed while the node is sticky.
    pub cached_position: Option<String>,

    /// Modal-stack bookkeeping: the identity this entry was shown under.
    pub modal_id: Option<String>,
    /// Modal-stack bookkeeping: where the entry is in its lifecycle.
    pub modal_state: Option<ModalState>,
    /// Set on a cancelable backdrop: clicking it dismisses this modal id.
    pub cancel_dismisses: Option<String>,

    /// Click handler, if any.
    pub on_click: Option<Callback>,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        NodeData { kind: Some(kind), ..Default::default() }
    }

    pub fn with_id(kind: NodeKind, id: impl Into<String>) -> Self {
        NodeData { kind: Some(kind), id: Some(id.into()), ..Default::default() }
    }

    pub fn with_config(kind: NodeKind, config: NodeConfig) -> Self {
        NodeData { kind: Some(kind), config, ..Default::default() }
    }

    /// The node's kind, defaulting to a plain view.
    pub fn kind(&self) -> NodeKind {
        self.kind.unwrap_or(NodeKind::View)
    }

    /// Whether this node runs a layout pass over its children.
    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
