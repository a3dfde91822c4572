//! # flowbox
//!
//! An attribute-driven declarative layout engine. UI is described as a tree of
//! container nodes annotated with string attributes for sizing, spacing,
//! gravity, and visibility; flowbox translates those attributes into concrete
//! box-model geometry against a host rendering surface, and manages a stacked
//! modal/dialog subsystem above the layout tree.
//!
//! ## Core Systems
//!
//! - **[`attr`]** — Unit-tagged attribute values, the closed attribute-key
//!   union, and the typed per-node configuration record with its reducer
//! - **[`tree`]** — Slotmap-backed node arena with ordered children and
//!   subtree operations
//! - **[`layout`]** — Geometry resolution (shorthand precedence, margin-box
//!   percentages), the visibility gate, and the Linear/Free/Bound container
//!   strategies
//! - **[`surface`]** — The host rendering-surface abstraction the engine
//!   computes against (measured geometry in, style patches out)
//! - **[`engine`]** — Attribute dispatch, structural invalidation with the
//!   per-container single-pass guard, and the timer pump
//! - **[`modal`]** — The modal stack controller: identity-keyed show/dismiss
//!   with timed fade transitions over a fill-parent container
//! - **[`dialog`]** — Fluent dialog builder producing header/content/footer
//!   subtrees and driving a named modal stack
//! - **[`testing`]** — In-memory surface for exercising the engine headless
//!
//! The engine is single-threaded and event-driven: every layout pass is a
//! synchronous reaction to an attribute mutation, structural mutation, size
//! change, viewport resize, or timer expiry.

// Foundation
pub mod geometry;

// Core systems
pub mod attr;
pub mod surface;
pub mod tree;

// Layout
pub mod layout;

// Engine and the modal subsystem
pub mod dialog;
pub mod engine;
pub mod modal;

// Test support
pub mod testing;

pub use attr::config::NodeConfig;
pub use attr::key::AttrKey;
pub use attr::value::{Gravity, Value};
pub use dialog::{DialogBuilder, DialogContent, IconButton, IconTextButton};
pub use engine::{Engine, EngineError};
pub use modal::{GravitySpec, MarginSpec, ModalContent, ModalOptions};
pub use surface::{Prop, Surface};
pub use tree::node::{NodeData, NodeId, NodeKind};
