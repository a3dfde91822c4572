//! The layout tree: node records and the slotmap-backed arena.

pub mod arena;
pub mod node;

pub use arena::Tree;
pub use node::{Callback, ModalState, NodeData, NodeId, NodeKind};
