//! The attribute system: unit-tagged values, the closed attribute-key union,
//! and the typed per-node configuration record.

pub mod config;
pub mod key;
pub mod value;

pub use config::NodeConfig;
pub use key::AttrKey;
pub use value::{Gravity, Value};
