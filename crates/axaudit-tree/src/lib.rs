//! Host UI-tree capability surface + tree snapshot.
//!
//! The audit engine never depends on concrete host node types. Every check
//! discriminates by capability query on the [`Node`] trait, and hosts opt
//! into capabilities by overriding the defaulted methods.

mod node;
mod snapshot;

pub use node::{DescriptorSource, Node, NodeHandle, PixelRect};
pub use snapshot::all_nodes;
