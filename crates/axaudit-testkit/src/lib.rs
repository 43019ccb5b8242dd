//! Shared test utilities for the axaudit workspace.
//!
//! This crate provides:
//! - **tree**: a buildable fake host tree implementing the `Node` surface
//! - **descriptor**: in-memory and fault-injecting descriptor sources
//! - **arb**: proptest strategies for generating valid test inputs
//! - **fixtures**: common descriptor documents

pub mod arb;
pub mod descriptor;
pub mod fixtures;
pub mod tree;

pub use arb::{arb_abbreviation_entry, arb_severity};
pub use descriptor::{FlakySource, MapDescriptorSource};
pub use tree::{FakeGroup, FakeGroupChild, FakeNode};
