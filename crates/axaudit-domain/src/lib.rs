//! Accessibility audit checks.
//!
//! Every rule implements [`AuditCheck`] and is dispatched uniformly by the
//! runner in axaudit-core. Checks are independent of each other: running
//! one never requires another to have run first. This crate is I/O-free
//! except through the injected store and descriptor-source handles.

mod abbreviation;
mod check;
mod container;
mod image;
mod labels;
mod scanner;
mod surface;
mod text_size;
mod touch;

pub use abbreviation::AbbreviationCheck;
pub use check::{AuditCheck, CheckFailure};
pub use container::ContainerStateCheck;
pub use image::ImageDescriptorCheck;
pub use labels::{ControlLabelCheck, EditableLabelCheck};
pub use scanner::{LayoutEvent, LayoutScanner, ScanError};
pub use surface::EmbeddedScriptCheck;
pub use text_size::{MIN_TEXT_SIZE_SP, TextSizeCheck};
pub use touch::{TOUCH_TARGET_MIN_DIP, TouchTargetCheck};
