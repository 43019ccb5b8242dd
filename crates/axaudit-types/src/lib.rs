//! Data types (audit results + store entries) for axaudit.
//!
//! This crate is intentionally "dumb": pure DTOs with serde, no behavior
//! beyond constructors and string conversions.

use serde::{Deserialize, Serialize};

// ── Check Identifiers ──────────────────────────────────────────
pub const CHECK_ID_CONTROL_LABEL: &str = "axaudit.control_label";
pub const CHECK_ID_EDITABLE_LABEL: &str = "axaudit.editable_label";
pub const CHECK_ID_TEXT_SIZE: &str = "axaudit.text_size";
pub const CHECK_ID_EMBEDDED_SCRIPT: &str = "axaudit.embedded_script";
pub const CHECK_ID_ABBREVIATION: &str = "axaudit.abbreviation";
pub const CHECK_ID_IMAGE_DESCRIPTOR: &str = "axaudit.image_descriptor";
pub const CHECK_ID_CONTAINER_STATE: &str = "axaudit.container_state";
pub const CHECK_ID_TOUCH_TARGET: &str = "axaudit.touch_target";

// ── Frozen Vocabulary ──────────────────────────────────────────
// NOT_RUN reason strings. A NOT_RUN result always carries one of these
// applicability reasons, never defect text.
pub const REASON_NOT_TEXT_CARRIER: &str = "node is not a text carrier";
pub const REASON_TEXT_EMPTY: &str = "text carrier has no text";
pub const REASON_EDITABLE: &str = "text carrier is editable";
pub const REASON_NOT_EDITABLE: &str = "text carrier is not editable";
pub const REASON_NOT_CONTROL: &str = "node is not a control";
pub const REASON_NOT_EMBEDDED_SURFACE: &str = "node is not an embedded surface";
pub const REASON_NOT_CONTAINER: &str = "node is not a list container";
pub const REASON_NO_DESCRIPTOR: &str = "node has no layout descriptor";
pub const REASON_NOT_CLICKABLE: &str = "node is not clickable";
pub const REASON_NO_DENSITY: &str = "display density is unavailable";
pub const REASON_NO_BOUNDS: &str = "node bounds are unavailable";
pub const REASON_NO_TEXT_SIZE: &str = "text size is unavailable";

/// Host-assigned identity of a tree node. Unique within one audited tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Identity of a serialized layout description a container originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    NotRun,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::NotRun => "not_run",
        }
    }
}

/// One finding emitted by one check against one node.
///
/// Value object: structural equality only, no identity. `NotRun` results
/// carry an applicability reason from the frozen vocabulary in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub severity: Severity,
    pub message: String,
    pub subject: NodeId,
}

impl CheckResult {
    pub fn error(check_id: &str, subject: NodeId, message: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            severity: Severity::Error,
            message: message.into(),
            subject,
        }
    }

    pub fn warning(check_id: &str, subject: NodeId, message: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            severity: Severity::Warning,
            message: message.into(),
            subject,
        }
    }

    pub fn not_run(check_id: &str, subject: NodeId, reason: &str) -> Self {
        Self {
            check_id: check_id.to_string(),
            severity: Severity::NotRun,
            message: reason.to_string(),
            subject,
        }
    }
}

/// Per-severity result tallies for one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResultCounts {
    pub error: u32,
    pub warning: u32,
    pub not_run: u32,
}

impl ResultCounts {
    pub fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error = self.error.saturating_add(1),
            Severity::Warning => self.warning = self.warning.saturating_add(1),
            Severity::NotRun => self.not_run = self.not_run.saturating_add(1),
        }
    }

    pub fn tally<'a>(results: impl IntoIterator<Item = &'a CheckResult>) -> Self {
        let mut counts = Self::default();
        for r in results {
            counts.bump(r.severity);
        }
        counts
    }
}

/// One abbreviation → meaning row, keyed by `abbreviation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviationEntry {
    pub abbreviation: String,
    pub meaning: String,
}

impl AbbreviationEntry {
    pub fn new(abbreviation: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            meaning: meaning.into(),
        }
    }
}
