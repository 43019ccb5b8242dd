use axaudit_tree::{Node, NodeHandle, all_nodes};
use axaudit_types::{
    CHECK_ID_CONTROL_LABEL, CHECK_ID_EDITABLE_LABEL, CheckResult, REASON_NOT_CONTROL,
    REASON_NOT_EDITABLE, REASON_NOT_TEXT_CARRIER,
};

use crate::check::{AuditCheck, CheckFailure};

fn has_any_text(node: &dyn Node) -> bool {
    node.text().is_some_and(|t| !t.is_empty())
        || node.accessible_label().is_some_and(|l| !l.is_empty())
}

/// Visible controls must be labelled (own text, accessible label, or an
/// associated labelling node) and focusable.
#[derive(Debug, Default)]
pub struct ControlLabelCheck;

impl AuditCheck for ControlLabelCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_CONTROL_LABEL
    }

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure> {
        let nodes = all_nodes(root);
        let mut results = Vec::new();

        for node in &nodes {
            if !node.is_control() {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_NOT_CONTROL));
                continue;
            }

            if node.is_text_carrier() {
                if node.is_visible() && !has_any_text(node.as_ref()) {
                    results.push(CheckResult::error(
                        self.name(),
                        node.id(),
                        "control must have a text or an accessible label",
                    ));
                }
            } else {
                let labelled_elsewhere = nodes
                    .iter()
                    .any(|other| other.label_target_id() == Some(node.id()));
                if node.is_visible() && !has_any_text(node.as_ref()) && !labelled_elsewhere {
                    results.push(CheckResult::error(
                        self.name(),
                        node.id(),
                        "control must have an accessible label or an associated labelling node",
                    ));
                }
            }

            if node.is_visible() && node.is_enabled() && !node.is_focusable() {
                results.push(CheckResult::error(
                    self.name(),
                    node.id(),
                    "control must be focusable",
                ));
            }
        }

        Ok(results)
    }
}

/// Editable text fields must not carry an accessible label: the hint is
/// the assistive channel there, and a label would shadow the typed text.
#[derive(Debug, Default)]
pub struct EditableLabelCheck;

impl AuditCheck for EditableLabelCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_EDITABLE_LABEL
    }

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure> {
        let mut results = Vec::new();

        for node in all_nodes(root) {
            if !node.is_text_carrier() {
                results.push(CheckResult::not_run(
                    self.name(),
                    node.id(),
                    REASON_NOT_TEXT_CARRIER,
                ));
                continue;
            }
            if !node.is_editable() {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_NOT_EDITABLE));
                continue;
            }
            if node.accessible_label().is_some_and(|l| !l.is_empty()) {
                results.push(CheckResult::error(
                    self.name(),
                    node.id(),
                    "editable field must not carry an accessible label",
                ));
            }
        }

        Ok(results)
    }
}
