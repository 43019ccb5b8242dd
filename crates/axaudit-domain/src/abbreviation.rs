use std::sync::Arc;

use axaudit_store::{AbbreviationTable, seed_if_empty};
use axaudit_tree::{NodeHandle, all_nodes};
use axaudit_types::{
    CHECK_ID_ABBREVIATION, CheckResult, NodeId, REASON_EDITABLE, REASON_NOT_TEXT_CARRIER,
    REASON_TEXT_EMPTY,
};

use crate::check::{AuditCheck, CheckFailure};

/// Static text containing a bare abbreviation must be paraphrased by an
/// accessible label, and the label itself must not repeat the
/// abbreviation.
///
/// Backed by the seed-on-empty abbreviation table; the store handle is
/// injected and its lifetime is owned by the caller.
pub struct AbbreviationCheck {
    table: Arc<dyn AbbreviationTable>,
}

impl AbbreviationCheck {
    pub fn new(table: Arc<dyn AbbreviationTable>) -> Self {
        Self { table }
    }
}

/// A bare abbreviation is the stored form immediately followed by a space
/// or a period.
fn contains_bare(haystack: &str, abbreviation: &str) -> bool {
    haystack.contains(&format!("{abbreviation} ")) || haystack.contains(&format!("{abbreviation}."))
}

impl AuditCheck for AbbreviationCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_ABBREVIATION
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
            if node.is_editable() {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_EDITABLE));
                continue;
            }
            let text = node.text().unwrap_or_default();
            if text.is_empty() {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_TEXT_EMPTY));
                continue;
            }

            seed_if_empty(self.table.as_ref())?;
            let label = node.accessible_label().unwrap_or_default();
            if let Some(result) = self.scan_node(node.id(), &text, &label)? {
                results.push(result);
            }
        }

        Ok(results)
    }
}

impl AbbreviationCheck {
    /// At most one result per node: the first matching abbreviation
    /// short-circuits further scanning.
    ///
    /// The two defect shapes stay separate branches: a bare abbreviation
    /// in unlabelled text and a label that repeats the abbreviation need
    /// different remediation, so they carry different messages.
    fn scan_node(
        &self,
        subject: NodeId,
        text: &str,
        label: &str,
    ) -> Result<Option<CheckResult>, CheckFailure> {
        for entry in self.table.get_all()? {
            if contains_bare(text, &entry.abbreviation) && label.is_empty() {
                return Ok(Some(CheckResult::error(
                    self.name(),
                    subject,
                    format!(
                        "text contains the abbreviation '{}' but the node has no accessible label",
                        entry.abbreviation
                    ),
                )));
            }
            if contains_bare(label, &entry.abbreviation) {
                return Ok(Some(CheckResult::error(
                    self.name(),
                    subject,
                    format!(
                        "accessible label repeats the abbreviation '{}' instead of spelling it out",
                        entry.abbreviation
                    ),
                )));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axaudit_store::MemoryTable;
    use axaudit_testkit::FakeNode;
    use axaudit_types::Severity;

    fn check() -> AbbreviationCheck {
        AbbreviationCheck::new(Arc::new(MemoryTable::new()))
    }

    fn errors(results: &[CheckResult]) -> Vec<&CheckResult> {
        results.iter().filter(|r| r.severity == Severity::Error).collect()
    }

    #[test]
    fn bare_abbreviation_without_label_is_an_error() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("mr Dupont"))
            .build();

        let results = check().run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].subject.0, 2);
        assert!(errors[0].message.contains("no accessible label"));
    }

    #[test]
    fn paraphrasing_label_passes() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("mr Dupont").label("monsieur Dupont"))
            .build();

        let results = check().run(&root).unwrap();
        assert!(errors(&results).is_empty());
    }

    #[test]
    fn label_repeating_abbreviation_is_an_error() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("monsieur Dupont").label("mr Dupont"))
            .build();

        let results = check().run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("spelling it out"));
    }

    #[test]
    fn abbreviation_followed_by_period_matches() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("mme.Durand"))
            .build();

        let results = check().run(&root).unwrap();
        assert_eq!(errors(&results).len(), 1);
    }

    #[test]
    fn abbreviation_not_followed_by_separator_passes() {
        // "mrs" contains "mr" but not as a bare abbreviation.
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("mrs"))
            .build();

        let results = check().run(&root).unwrap();
        assert!(errors(&results).is_empty());
    }

    #[test]
    fn at_most_one_error_per_node() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("mr et mme Dupont"))
            .build();

        let results = check().run(&root).unwrap();
        assert_eq!(errors(&results).len(), 1);
    }

    #[test]
    fn editable_and_non_text_nodes_emit_distinct_reasons() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("mr X").editable())
            .build();

        let results = check().run(&root).unwrap();
        assert!(results.iter().any(|r| r.subject.0 == 1 && r.message == REASON_NOT_TEXT_CARRIER));
        assert!(results.iter().any(|r| r.subject.0 == 2 && r.message == REASON_EDITABLE));
    }

    #[test]
    fn first_use_seeds_the_injected_table() {
        let table = Arc::new(MemoryTable::new());
        let check = AbbreviationCheck::new(Arc::clone(&table) as Arc<dyn AbbreviationTable>);
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).text_carrier("plain text"))
            .build();

        check.run(&root).unwrap();
        assert!(!table.get_all().unwrap().is_empty());
    }
}
