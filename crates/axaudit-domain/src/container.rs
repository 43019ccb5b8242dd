use std::collections::BTreeSet;

use axaudit_tree::{Node, NodeHandle, all_nodes};
use axaudit_types::{CHECK_ID_CONTAINER_STATE, CheckResult, REASON_NOT_CONTAINER};

use crate::check::{AuditCheck, CheckFailure};

/// What the check believes about one container's live state. Reset to the
/// default at check start; the live container is intentionally left in
/// whatever state the final transition produced (documented side effect).
#[derive(Debug, Default)]
struct ContainerState {
    expanded: BTreeSet<usize>,
    selected: BTreeSet<(usize, usize)>,
}

/// Containers must expose focusable, labelled items, and must announce
/// mutually exclusive states (expanded/collapsed, selected/unselected)
/// with distinct labels.
///
/// Groups and children are driven strictly sequentially: expand/select
/// state is global to the container, so concurrent evaluation would
/// corrupt the label diff.
#[derive(Debug, Default)]
pub struct ContainerStateCheck;

fn label_of(node: &dyn Node) -> String {
    node.accessible_label().unwrap_or_default()
}

impl AuditCheck for ContainerStateCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_CONTAINER_STATE
    }

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure> {
        let mut results = Vec::new();

        for node in all_nodes(root) {
            if let Some(count) = node.item_count() {
                self.check_flat(node.as_ref(), count, &mut results);
            } else if let Some(groups) = node.group_count() {
                self.check_expandable(node.as_ref(), groups, &mut results);
            } else {
                results.push(CheckResult::not_run(self.name(), node.id(), REASON_NOT_CONTAINER));
            }
        }

        Ok(results)
    }
}

impl ContainerStateCheck {
    /// Flat and virtualized lists: independent per item, no state mutation.
    fn check_flat(&self, container: &dyn Node, count: usize, results: &mut Vec<CheckResult>) {
        for index in 0..count {
            let Some(item) = container.item_at(index) else {
                continue;
            };
            if !item.is_focusable() {
                results.push(CheckResult::error(
                    self.name(),
                    item.id(),
                    "list item must be focusable",
                ));
            }
            if label_of(item.as_ref()).is_empty() {
                results.push(CheckResult::error(
                    self.name(),
                    item.id(),
                    "list item must have an accessible label",
                ));
            }
        }
    }

    fn check_expandable(
        &self,
        container: &dyn Node,
        groups: usize,
        results: &mut Vec<CheckResult>,
    ) {
        let mut state = ContainerState::default();

        // Establish the default state before diffing: every group collapsed,
        // nothing selected.
        for group in 0..groups {
            container.collapse(group);
        }

        for group in 0..groups {
            if let Some(group_node) = container.group_at(group) {
                self.diff_group_labels(container, group, group_node.as_ref(), &mut state, results);
            }

            for child in 0..container.child_count(group) {
                let Some(child_node) = container.child_at(group, child) else {
                    continue;
                };
                self.check_child(container, group, child, child_node.as_ref(), &mut state, results);
            }
        }
    }

    /// A group must announce its expansion state: capture the label
    /// collapsed, expand, capture again, collapse back.
    fn diff_group_labels(
        &self,
        container: &dyn Node,
        group: usize,
        group_node: &dyn Node,
        state: &mut ContainerState,
        results: &mut Vec<CheckResult>,
    ) {
        if state.expanded.contains(&group) {
            container.collapse(group);
            state.expanded.remove(&group);
        }
        let collapsed = label_of(group_node);

        if container.expand(group) {
            state.expanded.insert(group);
        }
        let expanded = label_of(group_node);

        if container.collapse(group) {
            state.expanded.remove(&group);
        }

        if collapsed.is_empty() || expanded.is_empty() || collapsed == expanded {
            results.push(CheckResult::error(
                self.name(),
                group_node.id(),
                "group must announce its expanded and collapsed states with distinct labels",
            ));
        }
    }

    fn check_child(
        &self,
        container: &dyn Node,
        group: usize,
        child: usize,
        child_node: &dyn Node,
        state: &mut ContainerState,
        results: &mut Vec<CheckResult>,
    ) {
        if !child_node.is_focusable() && container.is_enabled() {
            results.push(CheckResult::error(
                self.name(),
                child_node.id(),
                "item must be focusable while its container is enabled",
            ));
        }

        // Queried before any transition, so a transition is never misread
        // as a capability change.
        let selectable = container.is_child_selectable(group, child);

        if selectable && !state.selected.contains(&(group, child)) {
            let unselected = label_of(child_node);
            if container.select(group, child) {
                state.selected.insert((group, child));
            }
            let selected = label_of(child_node);

            if unselected.is_empty() || selected.is_empty() || unselected == selected {
                results.push(CheckResult::error(
                    self.name(),
                    child_node.id(),
                    "selectable item must announce its selected and unselected states with distinct labels",
                ));
            }
        } else if !selectable && label_of(child_node).is_empty() {
            results.push(CheckResult::error(
                self.name(),
                child_node.id(),
                "item must have an accessible label",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axaudit_testkit::{FakeGroup, FakeGroupChild, FakeNode};
    use axaudit_types::Severity;

    fn errors(results: &[CheckResult]) -> Vec<&CheckResult> {
        results.iter().filter(|r| r.severity == Severity::Error).collect()
    }

    #[test]
    fn focusable_labelled_list_items_pass() {
        let root = FakeNode::new(1)
            .child(
                FakeNode::new(2)
                    .items(vec![FakeNode::new(3).focusable().label("first row")]),
            )
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        assert!(errors(&results).is_empty());
    }

    #[test]
    fn unfocusable_unlabelled_list_item_yields_two_errors() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).items(vec![FakeNode::new(3)]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|r| r.subject.0 == 3));
    }

    #[test]
    fn group_with_identical_state_labels_yields_one_error() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3).collapsed("Section A").expanded("Section A"),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].subject.0, 3);
    }

    #[test]
    fn group_with_distinct_state_labels_passes() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3)
                    .collapsed("Section A, collapsed")
                    .expanded("Section A, expanded"),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        assert!(errors(&results).is_empty());
    }

    #[test]
    fn group_with_empty_collapsed_label_is_an_error() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3).collapsed("").expanded("Section A, expanded"),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        assert_eq!(errors(&results).len(), 1);
    }

    #[test]
    fn selectable_child_must_announce_selection() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3)
                    .collapsed("collapsed")
                    .expanded("expanded")
                    .child(
                        FakeGroupChild::new(4)
                            .focusable()
                            .selectable()
                            .unselected_label("Row")
                            .selected_label("Row"),
                    ),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].subject.0, 4);
        assert!(errors[0].message.contains("selected and unselected"));
    }

    #[test]
    fn selectable_child_with_distinct_labels_passes() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3)
                    .collapsed("collapsed")
                    .expanded("expanded")
                    .child(
                        FakeGroupChild::new(4)
                            .focusable()
                            .selectable()
                            .unselected_label("Row")
                            .selected_label("Row, selected"),
                    ),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        assert!(errors(&results).is_empty());
    }

    #[test]
    fn non_selectable_child_only_needs_a_label() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3)
                    .collapsed("collapsed")
                    .expanded("expanded")
                    .child(FakeGroupChild::new(4).focusable())
                    .child(FakeGroupChild::new(5).focusable().unselected_label("Row")),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].subject.0, 4);
        assert_eq!(errors[0].message, "item must have an accessible label");
    }

    #[test]
    fn unfocusable_child_in_enabled_container_is_an_error() {
        let root = FakeNode::new(1)
            .child(FakeNode::new(2).groups(vec![
                FakeGroup::new(3)
                    .collapsed("collapsed")
                    .expanded("expanded")
                    .child(FakeGroupChild::new(4).unselected_label("Row")),
            ]))
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("focusable"));
    }

    #[test]
    fn unfocusable_child_in_disabled_container_passes() {
        let root = FakeNode::new(1)
            .child(
                FakeNode::new(2)
                    .disabled()
                    .groups(vec![
                        FakeGroup::new(3)
                            .collapsed("collapsed")
                            .expanded("expanded")
                            .child(FakeGroupChild::new(4).unselected_label("Row")),
                    ]),
            )
            .build();

        let results = ContainerStateCheck.run(&root).unwrap();
        assert!(errors(&results).is_empty());
    }

    #[test]
    fn non_container_nodes_are_not_run() {
        let root = FakeNode::new(1).child(FakeNode::new(2)).build();
        let results = ContainerStateCheck.run(&root).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.message == REASON_NOT_CONTAINER));
    }

    #[test]
    fn selection_state_is_left_mutated_after_the_check() {
        let container = FakeNode::new(2).groups(vec![
            FakeGroup::new(3)
                .collapsed("collapsed")
                .expanded("expanded")
                .child(
                    FakeGroupChild::new(4)
                        .focusable()
                        .selectable()
                        .unselected_label("Row")
                        .selected_label("Row, selected"),
                ),
        ]);
        let root = FakeNode::new(1).child(container).build();

        ContainerStateCheck.run(&root).unwrap();

        // Documented side effect: the final select transition is not undone.
        let container = &root.children()[0];
        let child = container.child_at(0, 0).unwrap();
        assert_eq!(child.accessible_label().as_deref(), Some("Row, selected"));
    }
}
