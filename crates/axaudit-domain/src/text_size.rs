use axaudit_tree::{NodeHandle, all_nodes};
use axaudit_types::{
    CHECK_ID_TEXT_SIZE, CheckResult, REASON_NO_TEXT_SIZE, REASON_NOT_TEXT_CARRIER,
};

use crate::check::{AuditCheck, CheckFailure};

/// Minimum readable text size, in scale-independent units.
pub const MIN_TEXT_SIZE_SP: f32 = 14.0;

/// Text below [`MIN_TEXT_SIZE_SP`] is flagged as a warning.
#[derive(Debug, Default)]
pub struct TextSizeCheck;

impl AuditCheck for TextSizeCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_TEXT_SIZE
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
            match node.text_size_sp() {
                None => {
                    results.push(CheckResult::not_run(self.name(), node.id(), REASON_NO_TEXT_SIZE));
                }
                Some(sp) if sp < MIN_TEXT_SIZE_SP => {
                    results.push(CheckResult::warning(
                        self.name(),
                        node.id(),
                        format!("text size must be at least {MIN_TEXT_SIZE_SP}sp; actual size is {sp}sp"),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(results)
    }
}
