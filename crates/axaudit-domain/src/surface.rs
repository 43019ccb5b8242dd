use axaudit_tree::{NodeHandle, all_nodes};
use axaudit_types::{CHECK_ID_EMBEDDED_SCRIPT, CheckResult, REASON_NOT_EMBEDDED_SURFACE};

use crate::check::{AuditCheck, CheckFailure};

/// Embedded web surfaces must not run with script execution enabled.
#[derive(Debug, Default)]
pub struct EmbeddedScriptCheck;

impl AuditCheck for EmbeddedScriptCheck {
    fn name(&self) -> &'static str {
        CHECK_ID_EMBEDDED_SCRIPT
    }

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure> {
        let mut results = Vec::new();

        for node in all_nodes(root) {
            if !node.is_embedded_surface() {
                results.push(CheckResult::not_run(
                    self.name(),
                    node.id(),
                    REASON_NOT_EMBEDDED_SURFACE,
                ));
                continue;
            }
            if node.script_enabled() {
                results.push(CheckResult::error(
                    self.name(),
                    node.id(),
                    "embedded surface has script execution enabled",
                ));
            }
        }

        Ok(results)
    }
}
