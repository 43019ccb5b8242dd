use tracing::{debug, warn};

use axaudit_domain::{AuditCheck, CheckFailure};
use axaudit_tree::NodeHandle;
use axaudit_types::{CheckResult, ResultCounts};

/// What one check produced over one root: its results, or the structural
/// failure that aborted it.
#[derive(Debug)]
pub struct CheckOutcome {
    pub check: &'static str,
    pub results: Vec<CheckResult>,
    pub failure: Option<CheckFailure>,
}

#[derive(Debug)]
pub struct AuditRun {
    pub outcomes: Vec<CheckOutcome>,
    pub counts: ResultCounts,
}

impl AuditRun {
    /// All results across checks, in dispatch order.
    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.outcomes.iter().flat_map(|o| o.results.iter())
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.failure.is_some())
    }
}

/// Drive every check over `root`, isolating structural failures: a check
/// that fails is recorded and the remaining checks still run.
pub fn run_audit(root: &NodeHandle, checks: &[Box<dyn AuditCheck>]) -> AuditRun {
    let mut outcomes = Vec::with_capacity(checks.len());
    let mut counts = ResultCounts::default();

    for check in checks {
        debug!(check = check.name(), "running check");
        match check.run(root) {
            Ok(results) => {
                for r in &results {
                    counts.bump(r.severity);
                }
                outcomes.push(CheckOutcome {
                    check: check.name(),
                    results,
                    failure: None,
                });
            }
            Err(failure) => {
                warn!(check = check.name(), error = %failure, "check aborted");
                outcomes.push(CheckOutcome {
                    check: check.name(),
                    results: Vec::new(),
                    failure: Some(failure),
                });
            }
        }
    }

    AuditRun { outcomes, counts }
}
