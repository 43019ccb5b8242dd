use axaudit_store::StoreError;
use axaudit_tree::NodeHandle;
use axaudit_types::{CheckResult, DescriptorId};

use crate::scanner::ScanError;

/// Structural failure: the only condition that aborts a single check early.
///
/// Inapplicability and defects are results, never errors. A failing check
/// must not take sibling checks down with it; the runner isolates each one.
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("descriptor {0:?} could not be opened: {1}")]
    DescriptorOpen(DescriptorId, std::io::Error),

    #[error("descriptor {0:?} is malformed: {1}")]
    DescriptorScan(DescriptorId, ScanError),
}

/// One accessibility rule, dispatched uniformly by the runner.
///
/// A check emits zero or more results per run. For every node that does
/// not match the rule's subject kind it emits exactly one `NOT_RUN`
/// result, so audit completeness can be verified by counting.
pub trait AuditCheck: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, root: &NodeHandle) -> Result<Vec<CheckResult>, CheckFailure>;
}
