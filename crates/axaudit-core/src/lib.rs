//! Core engine: uniform check dispatch over one audited tree.

mod runner;
mod session;

pub use runner::{AuditRun, CheckOutcome, run_audit};
pub use session::{AuditSession, default_checks};
