use std::sync::Mutex;

use axaudit_types::AbbreviationEntry;
use tracing::debug;

use crate::table::{AbbreviationTable, StoreError};

/// Built-in rows installed on first use of an empty table.
pub const SEED_ENTRIES: &[(&str, &str)] = &[("mr", "monsieur"), ("mme", "madame")];

// Serializes the check-then-insert window across checks racing on first
// use. The table's own insert_all atomicity is not enough: two callers
// could both observe an empty table and both insert.
static SEED_GATE: Mutex<()> = Mutex::new(());

/// Install the built-in seed rows if the table is empty; otherwise no-op.
///
/// Idempotent: calling twice yields the same `get_all` result as calling
/// once. The seed batch is inserted atomically.
pub fn seed_if_empty(table: &dyn AbbreviationTable) -> Result<(), StoreError> {
    let _gate = SEED_GATE
        .lock()
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    if !table.get_all()?.is_empty() {
        return Ok(());
    }

    let entries: Vec<AbbreviationEntry> = SEED_ENTRIES
        .iter()
        .map(|(a, m)| AbbreviationEntry::new(*a, *m))
        .collect();
    debug!(rows = entries.len(), "seeding empty abbreviation table");
    table.insert_all(&entries)
}
