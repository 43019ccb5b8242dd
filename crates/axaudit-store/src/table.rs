use std::collections::BTreeMap;
use std::sync::Mutex;

use axaudit_types::AbbreviationEntry;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("abbreviation store unavailable: {0}")]
    Unavailable(String),

    #[error("abbreviation store query failed: {0}")]
    Query(String),
}

/// Persisted key/value surface over abbreviation → meaning rows.
///
/// `insert_all` is atomic: a reader never observes a partial batch.
/// Duplicate abbreviations replace the existing row.
pub trait AbbreviationTable: Send + Sync {
    fn get_all(&self) -> Result<Vec<AbbreviationEntry>, StoreError>;
    fn insert_all(&self, entries: &[AbbreviationEntry]) -> Result<(), StoreError>;
}

/// In-process table, keyed by abbreviation. Suitable for one-shot audits
/// and tests; rows live as long as the table handle.
#[derive(Default)]
pub struct MemoryTable {
    rows: Mutex<BTreeMap<String, String>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AbbreviationTable for MemoryTable {
    fn get_all(&self) -> Result<Vec<AbbreviationEntry>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(rows
            .iter()
            .map(|(a, m)| AbbreviationEntry::new(a.clone(), m.clone()))
            .collect())
    }

    fn insert_all(&self, entries: &[AbbreviationEntry]) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        for e in entries {
            rows.insert(e.abbreviation.clone(), e.meaning.clone());
        }
        Ok(())
    }
}
