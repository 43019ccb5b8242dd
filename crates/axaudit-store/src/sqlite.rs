use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use axaudit_types::AbbreviationEntry;

use crate::table::{AbbreviationTable, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS abbreviation (
    abbreviation TEXT PRIMARY KEY,
    meaning TEXT NOT NULL
)";

/// Sqlite-backed abbreviation table.
///
/// One connection, serialized behind a mutex; `insert_all` runs in a
/// single transaction so a concurrent reader observes all rows or none.
pub struct SqliteTable {
    conn: Mutex<Connection>,
}

impl SqliteTable {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn =
            Connection::open(path).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Private to the calling process; rows last one table lifetime.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, [])
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl AbbreviationTable for SqliteTable {
    fn get_all(&self) -> Result<Vec<AbbreviationEntry>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT abbreviation, meaning FROM abbreviation ORDER BY abbreviation")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(AbbreviationEntry {
                    abbreviation: row.get(0)?,
                    meaning: row.get(1)?,
                })
            })
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| StoreError::Query(e.to_string()))?);
        }
        Ok(out)
    }

    fn insert_all(&self, entries: &[AbbreviationEntry]) -> Result<(), StoreError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Query(e.to_string()))?;
        for e in entries {
            tx.execute(
                "INSERT OR REPLACE INTO abbreviation (abbreviation, meaning) VALUES (?1, ?2)",
                (&e.abbreviation, &e.meaning),
            )
            .map_err(|e| StoreError::Query(e.to_string()))?;
        }
        tx.commit().map_err(|e| StoreError::Query(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_round_trip() {
        let table = SqliteTable::open_in_memory().unwrap();
        assert!(table.get_all().unwrap().is_empty());

        table
            .insert_all(&[
                AbbreviationEntry::new("mme", "madame"),
                AbbreviationEntry::new("mr", "monsieur"),
            ])
            .unwrap();

        let entries = table.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        // ORDER BY abbreviation
        assert_eq!(entries[0].abbreviation, "mme");
        assert_eq!(entries[1].abbreviation, "mr");
    }

    #[test]
    fn rows_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbreviation.db");

        {
            let table = SqliteTable::open(&path).unwrap();
            table
                .insert_all(&[AbbreviationEntry::new("mr", "monsieur")])
                .unwrap();
        }

        let table = SqliteTable::open(&path).unwrap();
        let entries = table.get_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].meaning, "monsieur");
    }

    #[test]
    fn insert_or_replace_keeps_key_unique() {
        let table = SqliteTable::open_in_memory().unwrap();
        table
            .insert_all(&[AbbreviationEntry::new("mr", "monsieur")])
            .unwrap();
        table
            .insert_all(&[AbbreviationEntry::new("mr", "mister")])
            .unwrap();

        let entries = table.get_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].meaning, "mister");
    }
}
