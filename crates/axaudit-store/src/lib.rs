//! Seed-on-empty abbreviation store.
//!
//! The engine owns the seeding policy ([`seed_if_empty`]); the table owns
//! durability. Two table backends ship: a sqlite table for persistent
//! sessions and an in-process table for short-lived callers and tests.

mod seed;
mod sqlite;
mod table;

pub use seed::{SEED_ENTRIES, seed_if_empty};
pub use sqlite::SqliteTable;
pub use table::{AbbreviationTable, MemoryTable, StoreError};
