//! Named key/value slots over the `kv_store` table.
//!
//! # Responsibility
//! - Provide whole-value get/set on a single named slot.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A slot holds exactly one UTF-8 payload; `set` replaces it wholesale.
//! - An absent key reads as `None`, never as an error.

use crate::db::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Key/value slot access backed by an open SQLite connection.
pub struct SlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SlotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Reads the raw payload stored under `key`.
    pub fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Replaces the payload stored under `key`, creating the slot if needed.
    pub fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
