//! Key/value storage providers
//!
//! The ledger persists one JSON document per key. Providers are synchronous
//! and offer no transactions; the last write to a key wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::{params, OptionalExtension};

use super::connection::{Database, DbError, DbResult};

/// Synchronous string storage keyed by name
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DbResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DbResult<()>;
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = datetime('now')
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let mut entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn sqlite() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_sqlite_get_missing_key() {
        let db = sqlite();
        assert_eq!(db.get("current-day").unwrap(), None);
    }

    #[test]
    fn test_sqlite_set_overwrites() {
        let db = sqlite();
        db.set("current-day", "{\"a\":1}").unwrap();
        db.set("current-day", "{\"a\":2}").unwrap();
        assert_eq!(db.get("current-day").unwrap().as_deref(), Some("{\"a\":2}"));
    }

    #[test]
    fn test_sqlite_without_schema_errors() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("current-day").is_err());
        assert!(db.set("current-day", "{}").is_err());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("history-log").unwrap(), None);
        store.set("history-log", "[]").unwrap();
        assert_eq!(store.get("history-log").unwrap().as_deref(), Some("[]"));
    }
}
