// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local key-value storage shared by the gateway (session token) and the
//! store (transaction mirror).

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db;
use crate::error::StorageError;

/// Key holding the bearer token attached to API requests.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Key holding the JSON mirror of the loaded transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the storage file in the platform data dir.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self {
            conn: db::open_or_init()?,
        })
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            conn: db::open_at(path)?,
        })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO local_storage(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key=?1", params![key])?;
        Ok(())
    }
}
