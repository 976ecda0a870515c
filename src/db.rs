// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

pub(crate) static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Finwatch", "finwatch"));

pub(crate) fn project_dirs() -> Result<ProjectDirs, StorageError> {
    ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        StorageError::Location("could not determine platform-specific data dir".into())
    })
}

pub fn db_path() -> Result<PathBuf, StorageError> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("finwatch.sqlite"))
}

pub fn open_or_init() -> Result<Connection, StorageError> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS local_storage(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
