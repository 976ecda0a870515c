// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fs;

use finwatch::config::{Config, ENV_API_URL, ENV_LOGIN_URL, ENV_TIMEOUT_SECS};
use finwatch::storage::{KeyValueStorage, MemoryStorage, SqliteStorage, TRANSACTIONS_KEY};
use tempfile::tempdir;

fn exercise(storage: &dyn KeyValueStorage) {
    assert_eq!(storage.get("authToken").unwrap(), None);
    storage.set("authToken", "abc").unwrap();
    assert_eq!(storage.get("authToken").unwrap().as_deref(), Some("abc"));
    storage.set("authToken", "def").unwrap();
    assert_eq!(storage.get("authToken").unwrap().as_deref(), Some("def"));
    storage.remove("authToken").unwrap();
    assert_eq!(storage.get("authToken").unwrap(), None);
    // removing a missing key is fine
    storage.remove("authToken").unwrap();
}

#[test]
fn memory_storage_round_trips_keys() {
    exercise(&MemoryStorage::new());
}

#[test]
fn sqlite_storage_round_trips_keys() {
    exercise(&SqliteStorage::in_memory().unwrap());
}

#[test]
fn sqlite_storage_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("finwatch.sqlite");
    {
        let s = SqliteStorage::open(&path).unwrap();
        s.set(TRANSACTIONS_KEY, "[]").unwrap();
    }
    let s = SqliteStorage::open(&path).unwrap();
    assert_eq!(s.get(TRANSACTIONS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn config_defaults() {
    let cfg = Config::resolve(None, |_| None);
    assert_eq!(cfg.api_base_url, "http://localhost:8080/api");
    assert_eq!(cfg.timeout_secs, 15);
    assert_eq!(cfg.login_url, "/login");
}

#[test]
fn config_file_then_env_then_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "api_base_url": "https://finance.example.com/api/", "timeout_secs": 30 }"#,
    )
    .unwrap();

    let cfg = Config::resolve(Some(&path), |_| None);
    assert_eq!(cfg.api_base_url, "https://finance.example.com/api");
    assert_eq!(cfg.timeout_secs, 30);
    assert_eq!(cfg.login_url, "/login");

    let env: HashMap<&str, &str> = HashMap::from([
        (ENV_API_URL, "http://10.0.0.5:8080/api"),
        (ENV_TIMEOUT_SECS, "5"),
        (ENV_LOGIN_URL, "https://auth.example.com/login"),
    ]);
    let cfg = Config::resolve(Some(&path), |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.api_base_url, "http://10.0.0.5:8080/api");
    assert_eq!(cfg.timeout_secs, 5);
    assert_eq!(cfg.login_url, "https://auth.example.com/login");

    let cfg = cfg.with_api_base_url(" http://127.0.0.1:9000/api/ ");
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000/api");
}

#[test]
fn bad_config_inputs_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "not json").unwrap();
    let cfg = Config::resolve(Some(&path), |k| {
        (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
    });
    assert_eq!(cfg, Config::default());

    let missing = dir.path().join("absent.json");
    assert_eq!(Config::resolve(Some(&missing), |_| None), Config::default());
}
