// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::db;
use crate::error::StorageError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOGIN_URL: &str = "/login";

pub const ENV_API_URL: &str = "FINWATCH_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "FINWATCH_TIMEOUT_SECS";
pub const ENV_LOGIN_URL: &str = "FINWATCH_LOGIN_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Where the user is sent after the API rejects the session token.
    pub login_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            login_url: DEFAULT_LOGIN_URL.into(),
        }
    }
}

impl Config {
    /// Defaults, then `config.json` in the platform config dir, then the
    /// environment.
    pub fn load() -> Result<Self, StorageError> {
        let path = config_path()?;
        Ok(Self::resolve(Some(&path), |k| std::env::var(k).ok()))
    }

    pub fn resolve<F>(file: Option<&Path>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = file.and_then(read_file).unwrap_or_default();

        if let Some(url) = env(ENV_API_URL) {
            cfg.api_base_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => cfg.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
        if let Some(url) = env(ENV_LOGIN_URL) {
            cfg.login_url = url;
        }
        cfg.api_base_url = cfg.api_base_url.trim_end_matches('/').to_string();
        cfg
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }
}

pub fn config_path() -> Result<PathBuf, StorageError> {
    let proj = db::project_dirs()?;
    Ok(proj.config_dir().join("config.json"))
}

fn read_file(path: &Path) -> Option<Config> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(cfg) => {
            debug!(path = %path.display(), "loaded config file");
            Some(cfg)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}
