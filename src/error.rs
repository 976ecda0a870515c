// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use thiserror::Error;

/// One field that failed the View Record contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Raised when a raw transaction does not satisfy the View Record shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transaction{}: {}", record_suffix(.record), join_issues(.issues))]
pub struct ValidationError {
    /// Position of the offending record when mapping a batch.
    pub record: Option<usize>,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self {
            record: None,
            issues,
        }
    }

    pub fn at_record(mut self, index: usize) -> Self {
        self.record = Some(index);
        self
    }

    pub fn has_issue(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }
}

fn record_suffix(record: &Option<usize>) -> String {
    match record {
        Some(i) => format!(" at index {}", i),
        None => String::new(),
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session expired, log in again at {login_url}")]
    Unauthorized { login_url: String },

    #[error("server responded with {status}{}", message_suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl GatewayError {
    /// Message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage location unavailable: {0}")]
    Location(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
