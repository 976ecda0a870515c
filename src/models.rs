// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Sign applied to the amount when it contributes to a balance.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized transaction as held by the store and shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: String, // ISO-8601 datetime or YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Transaction as delivered by the remote API. Nothing in here is trusted
/// until it has been through `mapper::map_to_view_record`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl RawTransaction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Value::String(id.into()),
            parameters: Map::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    /// Stores a date value the way the API encodes one: epoch milliseconds.
    pub fn with_date_value(self, date: DateTime<Utc>) -> Self {
        self.with_param("date", date.timestamp_millis())
    }

    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), self.id.clone());
        obj.insert("parameters".into(), Value::Object(self.parameters.clone()));
        Value::Object(obj)
    }
}

/// Request body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionParameters {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generic envelope wrapped around most API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub size: u64,
    pub number: u64,
}

/// Server-side aggregate figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    #[serde(default)]
    pub by_category: BTreeMap<String, f64>,
}
