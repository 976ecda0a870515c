// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Trust boundary between API payloads and store state.
//!
//! Ingress is open: `parameters` may carry any number of extra keys and they
//! never fail validation. Egress is closed: only the six View Record fields
//! are copied out.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{FieldIssue, ValidationError};
use crate::models::{RawTransaction, TransactionKind, ViewRecord};

static DATE_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const REQUIRED: &str = "Required";

/// Validate an arbitrary JSON value and project it into a `ViewRecord`.
///
/// Every failing field is reported; no partial record is ever returned.
pub fn map_to_view_record(raw: &Value) -> Result<ViewRecord, ValidationError> {
    let obj = match raw.as_object() {
        Some(o) => o,
        None => {
            return Err(ValidationError::new(vec![FieldIssue::new(
                "<root>",
                format!("expected object, received {}", type_name(raw)),
            )]));
        }
    };

    let mut issues = Vec::new();

    let id = match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue::new(
                "id",
                format!("expected string, received {}", type_name(other)),
            ));
            None
        }
        None => {
            issues.push(FieldIssue::new("id", REQUIRED));
            None
        }
    };

    let params = match obj.get("parameters") {
        Some(Value::Object(p)) => Some(p),
        Some(other) => {
            issues.push(FieldIssue::new(
                "parameters",
                format!("expected object, received {}", type_name(other)),
            ));
            None
        }
        None => {
            issues.push(FieldIssue::new("parameters", REQUIRED));
            None
        }
    };

    let fields = params.map(|p| check_parameters(p, &mut issues));

    match (id, fields) {
        (
            Some(id),
            Some(Fields {
                amount: Some(amount),
                kind: Some(kind),
                category: Some(category),
                date: Some(date),
                description,
            }),
        ) if issues.is_empty() => Ok(ViewRecord {
            id,
            amount,
            kind,
            category,
            date,
            description,
        }),
        _ => Err(ValidationError::new(issues)),
    }
}

/// Typed convenience over [`map_to_view_record`].
pub fn map_raw(raw: &RawTransaction) -> Result<ViewRecord, ValidationError> {
    map_to_view_record(&raw.to_value())
}

/// Map a whole batch. The first bad record fails the batch and its index is
/// recorded on the error.
pub fn map_all(raws: &[Value]) -> Result<Vec<ViewRecord>, ValidationError> {
    raws.iter()
        .enumerate()
        .map(|(i, raw)| map_to_view_record(raw).map_err(|e| e.at_record(i)))
        .collect()
}

struct Fields {
    amount: Option<f64>,
    kind: Option<TransactionKind>,
    category: Option<String>,
    date: Option<String>,
    description: Option<String>,
}

fn check_parameters(p: &Map<String, Value>, issues: &mut Vec<FieldIssue>) -> Fields {
    let amount = match p.get("amount") {
        Some(v) => parse_amount(v)
            .map_err(|m| issues.push(FieldIssue::new("parameters.amount", m)))
            .ok(),
        None => {
            issues.push(FieldIssue::new("parameters.amount", REQUIRED));
            None
        }
    };

    let kind = match p.get("type") {
        Some(Value::String(s)) => {
            let k = TransactionKind::parse(s);
            if k.is_none() {
                issues.push(FieldIssue::new(
                    "parameters.type",
                    format!("expected one of: income, expense, received '{}'", s),
                ));
            }
            k
        }
        Some(other) => {
            issues.push(FieldIssue::new(
                "parameters.type",
                format!("expected one of: income, expense, received {}", type_name(other)),
            ));
            None
        }
        None => {
            issues.push(FieldIssue::new("parameters.type", REQUIRED));
            None
        }
    };

    let category = match p.get("category") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue::new(
                "parameters.category",
                format!("expected string, received {}", type_name(other)),
            ));
            None
        }
        None => {
            issues.push(FieldIssue::new("parameters.category", REQUIRED));
            None
        }
    };

    let date = match p.get("date") {
        Some(v) => normalize_date(v)
            .map_err(|m| issues.push(FieldIssue::new("parameters.date", m)))
            .ok(),
        None => {
            issues.push(FieldIssue::new("parameters.date", REQUIRED));
            None
        }
    };

    let description = match p.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue::new(
                "parameters.description",
                format!("expected string, received {}", type_name(other)),
            ));
            None
        }
    };

    Fields {
        amount,
        kind,
        category,
        date,
        description,
    }
}

fn parse_amount(v: &Value) -> Result<f64, String> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => {
            return Err(format!(
                "expected number or numeric string, received {}",
                type_name(other)
            ));
        }
    };
    match n {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err("Amount must be a valid number".to_string()),
    }
}

fn normalize_date(v: &Value) -> Result<String, String> {
    match v {
        Value::String(s) => {
            if DATE_ONLY.is_match(s) || is_utc_datetime(s) {
                Ok(s.clone())
            } else {
                Err(format!(
                    "expected ISO-8601 UTC datetime ending in Z or YYYY-MM-DD date, received '{}'",
                    s
                ))
            }
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
            .ok_or_else(|| format!("invalid date value {}", n)),
        other => Err(format!(
            "expected date string or date value, received {}",
            type_name(other)
        )),
    }
}

/// RFC 3339 datetime in UTC, written with a `Z` suffix. Numeric offsets
/// such as `+03:00` are not accepted.
pub fn is_utc_datetime(s: &str) -> bool {
    s.ends_with('Z') && DateTime::parse_from_rfc3339(s).is_ok()
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
