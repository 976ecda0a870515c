// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::mapper::is_utc_datetime;

const UA: &str = concat!(
    "finwatch/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/finwatch)"
);

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Logs go to stderr so that table
/// and JSON output on stdout stay clean. `RUST_LOG` overrides the default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("finwatch=info"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::blocking::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .default_headers(headers)
        .build()
}

/// Accepts `YYYY-MM-DD` or a UTC datetime ending in `Z` and returns it
/// unchanged.
pub fn parse_date(s: &str) -> Result<String> {
    let s = s.trim();
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || is_utc_datetime(s) {
        return Ok(s.to_string());
    }
    Err(anyhow!(
        "Invalid date '{}', expected YYYY-MM-DD or an ISO-8601 UTC datetime like 2024-01-15T10:30:00Z",
        s
    ))
}

pub fn parse_amount(s: &str) -> Result<f64> {
    let v = s
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    if !v.is_finite() {
        return Err(anyhow!("Invalid amount '{}'", s));
    }
    Ok(v)
}

pub fn fmt_money(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
