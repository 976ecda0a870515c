// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value, json};

use super::{load, report_store_error};
use crate::gateway::TransactionGateway;
use crate::mapper::map_raw;
use crate::models::{TransactionKind, TransactionParameters, ViewRecord};
use crate::store::FinancialStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("page", sub)) => page(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("add", sub)) => add(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub),
        _ => {}
    }
    Ok(())
}

pub fn table_rows(txs: &[ViewRecord]) -> Vec<Vec<String>> {
    txs.iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.date.clone(),
                t.kind.to_string(),
                t.category.clone(),
                fmt_money(t.amount),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

const HEADERS: [&str; 6] = ["ID", "Date", "Type", "Category", "Amount", "Description"];

fn print_records(sub: &clap::ArgMatches, txs: &[ViewRecord]) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        println!("{}", pretty_table(&HEADERS, table_rows(txs)));
    }
    Ok(())
}

fn list<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    load(store);
    print_records(sub, store.transactions())
}

fn page<G: TransactionGateway>(
    store: &FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let page = *sub.get_one::<u32>("page").unwrap_or(&0);
    let size = *sub
        .get_one::<u32>("size")
        .unwrap_or(&crate::gateway::DEFAULT_PAGE_SIZE);
    let resp = store.gateway().list_page(page, size)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &resp)? {
        let rows: Vec<Vec<String>> = resp
            .content
            .iter()
            .map(|raw| {
                let id = match &raw.id {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                vec![id, Value::Object(raw.parameters.clone()).to_string()]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Parameters"], rows));
        println!(
            "page {} of {} ({} transactions in total)",
            resp.number + 1,
            resp.total_pages.max(1),
            resp.total_elements
        );
    }
    Ok(())
}

fn show<G: TransactionGateway>(
    store: &FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = required(sub, "id")?;
    let raw = store.gateway().get_one(id)?;
    let rec = map_raw(&raw).with_context(|| format!("Transaction '{}' is malformed", id))?;
    print_records(sub, std::slice::from_ref(&rec))
}

/// Collects the create request from `tx add` arguments.
pub fn build_params(sub: &clap::ArgMatches) -> Result<TransactionParameters> {
    let amount = parse_amount(required(sub, "amount")?)?;
    let kind = parse_kind(required(sub, "type")?)?;
    let category = required(sub, "category")?.to_string();
    let date = parse_date(required(sub, "date")?)?;
    let description = sub.get_one::<String>("description").cloned();
    Ok(TransactionParameters {
        amount,
        kind,
        category,
        date,
        description,
    })
}

/// Collects the partial transaction sent by `tx update`. Only the flags that
/// were given end up under `parameters`.
pub fn build_patch(sub: &clap::ArgMatches) -> Result<Value> {
    let id = required(sub, "id")?;
    let mut params = Map::new();
    if let Some(a) = sub.get_one::<String>("amount") {
        params.insert("amount".into(), json!(parse_amount(a)?));
    }
    if let Some(k) = sub.get_one::<String>("type") {
        params.insert("type".into(), json!(parse_kind(k)?.as_str()));
    }
    if let Some(c) = sub.get_one::<String>("category") {
        params.insert("category".into(), json!(c));
    }
    if let Some(d) = sub.get_one::<String>("date") {
        params.insert("date".into(), json!(parse_date(d)?));
    }
    if let Some(d) = sub.get_one::<String>("description") {
        params.insert("description".into(), json!(d));
    }
    if params.is_empty() {
        return Err(anyhow!("Nothing to update for '{}'", id));
    }
    Ok(json!({ "id": id, "parameters": params }))
}

fn add<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let params = build_params(sub)?;
    // start from the mirror so the append below does not drop earlier records
    store.load_from_mirror();
    match store.add_transaction(&params) {
        Some(tx) => println!(
            "Recorded {} {} in '{}' on {} (id: {})",
            tx.kind,
            fmt_money(tx.amount),
            tx.category,
            tx.date,
            tx.id
        ),
        None => report_store_error(store),
    }
    Ok(())
}

fn update<G: TransactionGateway>(
    store: &FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = build_patch(sub)?;
    let raw = store.gateway().update(id, &patch)?;
    let rec = map_raw(&raw).with_context(|| format!("Server returned a malformed '{}'", id))?;
    println!(
        "Updated {}: {} {} in '{}' on {}",
        rec.id,
        rec.kind,
        fmt_money(rec.amount),
        rec.category,
        rec.date
    );
    Ok(())
}

fn rm<G: TransactionGateway>(store: &mut FinancialStore<G>, sub: &clap::ArgMatches) {
    let Some(id) = sub.get_one::<String>("id") else {
        return;
    };
    store.load_from_mirror();
    store.delete_transaction(id);
    report_store_error(store);
    println!("Removed transaction '{}'", id);
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("Missing --{}", name))
}

fn parse_kind(s: &str) -> Result<TransactionKind> {
    TransactionKind::parse(s)
        .ok_or_else(|| anyhow!("Invalid type '{}', expected income or expense", s))
}
