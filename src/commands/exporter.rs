// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};

use super::load;
use crate::gateway::TransactionGateway;
use crate::models::ViewRecord;
use crate::store::FinancialStore;

pub fn handle<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub
        .get_one::<String>("out")
        .context("Missing --out")?
        .trim()
        .to_string();

    load(store);
    let path = Path::new(&out);
    match fmt.as_str() {
        "json" => write_json(path, store.transactions())?,
        _ => write_csv(path, store.transactions())?,
    }
    println!(
        "Exported {} transactions to {}",
        store.transactions().len(),
        out
    );
    Ok(())
}

pub fn write_csv(path: &Path, txs: &[ViewRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Open {} for writing", path.display()))?;
    wtr.write_record(["id", "date", "type", "category", "amount", "description"])?;
    for t in txs {
        let amount = t.amount.to_string();
        wtr.write_record([
            t.id.as_str(),
            t.date.as_str(),
            t.kind.as_str(),
            t.category.as_str(),
            amount.as_str(),
            t.description.as_deref().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, txs: &[ViewRecord]) -> Result<()> {
    let data = serde_json::to_string_pretty(txs)?;
    std::fs::write(path, data).with_context(|| format!("Write {}", path.display()))?;
    Ok(())
}
