// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::load;
use crate::gateway::TransactionGateway;
use crate::models::Statistics;
use crate::store::FinancialStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("by-category", sub)) => by_category(store, sub)?,
        Some(("stats", sub)) => stats(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn summary_rows(s: &Statistics) -> Vec<Vec<String>> {
    vec![
        vec!["Balance".into(), fmt_money(s.total_balance)],
        vec!["Income".into(), fmt_money(s.total_income)],
        vec!["Expenses".into(), fmt_money(s.total_expenses)],
    ]
}

pub fn category_rows(s: &Statistics) -> Vec<Vec<String>> {
    s.by_category
        .iter()
        .map(|(cat, amt)| vec![cat.clone(), fmt_money(*amt)])
        .collect()
}

fn summary<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    load(store);
    let s = store.summary();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        println!("{}", pretty_table(&["", "Amount"], summary_rows(&s)));
    }
    Ok(())
}

fn by_category<G: TransactionGateway>(
    store: &mut FinancialStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    load(store);
    let totals = store.transactions_by_category();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let rows = totals
            .iter()
            .map(|(cat, amt)| vec![cat.clone(), fmt_money(*amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Net"], rows));
    }
    Ok(())
}

fn stats<G: TransactionGateway>(store: &FinancialStore<G>, sub: &clap::ArgMatches) -> Result<()> {
    let s = store.gateway().statistics()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        println!("{}", pretty_table(&["", "Amount"], summary_rows(&s)));
        if !s.by_category.is_empty() {
            println!("{}", pretty_table(&["Category", "Net"], category_rows(&s)));
        }
    }
    Ok(())
}
