// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::models::{Statistics, TransactionKind, ViewRecord};

// Sums fold from +0.0: an empty list must give 0, not -0.0.

/// Income minus expenses.
pub fn total_balance(txs: &[ViewRecord]) -> f64 {
    txs.iter()
        .map(|t| t.kind.signed(t.amount))
        .fold(0.0, |acc, x| acc + x)
}

pub fn income(txs: &[ViewRecord]) -> f64 {
    sum_of(txs, TransactionKind::Income)
}

pub fn expenses(txs: &[ViewRecord]) -> f64 {
    sum_of(txs, TransactionKind::Expense)
}

fn sum_of(txs: &[ViewRecord], kind: TransactionKind) -> f64 {
    txs.iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .fold(0.0, |acc, x| acc + x)
}

/// Net amount per category: income adds, expense subtracts.
pub fn by_category(txs: &[ViewRecord]) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    for t in txs {
        *out.entry(t.category.clone()).or_insert(0.0) += t.kind.signed(t.amount);
    }
    out
}

pub fn summary(txs: &[ViewRecord]) -> Statistics {
    Statistics {
        total_balance: total_balance(txs),
        total_income: income(txs),
        total_expenses: expenses(txs),
        by_category: by_category(txs),
    }
}
