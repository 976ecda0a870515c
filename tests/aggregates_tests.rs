// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finwatch::aggregates::{by_category, expenses, income, summary, total_balance};
use finwatch::models::{TransactionKind, ViewRecord};

fn tx(id: &str, kind: TransactionKind, amount: f64, category: &str) -> ViewRecord {
    ViewRecord {
        id: id.into(),
        amount,
        kind,
        category: category.into(),
        date: "2024-01-15".into(),
        description: None,
    }
}

#[test]
fn balance_income_and_expenses() {
    let txs = vec![
        tx("1", TransactionKind::Income, 100.0, "Salary"),
        tx("2", TransactionKind::Expense, 40.0, "Food"),
    ];
    assert_eq!(total_balance(&txs), 60.0);
    assert_eq!(income(&txs), 100.0);
    assert_eq!(expenses(&txs), 40.0);
}

#[test]
fn empty_list_is_all_zero() {
    assert_eq!(total_balance(&[]), 0.0);
    assert_eq!(income(&[]), 0.0);
    assert_eq!(expenses(&[]), 0.0);
    assert!(by_category(&[]).is_empty());
    for v in [total_balance(&[]), income(&[]), expenses(&[])] {
        assert!(!v.is_sign_negative());
    }
    let json = serde_json::to_string(&summary(&[])).unwrap();
    assert!(!json.contains("-0"), "{}", json);
}

#[test]
fn one_sided_lists_keep_positive_zero() {
    let only_income = vec![tx("1", TransactionKind::Income, 10.0, "Salary")];
    assert!(!expenses(&only_income).is_sign_negative());
    let only_expense = vec![tx("2", TransactionKind::Expense, 10.0, "Food")];
    assert!(!income(&only_expense).is_sign_negative());
}

#[test]
fn category_totals_are_net() {
    let txs = vec![
        tx("1", TransactionKind::Income, 50.0, "Food"),
        tx("2", TransactionKind::Expense, 20.0, "Food"),
        tx("3", TransactionKind::Expense, 15.0, "Transport"),
    ];
    let cats = by_category(&txs);
    assert_eq!(cats["Food"], 30.0);
    assert_eq!(cats["Transport"], -15.0);
    assert_eq!(cats.len(), 2);
}

#[test]
fn summary_matches_individual_figures() {
    let txs = vec![
        tx("1", TransactionKind::Income, 1200.0, "Salary"),
        tx("2", TransactionKind::Expense, 300.5, "Housing"),
    ];
    let s = summary(&txs);
    assert_eq!(s.total_balance, 899.5);
    assert_eq!(s.total_income, 1200.0);
    assert_eq!(s.total_expenses, 300.5);
    assert_eq!(s.by_category["Housing"], -300.5);

    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["totalBalance"], 899.5);
    assert!(json.get("byCategory").is_some());
}
