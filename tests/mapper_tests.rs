// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use finwatch::mapper::{map_all, map_raw, map_to_view_record};
use finwatch::models::{RawTransaction, TransactionKind};
use serde_json::{Value, json};

fn raw(amount: Value, kind: &str, date: Value) -> Value {
    json!({
        "id": "tx-1",
        "parameters": {
            "amount": amount,
            "type": kind,
            "category": "Food",
            "date": date,
            "description": "Lunch"
        }
    })
}

#[test]
fn numeric_string_amount_is_parsed() {
    let rec = map_to_view_record(&raw(json!("123.45"), "income", json!("2024-01-15"))).unwrap();
    assert_eq!(rec.amount, 123.45);
    assert_eq!(rec.kind, TransactionKind::Income);
    assert_eq!(rec.id, "tx-1");
    assert_eq!(rec.category, "Food");
    assert_eq!(rec.description.as_deref(), Some("Lunch"));
}

#[test]
fn negative_and_fractional_amounts_are_accepted() {
    let rec = map_to_view_record(&raw(json!(-0.5), "expense", json!("2024-01-15"))).unwrap();
    assert_eq!(rec.amount, -0.5);
    let rec = map_to_view_record(&raw(json!(" 7.25 "), "expense", json!("2024-01-15"))).unwrap();
    assert_eq!(rec.amount, 7.25);
}

#[test]
fn non_numeric_amount_fails() {
    for bad in [json!("abc"), json!(""), json!("NaN"), json!("inf"), json!(true), json!(null)] {
        let err = map_to_view_record(&raw(bad.clone(), "income", json!("2024-01-15")))
            .expect_err(&format!("{} should be rejected", bad));
        assert!(err.has_issue("parameters.amount"), "{}", err);
    }
}

#[test]
fn amount_with_trailing_text_fails() {
    for bad in ["12abc", "12.5 EUR", "1,5"] {
        let err = map_to_view_record(&raw(json!(bad), "income", json!("2024-01-15"))).unwrap_err();
        assert!(err.has_issue("parameters.amount"), "{}", bad);
    }
}

#[test]
fn unknown_kind_fails() {
    let err = map_to_view_record(&raw(json!(10), "transfer", json!("2024-01-15"))).unwrap_err();
    assert!(err.has_issue("parameters.type"));
    assert!(err.to_string().contains("income, expense"));
}

#[test]
fn date_only_string_passes_through_unchanged() {
    let rec = map_to_view_record(&raw(json!(1), "income", json!("2024-01-15"))).unwrap();
    assert_eq!(rec.date, "2024-01-15");
}

#[test]
fn iso_datetime_string_passes_through_unchanged() {
    let rec = map_to_view_record(&raw(json!(1), "income", json!("2024-01-15T10:30:00Z"))).unwrap();
    assert_eq!(rec.date, "2024-01-15T10:30:00Z");
    let rec =
        map_to_view_record(&raw(json!(1), "income", json!("2024-01-15T10:30:00.123Z"))).unwrap();
    assert_eq!(rec.date, "2024-01-15T10:30:00.123Z");
}

#[test]
fn date_value_is_rendered_as_iso_string() {
    let when = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let tx = RawTransaction::new("tx-9")
        .with_param("amount", 5)
        .with_param("type", "expense")
        .with_param("category", "Transport")
        .with_date_value(when);
    let rec = map_raw(&tx).unwrap();
    assert_eq!(rec.date, "2024-01-15T10:30:00.000Z");
    assert_eq!(rec.description, None);
}

#[test]
fn malformed_date_fails() {
    for bad in [
        json!("15/01/2024"),
        json!("yesterday"),
        json!("2024-01-15T10:00:00+03:00"),
        json!("2024-01-15T10:00:00"),
        json!(1.5),
        json!({}),
    ] {
        let err = map_to_view_record(&raw(json!(1), "income", bad)).unwrap_err();
        assert!(err.has_issue("parameters.date"));
    }
}

#[test]
fn extra_fields_are_tolerated_and_dropped() {
    let v = json!({
        "id": "tx-2",
        "owner": "someone",
        "parameters": {
            "amount": 10,
            "type": "expense",
            "category": "",
            "date": "2024-02-01",
            "currency": "EUR",
            "tags": ["a", "b"]
        }
    });
    let rec = map_to_view_record(&v).unwrap();
    assert_eq!(rec.category, "");
    let out = serde_json::to_value(&rec).unwrap();
    let keys: Vec<&str> = out.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys.len(), 5); // description omitted when absent
    assert!(!keys.contains(&"currency"));
    assert!(!keys.contains(&"tags"));
}

#[test]
fn null_description_counts_as_absent() {
    let mut v = raw(json!(1), "income", json!("2024-01-15"));
    v["parameters"]["description"] = Value::Null;
    assert_eq!(map_to_view_record(&v).unwrap().description, None);

    v["parameters"]["description"] = json!(42);
    let err = map_to_view_record(&v).unwrap_err();
    assert!(err.has_issue("parameters.description"));
}

#[test]
fn id_must_be_a_string() {
    let mut v = raw(json!(1), "income", json!("2024-01-15"));
    v["id"] = json!(17);
    assert!(map_to_view_record(&v).unwrap_err().has_issue("id"));
}

#[test]
fn every_failing_field_is_reported() {
    let v = json!({ "parameters": { "amount": "abc", "type": "transfer", "date": "soon" } });
    let err = map_to_view_record(&v).unwrap_err();
    for path in [
        "id",
        "parameters.amount",
        "parameters.type",
        "parameters.category",
        "parameters.date",
    ] {
        assert!(err.has_issue(path), "missing issue for {}: {}", path, err);
    }
}

#[test]
fn missing_parameters_and_non_object_inputs_fail() {
    assert!(map_to_view_record(&json!({ "id": "x" })).unwrap_err().has_issue("parameters"));
    assert!(map_to_view_record(&json!([1, 2])).is_err());
}

#[test]
fn mapping_is_repeatable() {
    let v = raw(json!("99.9"), "expense", json!("2024-03-03"));
    let a = map_to_view_record(&v).unwrap();
    let b = map_to_view_record(&v).unwrap();
    assert_eq!(a, b);
}

#[test]
fn batch_fails_on_first_bad_record_with_index() {
    let good = raw(json!(1), "income", json!("2024-01-15"));
    let bad = raw(json!("abc"), "income", json!("2024-01-15"));
    assert_eq!(map_all(&[good.clone(), good.clone()]).unwrap().len(), 2);

    let err = map_all(&[good, bad.clone(), bad]).unwrap_err();
    assert_eq!(err.record, Some(1));
    assert!(err.to_string().contains("at index 1"));
}
