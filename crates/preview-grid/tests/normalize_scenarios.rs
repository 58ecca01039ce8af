//! Normalization scenarios against realistic sync output
//!
//! The fixtures mirror what a contacts sync writes: flat primitives mixed with
//! nested address objects and tag arrays.

use pretty_assertions::assert_eq;
use preview_grid::{normalize, Cell, RecordSet};
use serde_json::json;

fn contacts() -> RecordSet {
    let body = r#"[
        {"id": "c-001", "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com",
         "score": 98.5, "active": true, "address": {"city": "London", "zip": "N1"}, "tags": ["vip"]},
        {"id": "c-002", "first_name": "Lin", "last_name": "Wei", "email": null,
         "score": 71, "active": false, "address": null, "tags": []}
    ]"#;
    serde_json::from_str(body).unwrap()
}

#[test]
fn header_follows_source_field_order() {
    let grid = normalize(Some(&contacts())).unwrap();
    assert_eq!(
        grid.field_names(),
        vec!["id", "first_name", "last_name", "email", "score", "active", "address", "tags"]
    );
}

#[test]
fn nested_values_are_json_text() {
    let grid = normalize(Some(&contacts())).unwrap();
    let first = grid.row(1).unwrap();
    assert_eq!(first[6], Cell::text(r#"{"city":"London","zip":"N1"}"#));
    assert_eq!(first[7], Cell::text(r#"["vip"]"#));

    let second = grid.row(2).unwrap();
    assert_eq!(second[3], Cell::Null);
    assert_eq!(second[6], Cell::Null);
    assert_eq!(second[7], Cell::text("[]"));
}

#[test]
fn numbers_and_booleans_stay_native() {
    let grid = normalize(Some(&contacts())).unwrap();
    assert_eq!(grid.row(1).unwrap()[4].to_value(), json!(98.5));
    assert_eq!(grid.row(2).unwrap()[4].to_value(), json!(71));
    assert_eq!(grid.row(1).unwrap()[5], Cell::Bool(true));
}

#[test]
fn single_record_gives_header_and_one_row() {
    let set = RecordSet::from_value(json!([{"nested": {"nested": true}}])).unwrap();
    let grid = normalize(Some(&set)).unwrap();
    assert_eq!(grid.to_value(), json!([["nested"], ["{\"nested\":true}"]]));
}

#[test]
fn order_is_preserved_without_dedup() {
    let set = RecordSet::from_value(json!([{"id": 3}, {"id": 1}, {"id": 3}])).unwrap();
    let grid = normalize(Some(&set)).unwrap();
    assert_eq!(grid.to_value(), json!([["id"], [3], [1], [3]]));
}
