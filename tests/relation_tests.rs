//! Tests for relation resolution
//!
//! These tests verify:
//! - Single-key and array-valued relation expansion inside `get`
//! - Degradation to the original value, field by field
//! - Explicit Resolution outcomes (resolved vs. fallback-with-reason)

use serde_json::{json, Value};
use subkv::{Document, FallbackReason, Resolution, Store, Sublevel};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store() -> Store {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    Store::new()
}

fn doc(data: Value) -> Document {
    match data {
        Value::Object(map) => Document::new(map),
        other => panic!("document data must be an object, got {other}"),
    }
}

fn fields_of(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// =============================================================================
// Expansion Inside `get`
// =============================================================================

#[test]
fn test_get_expands_single_relation() {
    let store = setup_store();
    store.put(
        &Sublevel::from("author"),
        "u1",
        doc(json!({ "body": "bio" })).with_partial(json!({ "name": "Jane" })),
    );
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "author": "u1" })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    assert_eq!(
        entry.value,
        json!({ "author": { "id": "u1", "name": "Jane" }, "body": "x" })
    );
}

#[test]
fn test_get_expands_primitive_partial_relation() {
    let store = setup_store();
    store.put(
        &Sublevel::from("author"),
        "u1",
        doc(json!({ "body": "bio" })).with_partial(json!("Jane")),
    );
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "author": "u1" })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    assert_eq!(entry.value, json!({ "author": "Jane", "body": "x" }));
}

#[test]
fn test_get_expands_array_relation_in_order() {
    let store = setup_store();
    let tags = Sublevel::from("tags");
    store.put(&tags, "t1", doc(json!({ "body": "b1" })).with_partial(json!("rust")));
    store.put(&tags, "t2", doc(json!({ "body": "b2" })).with_partial(json!("db")));
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "tags": ["t2", "t1"] })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    // Input order, not key order.
    assert_eq!(entry.value, json!({ "tags": ["db", "rust"], "body": "x" }));
}

#[test]
fn test_get_relation_missing_falls_back_to_key() {
    let store = setup_store();
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "owner": "u1" })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    assert_eq!(entry.value, json!({ "owner": "u1", "body": "x" }));
}

#[test]
fn test_get_relation_fields_resolve_independently() {
    let store = setup_store();
    store.put(
        &Sublevel::from("author"),
        "u1",
        doc(json!({ "body": "bio" })).with_partial(json!({ "name": "Jane" })),
    );
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "author": "u1", "owner": "nobody" })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    // "author" resolves, the dangling "owner" degrades, neither affects
    // the other.
    assert_eq!(
        entry.value,
        json!({
            "author": { "id": "u1", "name": "Jane" },
            "owner": "nobody",
            "body": "x"
        })
    );
}

#[test]
fn test_get_array_with_dangling_elements_degrades_per_element() {
    let store = setup_store();
    store.put(
        &Sublevel::from("tags"),
        "t1",
        doc(json!({ "body": "b" })).with_partial(json!("rust")),
    );
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "tags": ["t1", "ghost"] })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    assert_eq!(entry.value, json!({ "tags": ["rust", "ghost"], "body": "x" }));
}

#[test]
fn test_get_non_string_relation_value_passes_through() {
    let store = setup_store();
    store.put(
        &Sublevel::from("pages"),
        "a",
        doc(json!({ "body": "x", "views": 42 })),
    );

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    assert_eq!(entry.value, json!({ "views": 42, "body": "x" }));
}

#[test]
fn test_get_body_is_not_a_relation_field() {
    let store = setup_store();
    // A sublevel named "body" must not capture the body entry.
    store.put(
        &Sublevel::from("body"),
        "x",
        doc(json!({ "body": "trap" })).with_partial(json!("TRAP")),
    );
    store.put(&Sublevel::from("pages"), "a", doc(json!({ "body": "x" })));

    let entry = store.get(&Sublevel::from("pages"), "a").unwrap();

    assert_eq!(entry.value, json!({ "body": "x" }));
}

// =============================================================================
// Explicit Resolution Outcomes
// =============================================================================

#[test]
fn test_resolve_relations_reports_resolved() {
    let store = setup_store();
    store.put(
        &Sublevel::from("author"),
        "u1",
        doc(json!({ "body": "bio" })).with_partial(json!({ "name": "Jane" })),
    );

    let fields = fields_of(json!({ "author": "u1" }));
    let resolved = store.resolve_relations(&fields);

    assert_eq!(
        resolved["author"],
        Resolution::Resolved(json!({ "id": "u1", "name": "Jane" }))
    );
    assert!(!resolved["author"].is_fallback());
}

#[test]
fn test_resolve_relations_reports_no_such_record() {
    let store = setup_store();

    let fields = fields_of(json!({ "owner": "u1" }));
    let resolved = store.resolve_relations(&fields);

    assert_eq!(
        resolved["owner"],
        Resolution::Fallback {
            original: json!("u1"),
            reason: FallbackReason::NoSuchRecord,
        }
    );
}

#[test]
fn test_resolve_relations_reports_not_a_key() {
    let store = setup_store();

    let fields = fields_of(json!({ "views": 42 }));
    let resolved = store.resolve_relations(&fields);

    assert_eq!(
        resolved["views"],
        Resolution::Fallback {
            original: json!(42),
            reason: FallbackReason::NotAKey,
        }
    );
}

#[test]
fn test_resolve_relations_sequence_mixes_outcomes() {
    let store = setup_store();
    store.put(
        &Sublevel::from("tags"),
        "t1",
        doc(json!({ "body": "b" })).with_partial(json!("rust")),
    );

    let fields = fields_of(json!({ "tags": ["t1", "ghost", 7] }));
    let resolved = store.resolve_relations(&fields);

    assert_eq!(
        resolved["tags"],
        Resolution::Sequence(vec![
            Resolution::Resolved(json!("rust")),
            Resolution::Fallback {
                original: json!("ghost"),
                reason: FallbackReason::NoSuchRecord,
            },
            Resolution::Fallback {
                original: json!(7),
                reason: FallbackReason::NotAKey,
            },
        ])
    );
    assert!(resolved["tags"].is_fallback());
}

#[test]
fn test_resolution_into_value_flattens_fallbacks() {
    let store = setup_store();
    store.put(
        &Sublevel::from("tags"),
        "t1",
        doc(json!({ "body": "b" })).with_partial(json!("rust")),
    );

    let fields = fields_of(json!({ "tags": ["t1", "ghost"] }));
    let resolved = store.resolve_relations(&fields);

    let value = resolved.get("tags").cloned().unwrap().into_value();
    assert_eq!(value, json!(["rust", "ghost"]));
}
