//! List pipeline and partial projection
//!
//! Key-ordered listing over one sublevel. The stage order is a contract:
//! filter → reverse → bound → limit → project. Filtering always runs on
//! the native (descending) order before any reversal, and limiting
//! always runs after bounding.

use serde_json::{Map, Value};

use crate::record::Record;
use crate::snapshot::Bucket;

/// Range and shaping options for [`Store::get_list`](crate::Store::get_list)
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    /// Strict lower bound on keys (`key > gt`)
    pub gt: Option<String>,

    /// Strict upper bound on keys (`key < lt`); ignored when `gt` is set
    pub lt: Option<String>,

    /// Reverse the native descending order into ascending
    pub reverse: bool,

    /// Keep at most this many entries, from the front of the current order
    pub limit: Option<usize>,
}

/// Exact-equality predicate on a single `data` field
#[derive(Debug, Clone, Copy)]
pub struct FieldFilter<'a> {
    pub field: &'a str,
    pub value: &'a Value,
}

/// Run the filter → reverse → bound → limit stages over a bucket
pub(crate) fn select<'a>(
    bucket: &'a Bucket,
    config: &ListConfig,
    filter: Option<FieldFilter<'_>>,
) -> Vec<&'a Record> {
    let mut selected: Vec<&Record> = bucket
        .records()
        .iter()
        .map(|record| record.as_ref())
        .filter(|record| match filter {
            Some(filter) => record.data.get(filter.field) == Some(filter.value),
            None => true,
        })
        .collect();

    if config.reverse {
        selected.reverse();
    }

    if let Some(gt) = &config.gt {
        selected.retain(|record| record.key.as_str() > gt.as_str());
    } else if let Some(lt) = &config.lt {
        selected.retain(|record| record.key.as_str() < lt.as_str());
    }

    if let Some(limit) = config.limit {
        selected.truncate(limit);
    }

    selected
}

/// Partial projection of a record, with the raw key as fallback.
///
/// A missing record projects as its bare key, which is what lets broken
/// relation references degrade gracefully. Primitive partials pass
/// through unchanged; composite partials are tagged with their own key
/// as `id` (a partial carrying its own `id` keeps it). Records without a
/// partial project as the bare `{ "id": key }` object. Array partials
/// pass through as sequences.
pub(crate) fn partial_of(record: Option<&Record>, key: &str) -> Value {
    let Some(record) = record else {
        return Value::String(key.to_string());
    };
    match &record.partial {
        Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => value.clone(),
        Some(Value::Array(items)) => Value::Array(items.clone()),
        Some(Value::Object(fields)) => {
            let mut projected = Map::with_capacity(fields.len() + 1);
            projected.insert("id".to_string(), Value::String(key.to_string()));
            projected.extend(fields.clone());
            Value::Object(projected)
        }
        Some(Value::Null) | None => {
            let mut projected = Map::with_capacity(1);
            projected.insert("id".to_string(), Value::String(key.to_string()));
            Value::Object(projected)
        }
    }
}

/// Project one surviving record into a list entry.
///
/// Primitive and sequence projections wrap under `value`; composite
/// projections surface their own fields alongside the key. The record
/// key always wins over a projection field of the same name.
pub(crate) fn project(record: &Record) -> Value {
    let key = Value::String(record.key.clone());
    match partial_of(Some(record), &record.key) {
        Value::Object(fields) => {
            let mut entry = Map::with_capacity(fields.len() + 1);
            entry.extend(fields);
            entry.insert("key".to_string(), key);
            Value::Object(entry)
        }
        value => {
            let mut entry = Map::with_capacity(2);
            entry.insert("key".to_string(), key);
            entry.insert("value".to_string(), value);
            Value::Object(entry)
        }
    }
}
