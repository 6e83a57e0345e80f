//! Record model
//!
//! The stored item shape and the payloads exchanged with callers.
//! Record data is opaque JSON: a `body` entry plus zero or more relation
//! fields whose values are keys (or arrays of keys) into the sublevels
//! named after those fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload accepted by [`Store::put`](crate::Store::put)
///
/// `partial` is the reduced shape exposed when *other* records reference
/// this one through a relation field; records without one project as a
/// bare `{ "id": key }` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque record data: `body` plus relation fields
    pub data: Map<String, Value>,

    /// Projection exposed to relation resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<Value>,
}

impl Document {
    /// Create a document from its data map
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data, partial: None }
    }

    /// Attach a partial projection
    pub fn with_partial(mut self, partial: Value) -> Self {
        self.partial = Some(partial);
        self
    }
}

/// A stored record: the identity key plus the document fields
///
/// Immutable once constructed; writes replace records wholesale. The key
/// always comes from the `put` argument, shadowing anything the payload
/// claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identity key within the sublevel
    pub key: String,

    /// Opaque record data (see [`Document::data`])
    pub data: Map<String, Value>,

    /// Projection exposed to relation resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<Value>,
}

impl Record {
    pub(crate) fn new(key: impl Into<String>, document: Document) -> Self {
        Self {
            key: key.into(),
            data: document.data,
            partial: document.partial,
        }
    }
}

/// Result of a point [`Store::get`](crate::Store::get)
///
/// `value` is the record's resolved metadata with the `body` entry
/// re-attached (when the record has one).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}
