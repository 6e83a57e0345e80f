//! Relation resolution
//!
//! A record's metadata fields name sibling sublevels; their values are
//! keys (or arrays of keys) into those sublevels. On read, each field
//! expands to the referenced records' partial projections.
//!
//! Resolution is best-effort by contract: a reference that cannot be
//! resolved degrades to its original value, field by field, and never
//! surfaces as an error. The degrade decision is kept explicit in
//! [`Resolution`] rather than hidden in error suppression, so callers
//! (and tests) can observe which branch was taken.

use serde_json::Value;
use tracing::trace;

use crate::query;
use crate::snapshot::Snapshot;

/// Outcome of resolving one relation field
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The reference resolved to a partial projection
    Resolved(Value),

    /// An array field: one resolution per element, in input order
    Sequence(Vec<Resolution>),

    /// The reference could not be resolved; the original value stands
    Fallback {
        original: Value,
        reason: FallbackReason,
    },
}

/// Why a relation value fell back to its original form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The referenced sublevel holds no record under this key (this also
    /// covers a sublevel that does not exist at all)
    NoSuchRecord,

    /// The value is not a string key, so there is nothing to look up
    NotAKey,
}

impl Resolution {
    /// Flatten to the value a caller sees: the projection when resolved,
    /// the original value on fallback
    pub fn into_value(self) -> Value {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::Sequence(items) => {
                Value::Array(items.into_iter().map(Resolution::into_value).collect())
            }
            Resolution::Fallback { original, .. } => original,
        }
    }

    /// Whether this resolution (or any element of a sequence) fell back
    pub fn is_fallback(&self) -> bool {
        match self {
            Resolution::Resolved(_) => false,
            Resolution::Sequence(items) => items.iter().any(Resolution::is_fallback),
            Resolution::Fallback { .. } => true,
        }
    }
}

/// Resolve one metadata field against the sublevel named after it.
///
/// Arrays resolve per element, positionally; anything else resolves as a
/// single reference. Fields are independent: the outcome of one never
/// affects another.
pub(crate) fn resolve_field(snapshot: &Snapshot, field: &str, value: &Value) -> Resolution {
    match value {
        Value::Array(keys) => Resolution::Sequence(
            keys.iter()
                .map(|key| resolve_one(snapshot, field, key))
                .collect(),
        ),
        other => resolve_one(snapshot, field, other),
    }
}

/// Resolve a single reference value.
///
/// The referenced sublevel is always the single-name sublevel matching
/// the field, so the bucket key is the field name itself.
fn resolve_one(snapshot: &Snapshot, field: &str, value: &Value) -> Resolution {
    let Value::String(key) = value else {
        trace!(field, "relation value is not a key, keeping it as-is");
        return Resolution::Fallback {
            original: value.clone(),
            reason: FallbackReason::NotAKey,
        };
    };

    match snapshot.bucket(field).and_then(|bucket| bucket.find(key)) {
        Some(record) => Resolution::Resolved(query::partial_of(Some(record), key)),
        None => {
            trace!(field, key = key.as_str(), "relation reference misses, keeping raw key");
            Resolution::Fallback {
                original: value.clone(),
                reason: FallbackReason::NoSuchRecord,
            }
        }
    }
}
