//! Store
//!
//! The public operation surface, coordinating sublevel addressing, the
//! copy-on-write snapshot, the list pipeline, and the relation resolver.
//!
//! ## Concurrency Model: Single Writer / Lock-Free Readers
//!
//! The store owns one `Arc<Snapshot>` behind a `parking_lot::RwLock`.
//!
//! - **Reads** (get/get_partial/get_list): clone the `Arc` under the
//!   read lock, then work entirely on that private, frozen view. A
//!   reader is never affected by writes that land mid-operation.
//! - **Writes** (put/delete/destroy): read-modify-replace the `Arc`
//!   under the write lock. Publication is a single pointer swap, so no
//!   reader can observe a partial write.
//!
//! A write that has returned is visible to every read issued afterwards,
//! from any thread. Writes racing from multiple threads serialize in
//! lock-acquisition order; callers needing a specific cross-thread order
//! must sequence themselves.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{Result, StoreError};
use crate::query::{self, FieldFilter, ListConfig};
use crate::record::{Document, Entry, Record};
use crate::relation::{self, Resolution};
use crate::snapshot::Snapshot;
use crate::sublevel::Sublevel;

/// An embedded sublevel store
///
/// Cheap to construct, with no global state: each instance is an
/// independent database. Share one across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct Store {
    /// Current snapshot; replaced wholesale on every write
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot to read from. Readers hold this reference, not the
    /// lock, for the duration of their operation.
    fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    // =========================================================================
    // Write Path
    // =========================================================================

    /// Reset the store to the empty snapshot
    pub fn destroy(&self) {
        debug!("destroy");
        *self.snapshot.write() = Arc::new(Snapshot::default());
    }

    /// Insert `document` under `key` in `sub`.
    ///
    /// Replaces any existing record with the same key; the touched
    /// bucket stays sorted descending by key. Never fails.
    pub fn put(&self, sub: &Sublevel, key: &str, document: Document) {
        let bucket_key = sub.bucket_key();
        debug!(sublevel = %bucket_key, key, "put");
        let record = Record::new(key, document);

        let mut guard = self.snapshot.write();
        let next = guard.with_record(&bucket_key, record);
        *guard = Arc::new(next);
    }

    /// Remove `key` from `sub`; removing an absent key is a no-op
    pub fn delete(&self, sub: &Sublevel, key: &str) {
        let bucket_key = sub.bucket_key();
        debug!(sublevel = %bucket_key, key, "delete");

        let mut guard = self.snapshot.write();
        let next = guard.without_record(&bucket_key, key);
        *guard = Arc::new(next);
    }

    // =========================================================================
    // Read Path
    // =========================================================================

    /// Point lookup with relation expansion.
    ///
    /// Splits the record's data into its `body` entry and the remaining
    /// metadata, expands each metadata field against its namesake
    /// sublevel, and returns the combined value. Resolution runs against
    /// the same snapshot as the lookup itself.
    ///
    /// The only failing operation in the store: absent keys are
    /// [`StoreError::NotFound`].
    pub fn get(&self, sub: &Sublevel, key: &str) -> Result<Entry> {
        let snapshot = self.current();
        let bucket_key = sub.bucket_key();
        trace!(sublevel = %bucket_key, key, "get");

        let record = snapshot
            .bucket(&bucket_key)
            .and_then(|bucket| bucket.find(key))
            .ok_or(StoreError::NotFound)?;

        let mut metadata = record.data.clone();
        let body = metadata.remove("body");

        let mut value = Map::with_capacity(metadata.len() + 1);
        for (field, raw) in &metadata {
            let resolution = relation::resolve_field(&snapshot, field, raw);
            value.insert(field.clone(), resolution.into_value());
        }
        if let Some(body) = body {
            value.insert("body".to_string(), body);
        }

        Ok(Entry {
            key: key.to_string(),
            value: Value::Object(value),
        })
    }

    /// Partial projection of a record, degrading to the raw key.
    ///
    /// Never fails: a missing record (or a sublevel that was never
    /// written) yields the key itself. Relation resolution relies on
    /// exactly this fallback.
    pub fn get_partial(&self, sub: &Sublevel, key: &str) -> Value {
        let snapshot = self.current();
        let bucket_key = sub.bucket_key();
        trace!(sublevel = %bucket_key, key, "get_partial");

        let record = snapshot.bucket(&bucket_key).and_then(|bucket| bucket.find(key));
        query::partial_of(record, key)
    }

    /// Key-ordered listing with optional filter, bounds, and limit.
    ///
    /// Entries come back in native descending-key order unless
    /// `config.reverse` is set. Each entry is the record's partial
    /// projection: primitives and sequences wrap under `"value"`,
    /// composite projections spread their fields alongside `"key"`.
    /// Never fails; an unknown sublevel lists as empty.
    pub fn get_list(
        &self,
        sub: &Sublevel,
        config: &ListConfig,
        filter: Option<FieldFilter<'_>>,
    ) -> Vec<Value> {
        let snapshot = self.current();
        let bucket_key = sub.bucket_key();
        trace!(sublevel = %bucket_key, ?config, "get_list");

        let Some(bucket) = snapshot.bucket(&bucket_key) else {
            return Vec::new();
        };
        query::select(bucket, config, filter)
            .into_iter()
            .map(query::project)
            .collect()
    }

    /// Resolve a metadata map field-by-field, keeping each outcome
    /// explicit.
    ///
    /// [`Store::get`] uses the same resolution internally and flattens
    /// fallbacks to their original values; this surface exposes the
    /// resolved-vs-fallback branch itself.
    pub fn resolve_relations(&self, fields: &Map<String, Value>) -> BTreeMap<String, Resolution> {
        let snapshot = self.current();
        fields
            .iter()
            .map(|(field, value)| {
                (field.clone(), relation::resolve_field(&snapshot, field, value))
            })
            .collect()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of records currently stored in `sub`
    pub fn record_count(&self, sub: &Sublevel) -> usize {
        self.current()
            .bucket(&sub.bucket_key())
            .map_or(0, |bucket| bucket.len())
    }

    /// Whether the store holds no records at all
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}
