//! Immutable store snapshots
//!
//! A snapshot is the complete state of every sublevel at one point in
//! time. Mutations never touch a published snapshot: they derive a new
//! one that shares every untouched bucket structurally, so a reader
//! holding a snapshot keeps a consistent view for as long as it wants.

use std::collections::HashMap;
use std::sync::Arc;

use crate::record::Record;

/// One sublevel's records, sorted descending by key
///
/// The descending order is maintained on every insert, so list reads
/// never sort. Keys are unique within a bucket: inserts replace.
#[derive(Debug, Default)]
pub(crate) struct Bucket {
    records: Vec<Arc<Record>>,
}

impl Bucket {
    /// All records in native (descending-by-key) order
    pub(crate) fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// First record matching `key`
    pub(crate) fn find(&self, key: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.key == key).map(Arc::as_ref)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// New bucket with `record` at its sort position, replacing any
    /// existing record under the same key
    fn with_record(&self, record: Record) -> Bucket {
        let mut records: Vec<Arc<Record>> = self
            .records
            .iter()
            .filter(|existing| existing.key != record.key)
            .cloned()
            .collect();
        let at = records.partition_point(|existing| existing.key > record.key);
        records.insert(at, Arc::new(record));
        Bucket { records }
    }

    /// New bucket without `key`
    fn without_key(&self, key: &str) -> Bucket {
        Bucket {
            records: self
                .records
                .iter()
                .filter(|existing| existing.key != key)
                .cloned()
                .collect(),
        }
    }
}

/// The complete immutable state of all sublevels
///
/// Buckets exist only while they hold records, so an empty map means an
/// empty store.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    subs: HashMap<String, Arc<Bucket>>,
}

impl Snapshot {
    /// The bucket addressed by `bucket_key`, if it has ever been written
    pub(crate) fn bucket(&self, bucket_key: &str) -> Option<&Bucket> {
        self.subs.get(bucket_key).map(Arc::as_ref)
    }

    /// Derive a snapshot with `record` merged into `bucket_key`.
    ///
    /// The touched bucket is rebuilt; every other bucket is shared with
    /// the source snapshot.
    pub(crate) fn with_record(&self, bucket_key: &str, record: Record) -> Snapshot {
        let bucket = match self.subs.get(bucket_key) {
            Some(existing) => existing.with_record(record),
            None => Bucket::default().with_record(record),
        };
        let mut subs = self.subs.clone();
        subs.insert(bucket_key.to_string(), Arc::new(bucket));
        Snapshot { subs }
    }

    /// Derive a snapshot with `key` removed from `bucket_key`.
    ///
    /// Removing the last record removes the bucket entry itself; an
    /// absent key derives an observably identical snapshot.
    pub(crate) fn without_record(&self, bucket_key: &str, key: &str) -> Snapshot {
        let mut subs = self.subs.clone();
        if let Some(existing) = self.subs.get(bucket_key) {
            let bucket = existing.without_key(key);
            if bucket.records.is_empty() {
                subs.remove(bucket_key);
            } else {
                subs.insert(bucket_key.to_string(), Arc::new(bucket));
            }
        }
        Snapshot { subs }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}
