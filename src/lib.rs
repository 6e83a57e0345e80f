//! # subkv
//!
//! An embedded, in-process key-value store partitioned into named
//! "sublevels" (column-family-like partitions), with:
//! - Copy-on-write snapshots (readers never observe partial writes)
//! - Key-ordered listing with range bounds, field filtering, and limits
//! - Read-time relation resolution: record fields referencing other
//!   sublevels expand to those records' partial projections
//!
//! The store is single-process and memory-resident; it gives an
//! application a minimal document-store abstraction without an external
//! database process.
//!
//! ## Architecture Overview
//!
//! ```text
//!        put / delete                     get / get_list
//!             │                                 │
//!             ▼                                 ▼
//!   ┌──────────────────┐             ┌──────────────────┐
//!   │    Addressing    │             │    Addressing    │
//!   │ (sublevel → key) │             │ (sublevel → key) │
//!   └────────┬─────────┘             └────────┬─────────┘
//!            │                                │
//!            ▼                                ▼
//!   ┌──────────────────┐             ┌──────────────────┐
//!   │   Bucket Store   │             │ Query Evaluator  │
//!   │  (new snapshot)  │             │  (find / filter) │
//!   └──────────────────┘             └────────┬─────────┘
//!                                             │
//!                                             ▼
//!                                    ┌──────────────────┐
//!                                    │ Relation Resolver│
//!                                    │  (expand fields) │
//!                                    └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod query;
pub mod record;
pub mod relation;
mod snapshot;
pub mod store;
pub mod sublevel;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use query::{FieldFilter, ListConfig};
pub use record::{Document, Entry, Record};
pub use relation::{FallbackReason, Resolution};
pub use store::Store;
pub use sublevel::Sublevel;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of subkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
