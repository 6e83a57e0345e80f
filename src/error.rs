//! Error types for subkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for subkv operations
///
/// Point `get` is the only operation that can fail. Every other absence
/// case (partial lookups, relation resolution) degrades to a fallback
/// value instead of surfacing an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("key not found in sublevel")]
    NotFound,
}
