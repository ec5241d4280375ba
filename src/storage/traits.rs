//! Storage trait definitions

use crate::sentiment::{Sentiment, SentimentRecord, UnknownLabel};
use std::path::Path;
use thiserror::Error;

/// Number of records returned by a history query when no limit is given
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record {id}: {source}")]
    CorruptRecord {
        id: i64,
        #[source]
        source: UnknownLabel,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only log of classification events.
///
/// There is deliberately no update or delete operation. Implementations must
/// be thread-safe (Send + Sync): concurrent `record` calls may not lose or
/// corrupt entries.
pub trait HistoryStore: Send + Sync {
    /// Persist one classification, assigning its id and timestamp.
    fn record(&self, text_input: &str, sentiment: Sentiment) -> StorageResult<SentimentRecord>;

    /// Most recent records first, at most `limit` of them.
    ///
    /// Ordered by timestamp descending; equal timestamps fall back to id
    /// descending so the order is stable.
    fn list_recent(&self, limit: usize) -> StorageResult<Vec<SentimentRecord>>;

    /// Total number of records in the log
    fn count(&self) -> StorageResult<usize>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: HistoryStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
