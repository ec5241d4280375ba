//! Storage backends for the analysis history
//!
//! The history log is accessed through the `HistoryStore` trait.
//! The primary implementation is `SqliteStore` for persistent storage.

mod sqlite;
mod traits;

pub use sqlite::{Clock, SqliteStore, TIMESTAMP_FORMAT};
pub use traits::{HistoryStore, OpenStore, StorageError, StorageResult, DEFAULT_HISTORY_LIMIT};
