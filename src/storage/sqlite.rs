//! SQLite storage backend for the analysis history

use super::traits::{HistoryStore, OpenStore, StorageError, StorageResult};
use crate::sentiment::{Sentiment, SentimentRecord};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Timestamp layout used for stored records.
///
/// Fixed width, so lexicographic order in SQL matches chronological order.
/// Local time without an offset: ordering follows the wall clock, so a
/// backwards clock step (DST fall-back, NTP correction) can rank newer
/// records below older ones.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Source of insert timestamps. Defaults to the local wall clock.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

fn local_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

/// SQLite-backed history store
///
/// A single `sentiments` table with an AUTOINCREMENT key, so ids are never
/// reused even if rows are removed by hand. Thread-safe via internal mutex on
/// the connection; each insert is one statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    clock: Clock,
}

impl SqliteStore {
    /// Initialize the database schema
    ///
    /// Safe to run against an existing database: every statement is
    /// create-if-absent.
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sentiments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text_input TEXT,
                sentiment_label TEXT,
                timestamp TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_sentiments_timestamp
                ON sentiments(timestamp);

            -- Readers don't block the writer
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock: local_clock(),
        })
    }

    /// Replace the clock used to stamp new records.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn row_to_record(
        id: i64,
        text_input: Option<String>,
        label: Option<String>,
        timestamp: Option<String>,
    ) -> StorageResult<SentimentRecord> {
        let label = label.unwrap_or_default();
        let sentiment_label = label
            .parse::<Sentiment>()
            .map_err(|source| StorageError::CorruptRecord { id, source })?;
        Ok(SentimentRecord {
            id,
            text_input: text_input.unwrap_or_default(),
            sentiment_label,
            timestamp: timestamp.unwrap_or_default(),
        })
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }
}

impl HistoryStore for SqliteStore {
    fn record(&self, text_input: &str, sentiment: Sentiment) -> StorageResult<SentimentRecord> {
        let conn = self.conn.lock().unwrap();
        // Stamped under the lock so timestamps follow id order within a process
        let timestamp = (self.clock)().format(TIMESTAMP_FORMAT).to_string();

        conn.execute(
            "INSERT INTO sentiments (text_input, sentiment_label, timestamp) VALUES (?1, ?2, ?3)",
            params![text_input, sentiment.as_str(), timestamp],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, sentiment = %sentiment, "recorded analysis");

        Ok(SentimentRecord {
            id,
            text_input: text_input.to_string(),
            sentiment_label: sentiment,
            timestamp,
        })
    }

    fn list_recent(&self, limit: usize) -> StorageResult<Vec<SentimentRecord>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, text_input, sentiment_label, timestamp
             FROM sentiments
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, text, label, timestamp) = row?;
            records.push(Self::row_to_record(id, text, label, timestamp)?);
        }

        Ok(records)
    }

    fn count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sentiments", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
