//! Shared fixtures for integration tests
//!
//! Builds pipelines over an on-disk SQLite store in a temp directory, with a
//! mock model standing in for the real classifier.

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use vietsent::{
    Classifier, HistoryStore, Lexicon, MockModel, Normalizer, OpenStore, Pipeline, Sentiment,
    SentimentRecord, SqliteStore, StorageError, StorageResult,
};

pub struct Fixture {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<SqliteStore>,
    pub model: Arc<MockModel>,
    // Keeps the database directory alive for the fixture's lifetime
    _dir: TempDir,
}

pub fn fixture(lexicon: &[(&str, &str)], model: MockModel) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("history.db")).unwrap());
    let model = Arc::new(model);

    let pipeline = Pipeline::new(
        Normalizer::new(Arc::new(Lexicon::from_pairs(lexicon.iter().copied()))),
        Classifier::new(model.clone()),
        store.clone(),
    );

    Fixture {
        pipeline: Arc::new(pipeline),
        store,
        model,
        _dir: dir,
    }
}

/// Lexicon used by the end-to-end scenarios.
pub const TEENCODE: &[(&str, &str)] = &[("k", "không"), ("ko", "không"), ("dc", "được")];

/// History store whose disk has gone away: every read and write fails.
pub struct UnavailableStore;

fn disk_unavailable() -> StorageError {
    StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk unavailable"))
}

impl HistoryStore for UnavailableStore {
    fn record(&self, _text_input: &str, _sentiment: Sentiment) -> StorageResult<SentimentRecord> {
        Err(disk_unavailable())
    }

    fn list_recent(&self, _limit: usize) -> StorageResult<Vec<SentimentRecord>> {
        Err(disk_unavailable())
    }

    fn count(&self) -> StorageResult<usize> {
        Err(disk_unavailable())
    }
}

/// Pipeline over an [`UnavailableStore`], returning the model so tests can
/// check that classification still ran.
pub fn unavailable_store_pipeline(model: MockModel) -> (Arc<Pipeline>, Arc<MockModel>) {
    let model = Arc::new(model);
    let pipeline = Pipeline::new(
        Normalizer::new(Arc::new(Lexicon::from_pairs(TEENCODE.iter().copied()))),
        Classifier::new(model.clone()),
        Arc::new(UnavailableStore),
    );
    (Arc::new(pipeline), model)
}
