//! vietsent: Vietnamese text sentiment service
//!
//! Accepts short text snippets, normalizes informal Vietnamese through a
//! word-substitution lexicon, classifies sentiment with a pretrained model,
//! and keeps an append-only history of every analysis.
//!
//! # Core Concepts
//!
//! - **Lexicon**: immutable surface-form → canonical-form dictionary
//! - **Normalizer**: lower-casing plus token substitution
//! - **Classifier**: model output → POSITIVE / NEGATIVE / NEUTRAL, with a
//!   low-confidence fallback to NEUTRAL
//! - **History store**: durable, append-only log of analyses
//! - **Pipeline**: validate → normalize → classify → record
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vietsent::{Classifier, Lexicon, MockModel, Normalizer, OpenStore, Pipeline, Sentiment, SqliteStore};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let lexicon = Arc::new(Lexicon::from_pairs([("k", "không")]));
//!     let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//!     let pipeline = Pipeline::new(
//!         Normalizer::new(lexicon),
//!         Classifier::new(Arc::new(MockModel::returning("NEG", 0.9))),
//!         store,
//!     );
//!
//!     let analysis = pipeline.handle(Some("Sản phẩm k tốt lắm")).await.unwrap();
//!     assert_eq!(analysis.clean_text, "sản phẩm không tốt lắm");
//!     assert_eq!(analysis.sentiment, Sentiment::Negative);
//! });
//! ```

pub mod classify;
pub mod config;
mod lexicon;
mod normalize;
pub mod pipeline;
mod sentiment;
pub mod server;
pub mod storage;

pub use classify::{Classifier, HttpModel, MockModel, ModelError, RawPrediction, SentimentModel};
pub use config::{Config, ConfigError, ModelConfig};
pub use lexicon::{Lexicon, LexiconError};
pub use normalize::Normalizer;
pub use pipeline::{Analysis, AnalyzeRequest, Pipeline, PipelineError, ValidationError};
pub use sentiment::{Sentiment, SentimentRecord, UnknownLabel};
pub use storage::{HistoryStore, OpenStore, SqliteStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
