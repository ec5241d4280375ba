//! Word-substitution dictionary used for normalization
//!
//! The lexicon maps informal or abbreviated surface forms (`k`, `dc`, `sp`)
//! to their canonical Vietnamese spelling. It is loaded once from a JSON
//! object of string pairs and is read-only afterwards.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from reading a lexicon resource
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid lexicon JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable surface-form → canonical-form mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, String>,
}

impl Lexicon {
    /// A lexicon with no substitutions.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a lexicon from a JSON object whose values are all strings.
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Read a lexicon file, reporting failures to the caller.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Read a lexicon file, falling back to an empty lexicon on any failure.
    ///
    /// A missing or corrupt resource never stops startup; the service runs
    /// without substitutions and a warning is logged.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(lexicon) => {
                info!(path = %path.display(), entries = lexicon.len(), "loaded lexicon");
                lexicon
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "lexicon unavailable, normalizing without substitutions");
                Self::empty()
            }
        }
    }

    /// Canonical form for `word`, if the lexicon has one.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
