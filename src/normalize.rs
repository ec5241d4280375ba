//! Text normalization
//!
//! Lower-cases input and replaces whole whitespace-separated tokens using the
//! lexicon. Substitution is a single pass: a replacement is never itself
//! looked up again.

use crate::lexicon::Lexicon;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Normalizer {
    lexicon: Arc<Lexicon>,
}

impl Normalizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Normalize `text`.
    ///
    /// The output has exactly as many tokens as the input; runs of
    /// whitespace collapse to a single space and leading/trailing whitespace
    /// is dropped, so blank input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        lowered
            .split_whitespace()
            .map(|word| self.lexicon.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
