//! Sentiment verdicts and the records persisted for each analysis

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-way sentiment verdict.
///
/// Serialized in upper case (`"POSITIVE"`, `"NEGATIVE"`, `"NEUTRAL"`), which is
/// also the form stored in the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    /// Map a raw model label (`POS`, `NEG`, `NEU`) to a verdict.
    ///
    /// Any label outside that vocabulary maps to `Neutral`.
    pub fn from_model_label(label: &str) -> Self {
        match label {
            "POS" => Sentiment::Positive,
            "NEG" => Sentiment::Negative,
            "NEU" => Sentiment::Neutral,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored label is not one of the three verdicts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for Sentiment {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(Sentiment::Positive),
            "NEGATIVE" => Ok(Sentiment::Negative),
            "NEUTRAL" => Ok(Sentiment::Neutral),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// One classification event, as stored in the history log.
///
/// Records are created by the store and never modified afterwards. On the
/// wire they appear as `{id, text, sentiment, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Store-assigned, strictly increasing, never reused
    pub id: i64,
    /// The original input, before normalization
    #[serde(rename = "text")]
    pub text_input: String,
    #[serde(rename = "sentiment")]
    pub sentiment_label: Sentiment,
    /// ISO-8601 local time assigned at insert
    pub timestamp: String,
}
