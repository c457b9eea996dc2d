//! Three-class sentiment labels and batch tagging.

use std::fmt;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{backend::InferenceBackend, error::BackendError};

use super::lexicon::{NEGATIVE_TERMS, POSITIVE_TERMS};

/// Raw label identifiers emitted by three-class sentiment models, in class order.
const MODEL_LABELS: [(&str, SentimentLabel); 3] = [
    ("LABEL_0", SentimentLabel::Negative),
    ("LABEL_1", SentimentLabel::Neutral),
    ("LABEL_2", SentimentLabel::Positive),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Map a raw model label (`LABEL_0`..`LABEL_2`, or a plain class name) to the domain label.
    pub fn from_model_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        MODEL_LABELS
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(raw))
            .map(|(_, label)| *label)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|label| label.as_str().eq_ignore_ascii_case(raw))
            })
    }

    /// The raw model label for this class.
    pub fn model_label(self) -> &'static str {
        MODEL_LABELS
            .iter()
            .find(|(_, label)| *label == self)
            .map(|(id, _)| *id)
            .unwrap_or("LABEL_1")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one normalized text through the backend.
pub async fn classify(
    backend: &dyn InferenceBackend,
    normalized: &str,
) -> Result<SentimentLabel, BackendError> {
    let raw = backend.classify_sentiment(normalized).await?;
    SentimentLabel::from_model_label(&raw).ok_or(BackendError::UnknownLabel(raw))
}

/// Classify many normalized texts with bounded concurrency.
///
/// Output order matches input order. Empty texts are not sent to the backend
/// and come back as `Ok(None)`.
pub async fn classify_all(
    backend: &dyn InferenceBackend,
    texts: &[String],
    concurrency: usize,
) -> Vec<Result<Option<SentimentLabel>, BackendError>> {
    let results: Vec<_> = stream::iter(texts.iter())
        .map(|text| async move {
            if text.is_empty() {
                return Ok(None);
            }
            classify(backend, text).await.map(Some)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failures = results.iter().filter(|r| r.is_err()).count();
    if failures > 0 {
        warn!(failures, total = texts.len(), "sentiment classification failed for some records");
    }
    debug!(total = texts.len(), "classified sentiment batch");
    results
}

/// Raw label for the highest-scoring class of a three-class model's logits.
///
/// `None` unless exactly three finite scores are given.
pub fn label_from_logits(logits: &[f32]) -> Option<&'static str> {
    if logits.len() != MODEL_LABELS.len() || logits.iter().any(|v| !v.is_finite()) {
        return None;
    }
    logits
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(idx, _)| MODEL_LABELS[idx].0)
}

/// Lexicon polarity score over cleaned lemmas; positive values lean favourable.
pub fn lexicon_polarity(normalized: &str) -> i32 {
    normalized
        .split_whitespace()
        .map(|token| {
            if POSITIVE_TERMS.contains(token) {
                1
            } else if NEGATIVE_TERMS.contains(token) {
                -1
            } else {
                0
            }
        })
        .sum()
}

/// Raw model-style label for a lexicon polarity score.
pub fn lexicon_label(normalized: &str) -> &'static str {
    let label = match lexicon_polarity(normalized) {
        score if score > 0 => SentimentLabel::Positive,
        score if score < 0 => SentimentLabel::Negative,
        _ => SentimentLabel::Neutral,
    };
    label.model_label()
}
