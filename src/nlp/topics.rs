//! Topic discovery for a single course's feedback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{backend::InferenceBackend, error::BackendError};

use super::{
    cluster::{self, OUTLIER},
    embeddings::{centroid, cosine},
    keywords::{self, Keyword, TOP_KEYWORDS},
    naming,
    normalize::{clean_optional, token_count},
};

/// Default number of valid documents required before clustering.
pub const DEFAULT_MIN_FEEDBACK_COUNT: usize = 5;

/// Documents with this many tokens or fewer are treated as noise.
const MIN_DOCUMENT_TOKENS: usize = 3;

const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_id: usize,
    pub topic_name: String,
    pub keywords: Vec<Keyword>,
    pub count: usize,
    pub examples: Vec<String>,
}

/// Outcome of topic discovery for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum TopicDiscoveryResult {
    Skipped { reason: String },
    Success { topics: Vec<Topic> },
    Failed { reason: String },
}

impl TopicDiscoveryResult {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Skipped { .. } => "Skipped",
            Self::Success { .. } => "Success",
            Self::Failed { .. } => "Failed",
        }
    }

    pub fn topics(&self) -> &[Topic] {
        match self {
            Self::Success { topics } => topics,
            _ => &[],
        }
    }
}

/// A document that survived noise filtering.
struct Document<'a> {
    raw: &'a str,
    cleaned: String,
}

/// Discover topics in one course's raw feedback texts.
///
/// Never returns an error: backend and clustering failures are reported as
/// [`TopicDiscoveryResult::Failed`].
#[instrument(skip(backend, texts), fields(documents = texts.len()))]
pub async fn discover_topics(
    backend: &dyn InferenceBackend,
    course: &str,
    texts: &[Option<&str>],
    min_feedback_count: usize,
) -> TopicDiscoveryResult {
    let documents: Vec<Document<'_>> = texts
        .iter()
        .filter_map(|text| {
            let raw = (*text)?;
            let cleaned = clean_optional(Some(raw));
            (token_count(&cleaned) > MIN_DOCUMENT_TOKENS).then_some(Document { raw, cleaned })
        })
        .collect();

    if documents.len() < min_feedback_count {
        return TopicDiscoveryResult::Skipped {
            reason: format!(
                "Not enough valid feedback for topic modeling: at least {min_feedback_count} \
                 required, found {}",
                documents.len()
            ),
        };
    }

    match cluster_documents(backend, &documents).await {
        Ok(topics) => {
            info!(course, topics = topics.len(), "topic discovery complete");
            TopicDiscoveryResult::Success { topics }
        }
        Err(err) => {
            warn!(course, error = %err, "topic discovery failed");
            TopicDiscoveryResult::Failed {
                reason: format!("Topic modeling failed: {err}"),
            }
        }
    }
}

async fn cluster_documents(
    backend: &dyn InferenceBackend,
    documents: &[Document<'_>],
) -> Result<Vec<Topic>, BackendError> {
    let cleaned: Vec<String> = documents.iter().map(|d| d.cleaned.clone()).collect();
    let embeddings = backend.embed_documents(&cleaned).await?;
    if embeddings.len() != cleaned.len() {
        return Err(BackendError::Embedding(format!(
            "expected {} embeddings, got {}",
            cleaned.len(),
            embeddings.len()
        )));
    }

    let min_size = cluster::min_cluster_size(documents.len());
    let labels = cluster::density_cluster(&embeddings, min_size)?;

    let mut members: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        if *label != OUTLIER {
            members.entry(*label).or_default().push(idx);
        }
    }
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let mut keywords = keywords::class_tfidf(&cleaned, &labels, TOP_KEYWORDS);

    let mut topics = Vec::with_capacity(members.len());
    for (label, indices) in members {
        let topic_id = label as usize;
        let examples = representative_examples(documents, &embeddings, &indices);
        let topic_keywords = keywords.remove(&label).unwrap_or_default();
        let topic_name = naming::name_topic(backend, topic_id, &topic_keywords, &examples).await;
        topics.push(Topic {
            topic_id,
            topic_name,
            keywords: topic_keywords,
            count: indices.len(),
            examples,
        });
    }
    Ok(topics)
}

/// Raw texts of the members closest to the cluster centroid.
fn representative_examples(
    documents: &[Document<'_>],
    embeddings: &[Vec<f32>],
    indices: &[usize],
) -> Vec<String> {
    let vectors: Vec<&[f32]> = indices.iter().map(|i| embeddings[*i].as_slice()).collect();
    let center = centroid(&vectors);
    let mut ranked: Vec<(usize, f32)> = indices
        .iter()
        .map(|i| (*i, cosine(&embeddings[*i], &center)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MAX_EXAMPLES)
        .map(|(i, _)| documents[i].raw.to_string())
        .collect()
}
