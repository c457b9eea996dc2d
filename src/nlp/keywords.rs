//! Class-based TF-IDF keyword extraction for clustered documents.
//!
//! Each cluster is treated as one large document. A term scores highly when it
//! is frequent inside its cluster and comparatively rare across all clusters:
//!
//! `score(t, c) = tf(t, c) / |c| * ln(1 + A / f(t))`
//!
//! where `A` is the average number of words per cluster and `f(t)` the total
//! frequency of `t` over every cluster.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Number of keywords kept per topic.
pub const TOP_KEYWORDS: usize = 10;

/// A ranked keyword with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub score: f32,
}

/// Score terms for every cluster label present in `labels`.
///
/// `documents` are cleaned token strings aligned with `labels`. Outlier
/// documents take part in the corpus statistics like any other class.
pub fn class_tfidf(documents: &[String], labels: &[i32], top_n: usize) -> BTreeMap<i32, Vec<Keyword>> {
    let mut class_counts: BTreeMap<i32, HashMap<&str, usize>> = BTreeMap::new();
    for (doc, label) in documents.iter().zip(labels) {
        let counts = class_counts.entry(*label).or_default();
        for token in doc.split_whitespace() {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    if class_counts.is_empty() {
        return BTreeMap::new();
    }

    let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
    let mut total_words = 0usize;
    for counts in class_counts.values() {
        for (term, count) in counts {
            *corpus_freq.entry(*term).or_insert(0) += count;
            total_words += count;
        }
    }
    let avg_words = total_words as f32 / class_counts.len() as f32;

    class_counts
        .iter()
        .map(|(label, counts)| {
            let class_total: usize = counts.values().sum();
            let mut scored: Vec<Keyword> = counts
                .iter()
                .map(|(term, count)| {
                    let tf = *count as f32 / class_total.max(1) as f32;
                    let freq = corpus_freq.get(term).copied().unwrap_or(1) as f32;
                    let idf = (1.0 + avg_words / freq).ln();
                    Keyword {
                        term: (*term).to_string(),
                        score: tf * idf,
                    }
                })
                .collect();
            scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.term.cmp(&b.term)));
            scored.truncate(top_n);
            (*label, scored)
        })
        .collect()
}
