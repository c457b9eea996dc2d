//! Per-course statistics over tagged feedback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{data::records::FeedbackRecord, nlp::sentiment::SentimentLabel};

/// A feedback record after normalization and sentiment tagging.
#[derive(Debug, Clone)]
pub struct TaggedRecord<'a> {
    pub record: &'a FeedbackRecord,
    pub cleaned: String,
    /// `None` when the cleaned text is empty or classification failed.
    pub sentiment: Option<SentimentLabel>,
}

/// Counts per sentiment class; every class is always present when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
    #[serde(rename = "Positive")]
    pub positive: usize,
}

impl SentimentCounts {
    pub fn add(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Positive => self.positive += 1,
        }
    }

    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
        }
    }

    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }
}

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Mean rating per course, rounded to one decimal.
pub fn average_rating<'a, I>(records: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    // ratings are unbounded, so widen before summing
    let mut sums: BTreeMap<&str, (i128, usize)> = BTreeMap::new();
    for record in records {
        let entry = sums.entry(record.course.as_str()).or_insert((0, 0));
        entry.0 += i128::from(record.rating);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(course, (sum, n))| (course.to_string(), round1(sum as f64 / n as f64)))
        .collect()
}

/// Sentiment counts per course. Every course in the input appears, even when
/// none of its records could be labelled.
pub fn sentiment_distribution(tagged: &[TaggedRecord<'_>]) -> BTreeMap<String, SentimentCounts> {
    let mut dist: BTreeMap<String, SentimentCounts> = BTreeMap::new();
    for item in tagged {
        let counts = dist.entry(item.record.course.clone()).or_default();
        if let Some(label) = item.sentiment {
            counts.add(label);
        }
    }
    dist
}
