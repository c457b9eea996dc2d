//! Monthly sentiment and rating series per course.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{round1, SentimentCounts, TaggedRecord};
use crate::data::records::FeedbackRecord;

/// Sentiment counts for one `(course, month)` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBucket {
    pub course: String,
    pub month: String,
    #[serde(flatten)]
    pub counts: SentimentCounts,
}

/// Mean rating for one `(course, month)` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub course: String,
    pub month: String,
    pub average_rating: f64,
}

/// Buckets of labelled records, ordered by course then month.
pub fn sentiment_timeseries(tagged: &[TaggedRecord<'_>]) -> Vec<SentimentBucket> {
    let mut buckets: BTreeMap<(String, String), SentimentCounts> = BTreeMap::new();
    for item in tagged {
        if let Some(label) = item.sentiment {
            buckets
                .entry((item.record.course.clone(), item.record.month()))
                .or_default()
                .add(label);
        }
    }
    buckets
        .into_iter()
        .map(|((course, month), counts)| SentimentBucket {
            course,
            month,
            counts,
        })
        .collect()
}

/// Average rating per course and month, ordered by course then month.
pub fn rating_timeseries(records: &[FeedbackRecord]) -> Vec<RatingBucket> {
    let mut buckets: BTreeMap<(String, String), (i128, usize)> = BTreeMap::new();
    for record in records {
        let entry = buckets
            .entry((record.course.clone(), record.month()))
            .or_insert((0, 0));
        entry.0 += i128::from(record.rating);
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|((course, month), (sum, n))| RatingBucket {
            course,
            month,
            average_rating: round1(sum as f64 / n as f64),
        })
        .collect()
}
