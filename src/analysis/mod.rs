//! Analysis entry points combining normalization, sentiment, summaries, topics
//! and aggregation into one result object.

pub mod aggregate;
pub mod timeseries;

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Result;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    backend::{self, InferenceBackend},
    config::Settings,
    data::records::{FeedbackBatch, TopicBatch},
    nlp::{
        normalize::clean_optional,
        sentiment, summarize,
        topics::{self, TopicDiscoveryResult, DEFAULT_MIN_FEEDBACK_COUNT},
    },
};

use aggregate::{SentimentCounts, TaggedRecord};
use timeseries::{RatingBucket, SentimentBucket};

/// Tunables for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub min_feedback_count: usize,
    pub course_concurrency: usize,
    pub sentiment_concurrency: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_feedback_count: DEFAULT_MIN_FEEDBACK_COUNT,
            course_concurrency: 4,
            sentiment_concurrency: 8,
        }
    }
}

/// Shared, read-only state handed to every analysis entry point.
#[derive(Clone)]
pub struct AnalysisContext {
    pub backend: Arc<dyn InferenceBackend>,
    pub options: AnalysisOptions,
}

impl AnalysisContext {
    pub fn new(backend: Arc<dyn InferenceBackend>, options: AnalysisOptions) -> Self {
        Self { backend, options }
    }

    /// Load models once and build the context for the process lifetime.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let backend = backend::load(settings).await?;
        Ok(Self::new(backend, settings.analysis_options()))
    }
}

/// Which optional sections to compute.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub timeseries: bool,
    pub topics: bool,
    /// Overrides the context's topic threshold when set.
    pub min_feedback_count: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: BTreeMap<String, String>,
    pub average_rating: BTreeMap<String, f64>,
    pub sentiment_distribution: BTreeMap<String, SentimentCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_monthly: Option<Vec<SentimentBucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_monthly: Option<Vec<RatingBucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<BTreeMap<String, TopicDiscoveryResult>>,
    /// Records left out of sentiment counts because classification failed.
    #[serde(default)]
    pub skipped_records: usize,
}

/// Tagged records plus the number of records whose classification failed.
pub struct TaggedBatch<'a> {
    pub records: Vec<TaggedRecord<'a>>,
    pub skipped: usize,
}

/// Normalize every record and classify its sentiment, preserving record order.
#[instrument(skip_all, fields(records = batch.len()))]
pub async fn tag_records<'a>(ctx: &AnalysisContext, batch: &'a FeedbackBatch) -> TaggedBatch<'a> {
    let cleaned: Vec<String> = batch
        .records()
        .iter()
        .map(|r| clean_optional(r.text()))
        .collect();
    let labels = sentiment::classify_all(
        ctx.backend.as_ref(),
        &cleaned,
        ctx.options.sentiment_concurrency,
    )
    .await;

    let mut skipped = 0;
    let records = batch
        .records()
        .iter()
        .zip(cleaned)
        .zip(labels)
        .map(|((record, cleaned), label)| {
            let sentiment = label.unwrap_or_else(|_| {
                skipped += 1;
                None
            });
            TaggedRecord {
                record,
                cleaned,
                sentiment,
            }
        })
        .collect();
    TaggedBatch { records, skipped }
}

/// Summary, average rating and sentiment distribution per course.
#[instrument(skip_all, fields(records = batch.len()))]
pub async fn run_feedback_analysis(ctx: &AnalysisContext, batch: &FeedbackBatch) -> AnalysisResult {
    run_full_analysis(ctx, batch, &AnalysisRequest::default()).await
}

/// Full aggregate result, with optional monthly series and topics.
#[instrument(skip_all, fields(records = batch.len(), timeseries = request.timeseries, topics = request.topics))]
pub async fn run_full_analysis(
    ctx: &AnalysisContext,
    batch: &FeedbackBatch,
    request: &AnalysisRequest,
) -> AnalysisResult {
    let tagged = tag_records(ctx, batch).await;
    let summary = summarize_courses(ctx, batch).await;

    let mut result = AnalysisResult {
        summary,
        average_rating: aggregate::average_rating(batch.records()),
        sentiment_distribution: aggregate::sentiment_distribution(&tagged.records),
        skipped_records: tagged.skipped,
        ..Default::default()
    };
    if request.timeseries {
        result.sentiment_monthly = Some(timeseries::sentiment_timeseries(&tagged.records));
        result.rating_monthly = Some(timeseries::rating_timeseries(batch.records()));
    }
    if request.topics {
        let min = request
            .min_feedback_count
            .unwrap_or(ctx.options.min_feedback_count);
        result.topics = Some(perform_advanced_topic_modeling(ctx, batch, min).await);
    }

    info!(
        courses = result.average_rating.len(),
        skipped = result.skipped_records,
        "analysis complete"
    );
    result
}

/// Sentiment counts per `(course, month)`.
pub async fn get_sentiment_timeseries(ctx: &AnalysisContext, batch: &FeedbackBatch) -> Vec<SentimentBucket> {
    let tagged = tag_records(ctx, batch).await;
    timeseries::sentiment_timeseries(&tagged.records)
}

/// Summaries for every course, computed concurrently across courses.
pub async fn summarize_courses(ctx: &AnalysisContext, batch: &FeedbackBatch) -> BTreeMap<String, String> {
    let backend = ctx.backend.as_ref();
    stream::iter(batch.by_course())
        .map(|(course, records)| async move {
            let texts: Vec<&str> = records.iter().filter_map(|r| r.text()).collect();
            let summary = summarize::summarize(backend, course, &texts).await;
            (course.to_string(), summary)
        })
        .buffer_unordered(ctx.options.course_concurrency.max(1))
        .collect()
        .await
}

/// Topic discovery per course; one course failing never affects another.
#[instrument(skip(ctx, batch), fields(records = batch.len()))]
pub async fn perform_advanced_topic_modeling(
    ctx: &AnalysisContext,
    batch: &FeedbackBatch,
    min_feedback_count: usize,
) -> BTreeMap<String, TopicDiscoveryResult> {
    discover_course_topics(ctx, &TopicBatch::from(batch), min_feedback_count).await
}

/// Topic discovery over a topics request, which carries only course and text.
#[instrument(skip(ctx, batch), fields(documents = batch.len()))]
pub async fn discover_course_topics(
    ctx: &AnalysisContext,
    batch: &TopicBatch,
    min_feedback_count: usize,
) -> BTreeMap<String, TopicDiscoveryResult> {
    let backend = ctx.backend.as_ref();
    stream::iter(batch.by_course())
        .map(|(course, texts)| async move {
            let result = topics::discover_topics(backend, course, &texts, min_feedback_count).await;
            (course.to_string(), result)
        })
        .buffer_unordered(ctx.options.course_concurrency.max(1))
        .collect()
        .await
}
