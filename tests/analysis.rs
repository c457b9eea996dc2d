mod common;

use std::sync::Arc;

use common::{context, date, record, StubBackend};
use feedback_insights::{
    analysis::{self, aggregate, timeseries, AnalysisRequest},
    FeedbackBatch, SentimentLabel,
};

fn cs101_batch() -> FeedbackBatch {
    let texts = [
        "Excellent course with engaging lectures and helpful labs.",
        "Good pacing overall, though the final project felt rushed.",
        "Loved the practical examples, the instructor was fantastic.",
        "Lectures were boring and the slides were confusing.",
        "Solid material and useful readings every week.",
        "Brilliant teaching assistants and clear grading rubrics.",
    ];
    let ratings = [5, 4, 5, 3, 4, 5];
    texts
        .iter()
        .zip(ratings)
        .enumerate()
        .map(|(i, (text, rating))| {
            let month = if i < 3 { 1 } else { 2 };
            record("CS101", rating, text, date(2024, month, 10 + i as u32))
        })
        .collect::<Vec<_>>()
        .into()
}

#[tokio::test]
async fn end_to_end_course_statistics() {
    let backend = Arc::new(StubBackend::replying("Students praise labs but dislike slides."));
    let ctx = context(backend.clone());
    let batch = cs101_batch();

    let result = analysis::run_feedback_analysis(&ctx, &batch).await;

    assert_eq!(result.average_rating["CS101"], 4.3);
    let dist = result.sentiment_distribution["CS101"];
    assert_eq!(dist.total(), 6);
    assert!(dist.get(SentimentLabel::Positive) >= 1);
    assert!(dist.get(SentimentLabel::Negative) >= 1);
    assert_eq!(result.summary["CS101"], "Students praise labs but dislike slides.");
    assert_eq!(backend.calls(), 1);
    assert!(result.sentiment_monthly.is_none());
    assert!(result.topics.is_none());
}

#[tokio::test]
async fn distribution_serializes_all_three_columns() {
    let ctx = context(Arc::new(StubBackend::failing()));
    let batch: FeedbackBatch = vec![record("ART1", 4, "Nice studio sessions", date(2024, 5, 1))].into();

    let result = analysis::run_feedback_analysis(&ctx, &batch).await;
    let json = serde_json::to_value(&result.sentiment_distribution).unwrap();

    assert_eq!(json["ART1"]["Negative"], 0);
    assert_eq!(json["ART1"]["Neutral"], 0);
    assert_eq!(json["ART1"]["Positive"], 1);
}

#[tokio::test]
async fn empty_batch_yields_empty_structures() {
    let ctx = context(Arc::new(StubBackend::failing()));
    let batch = FeedbackBatch::default();
    let request = AnalysisRequest {
        timeseries: true,
        topics: true,
        min_feedback_count: None,
    };

    let result = analysis::run_full_analysis(&ctx, &batch, &request).await;

    assert!(result.summary.is_empty());
    assert!(result.average_rating.is_empty());
    assert!(result.sentiment_distribution.is_empty());
    assert_eq!(result.sentiment_monthly, Some(Vec::new()));
    assert_eq!(result.rating_monthly, Some(Vec::new()));
    assert!(result.topics.unwrap().is_empty());
    assert_eq!(result.skipped_records, 0);
    assert!(analysis::get_sentiment_timeseries(&ctx, &batch).await.is_empty());
}

#[tokio::test]
async fn empty_texts_and_failed_classifications_are_not_counted() {
    let ctx = context(Arc::new(StubBackend::failing()));
    let mut records = vec![
        record("BIO2", 4, "Helpful field trips", date(2024, 3, 1)),
        record("BIO2", 2, "poison pill lecture notes", date(2024, 3, 2)),
        record("BIO2", 3, "!!! 42", date(2024, 3, 3)),
    ];
    records[2].feedback_text = None;
    let batch: FeedbackBatch = records.into();

    let result = analysis::run_feedback_analysis(&ctx, &batch).await;

    assert_eq!(result.sentiment_distribution["BIO2"].total(), 1);
    assert_eq!(result.skipped_records, 1);
    assert_eq!(result.average_rating["BIO2"], 3.0);
}

#[tokio::test]
async fn monthly_series_are_bucketed_and_complete() {
    let ctx = context(Arc::new(StubBackend::failing()));
    let batch = cs101_batch();
    let request = AnalysisRequest {
        timeseries: true,
        ..Default::default()
    };

    let result = analysis::run_full_analysis(&ctx, &batch, &request).await;

    let sentiment = result.sentiment_monthly.unwrap();
    assert_eq!(sentiment.len(), 2);
    assert_eq!(sentiment[0].month, "2024-01");
    assert_eq!(sentiment[1].month, "2024-02");
    assert_eq!(sentiment.iter().map(|b| b.counts.total()).sum::<usize>(), 6);
    let row = serde_json::to_value(&sentiment[0]).unwrap();
    for column in ["course", "month", "Negative", "Neutral", "Positive"] {
        assert!(row.get(column).is_some(), "missing {column}");
    }

    let ratings = result.rating_monthly.unwrap();
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0].average_rating, 4.7);
    assert_eq!(ratings[1].average_rating, 4.0);
}

#[tokio::test]
async fn half_way_averages_round_to_even() {
    let ctx = context(Arc::new(StubBackend::failing()));
    let batch: FeedbackBatch = [4, 4, 5, 4]
        .into_iter()
        .enumerate()
        .map(|(i, rating)| record("MATH3", rating, "Weekly problem sets", date(2024, 4, 1 + i as u32)))
        .collect::<Vec<_>>()
        .into();

    let result = analysis::run_feedback_analysis(&ctx, &batch).await;

    // 4.25 sits exactly on the tie
    assert_eq!(result.average_rating["MATH3"], 4.2);
    assert_eq!(aggregate::round1(0.25), 0.2);
    assert_eq!(aggregate::round1(2.75), 2.8);
}

#[test]
fn extreme_ratings_do_not_overflow_averages() {
    let records = vec![
        record("C", i64::MAX, "Odd import", date(2024, 6, 1)),
        record("C", 5, "Normal entry", date(2024, 6, 2)),
    ];

    let averages = aggregate::average_rating(&records);
    let monthly = timeseries::rating_timeseries(&records);

    let expected = (i64::MAX as f64 + 5.0) / 2.0;
    assert!(averages["C"].is_finite());
    assert!((averages["C"] - expected).abs() / expected < 1e-9);
    assert_eq!(monthly.len(), 1);
    assert!((monthly[0].average_rating - expected).abs() / expected < 1e-9);
}
