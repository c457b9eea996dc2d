mod common;

use std::sync::Arc;

use common::{
    context, date, record, StubBackend, ASSIGNMENT_FEEDBACK, INSTRUCTOR_FEEDBACK, STRAY_FEEDBACK,
};
use feedback_insights::{
    analysis,
    nlp::topics::{discover_topics, TopicDiscoveryResult},
    FeedbackBatch,
};

fn themed_texts() -> Vec<Option<&'static str>> {
    INSTRUCTOR_FEEDBACK
        .iter()
        .chain(ASSIGNMENT_FEEDBACK.iter())
        .chain(STRAY_FEEDBACK.iter())
        .map(|t| Some(*t))
        .collect()
}

#[tokio::test]
async fn discovers_topics_and_excludes_outliers() {
    let backend = StubBackend::replying("\"Clear   Teaching\"\n");
    let result = discover_topics(&backend, "CS101", &themed_texts(), 5).await;

    let TopicDiscoveryResult::Success { topics } = &result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(topics.len(), 2);
    assert_eq!(topics.iter().map(|t| t.count).sum::<usize>(), 8);
    for (idx, topic) in topics.iter().enumerate() {
        assert_eq!(topic.topic_id, idx);
        assert_eq!(topic.count, 4);
        assert!(topic.examples.len() <= 3 && !topic.examples.is_empty());
        assert!(topic.keywords.len() <= 10);
        assert_eq!(topic.topic_name, "Clear Teaching");
        for example in &topic.examples {
            assert!(!STRAY_FEEDBACK.contains(&example.as_str()));
        }
    }
    let leads: Vec<&str> = topics.iter().map(|t| t.keywords[0].term.as_str()).collect();
    assert!(leads.contains(&"instructor"));
    assert!(leads.contains(&"assignment"));
}

#[tokio::test]
async fn naming_failure_falls_back_to_keywords() {
    let backend = StubBackend::failing();
    let result = discover_topics(&backend, "CS101", &themed_texts(), 5).await;

    let names: Vec<String> = result.topics().iter().map(|t| t.topic_name.clone()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("Instructor-")));
    assert!(names.iter().all(|n| n.contains('-')));
}

#[tokio::test]
async fn unrelated_documents_yield_no_topics() {
    let backend = StubBackend::replying("Anything");
    let texts: Vec<Option<&str>> = STRAY_FEEDBACK
        .iter()
        .copied()
        .chain([
            "Library study rooms fill up quickly during exam week.",
            "The projector in the lecture hall flickers constantly.",
            "Evening bus schedules rarely match the late lab timetable.",
        ])
        .map(Some)
        .collect();

    let result = discover_topics(&backend, "GEN100", &texts, 5).await;

    match result {
        TopicDiscoveryResult::Success { topics } => assert!(topics.is_empty(), "{topics:?}"),
        other => panic!("expected success without topics, got {other:?}"),
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn too_few_valid_documents_is_skipped_with_count() {
    let backend = StubBackend::failing();
    let texts = vec![
        Some(INSTRUCTOR_FEEDBACK[0]),
        Some(INSTRUCTOR_FEEDBACK[1]),
        Some(ASSIGNMENT_FEEDBACK[0]),
        Some("Good"),
        Some("ok fine thanks"),
        None,
    ];

    let result = discover_topics(&backend, "CS101", &texts, 5).await;

    match result {
        TopicDiscoveryResult::Skipped { reason } => {
            assert!(reason.contains("at least 5"), "{reason}");
            assert!(reason.contains("found 3"), "{reason}");
        }
        other => panic!("expected skip, got {other:?}"),
    }
}

#[tokio::test]
async fn one_course_failing_does_not_affect_others() {
    let ctx = context(Arc::new(StubBackend::replying("Course Topic")));
    let when = date(2024, 4, 1);
    let mut records = Vec::new();
    for text in themed_texts().into_iter().flatten() {
        records.push(record("GOOD", 4, text, when));
    }
    for i in 0..6 {
        records.push(record(
            "BROKEN",
            2,
            &format!("Servers explode whenever assignment {i} uploads happen at night"),
            when,
        ));
    }
    records.push(record("TINY", 5, INSTRUCTOR_FEEDBACK[0], when));
    let batch: FeedbackBatch = records.into();

    let results = analysis::perform_advanced_topic_modeling(&ctx, &batch, 5).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results["GOOD"].status(), "Success");
    assert_eq!(results["GOOD"].topics().len(), 2);
    match &results["BROKEN"] {
        TopicDiscoveryResult::Failed { reason } => assert!(reason.contains("simulated backend failure")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(results["TINY"].status(), "Skipped");
}

#[test]
fn results_serialize_with_status_tag() {
    let skipped = TopicDiscoveryResult::Skipped {
        reason: "not enough".into(),
    };
    let json = serde_json::to_value(&skipped).unwrap();
    assert_eq!(json["status"], "Skipped");
    assert_eq!(json["reason"], "not enough");

    let success = serde_json::to_value(&TopicDiscoveryResult::Success { topics: Vec::new() }).unwrap();
    assert_eq!(success["status"], "Success");
    assert!(success["topics"].as_array().unwrap().is_empty());
}
