mod common;

use common::StubBackend;
use feedback_insights::nlp::summarize::{extractive_summary, summarize, MIN_WORDS_TO_SUMMARIZE};

#[tokio::test]
async fn short_feedback_is_returned_verbatim_without_backend_call() {
    let backend = StubBackend::replying("should not be used");
    let texts = ["Great labs and tutors.", "Too much homework.", "Slides were clear enough."];
    assert_eq!(texts.join(" ").split_whitespace().count(), 12);

    let summary = summarize(&backend, "CS101", &texts).await;

    assert_eq!(summary, "Great labs and tutors. Too much homework. Slides were clear enough.");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn long_feedback_uses_generated_summary() {
    let backend = StubBackend::replying("  Strong labs; weak pacing.  ");
    let long = "The labs were well organised and the tutors were patient. ".repeat(4);
    assert!(long.split_whitespace().count() >= MIN_WORDS_TO_SUMMARIZE);

    let summary = summarize(&backend, "CS101", &[long.as_str()]).await;

    assert_eq!(summary, "Strong labs; weak pacing.");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn backend_failure_falls_back_to_extract() {
    let backend = StubBackend::failing();
    let long = "Lectures were engaging. Homework was heavy. ".repeat(10);

    let summary = summarize(&backend, "CS101", &[long.as_str()]).await;

    assert!(summary.starts_with("Lectures were engaging."));
    assert!(summary.split_whitespace().count() <= 60);
}

#[test]
fn extractive_summary_keeps_whole_sentences() {
    let text = "One two three. Four five six seven. Eight nine.";
    assert_eq!(extractive_summary(text, 7), "One two three. Four five six seven.");
    assert_eq!(extractive_summary("no punctuation at all here", 3), "no punctuation at");
}
