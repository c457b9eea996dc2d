#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use feedback_insights::{
    analysis::{AnalysisContext, AnalysisOptions},
    error::BackendError,
    nlp::sentiment::lexicon_label,
    FeedbackRecord, InferenceBackend,
};

pub const EMBED_DIMS: usize = 16;

/// Deterministic backend for pipeline tests.
///
/// * sentiment uses the lexicon scorer, failing on texts containing "poison";
/// * generation returns `reply` (or fails when `reply` is `None`) and counts calls;
/// * embeddings place documents about instructors and assignments on two fixed
///   points and give every other document its own axis. Any document containing
///   "explode" makes embedding fail.
pub struct StubBackend {
    pub reply: Option<String>,
    pub generate_calls: AtomicUsize,
}

impl StubBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            generate_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            generate_calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceBackend for StubBackend {
    async fn classify_sentiment(&self, text: &str) -> Result<String, BackendError> {
        if text.contains("poison") {
            return Err(BackendError::other("model crashed"));
        }
        Ok(lexicon_label(text).to_string())
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, BackendError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(BackendError::Unavailable)
    }

    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        if documents.iter().any(|d| d.contains("explode")) {
            return Err(BackendError::Embedding("simulated backend failure".into()));
        }
        let mut next_axis = 2;
        Ok(documents
            .iter()
            .map(|doc| {
                let mut v = vec![0.0f32; EMBED_DIMS];
                if doc.contains("instructor") {
                    v[0] = 1.0;
                } else if doc.contains("assignment") {
                    v[1] = 1.0;
                } else {
                    v[next_axis % EMBED_DIMS] = 1.0;
                    next_axis += 1;
                }
                v
            })
            .collect())
    }
}

pub fn context(backend: Arc<StubBackend>) -> AnalysisContext {
    AnalysisContext::new(backend, AnalysisOptions::default())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn record(course: &str, rating: i64, text: &str, when: NaiveDate) -> FeedbackRecord {
    FeedbackRecord::new(course, rating, text, when)
}

pub const INSTRUCTOR_FEEDBACK: [&str; 4] = [
    "The instructor explained recursion clearly during every lecture.",
    "Our instructor answered questions patiently after class sessions.",
    "The instructor made difficult proofs feel approachable and clear.",
    "Great instructor with engaging examples and helpful office hours.",
];

pub const ASSIGNMENT_FEEDBACK: [&str; 4] = [
    "The weekly assignment deadlines were stressful and too tight.",
    "Each assignment took far longer than the syllabus suggested.",
    "Assignment instructions were vague and grading felt inconsistent.",
    "More assignment feedback would help students improve their code.",
];

pub const STRAY_FEEDBACK: [&str; 2] = [
    "The campus cafeteria closes early on lab evenings unfortunately.",
    "Parking near the engineering building remains expensive lately.",
];
