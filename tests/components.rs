use feedback_insights::{
    backend::{run_blocking, InferenceBackend, StandardBackend},
    error::BackendError,
    nlp::{
        cluster::{density_cluster, min_cluster_size, relabel_by_size, OUTLIER},
        embeddings::{cosine, HashedEmbedder},
        keywords::{class_tfidf, Keyword},
        naming::{fallback_name, placeholder_name, sanitize_name},
        sentiment::{self, label_from_logits, lexicon_label, SentimentLabel},
    },
};

fn kw(term: &str, score: f32) -> Keyword {
    Keyword {
        term: term.to_string(),
        score,
    }
}

#[test]
fn sanitize_takes_first_line_and_strips_quotes() {
    assert_eq!(sanitize_name("\n  \"Grading   Fairness\"\nextra text"), "Grading Fairness");
    assert_eq!(sanitize_name("'Lab Equipment And Safety Rules'"), "Lab Equipment And Safety");
    assert_eq!(sanitize_name("“Pacing”"), "Pacing");
    assert_eq!(sanitize_name("   \n\n"), "");
}

#[test]
fn fallback_uses_top_two_keywords() {
    let keywords = vec![kw("grade", 0.9), kw("rubric", 0.5), kw("late", 0.1)];
    assert_eq!(fallback_name(0, &keywords), "Grade-Rubric");
    assert_eq!(fallback_name(2, &[kw("grade", 0.9)]), "Topic 3");
    assert_eq!(fallback_name(0, &[]), placeholder_name(0));
    assert_eq!(placeholder_name(0), "Topic 1");
}

#[test]
fn cluster_size_floor_is_two() {
    assert_eq!(min_cluster_size(0), 2);
    assert_eq!(min_cluster_size(19), 2);
    assert_eq!(min_cluster_size(35), 3);
    assert_eq!(min_cluster_size(120), 12);
}

#[test]
fn relabel_orders_by_size_and_drops_small_clusters() {
    let raw = [Some(0), Some(1), Some(1), None, Some(0), Some(1), Some(2)];
    assert_eq!(relabel_by_size(&raw, 2), vec![1, 0, 0, OUTLIER, 1, 0, OUTLIER]);
}

fn axis(dims: usize, idx: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; dims];
    v[idx] = 1.0;
    v
}

#[test]
fn equidistant_points_are_all_outliers() {
    let embeddings: Vec<Vec<f32>> = (0..5).map(|i| axis(8, i)).collect();
    let labels = density_cluster(&embeddings, 2).unwrap();
    assert_eq!(labels, vec![OUTLIER; 5]);
}

#[test]
fn tight_groups_survive_among_scattered_points() {
    let mut embeddings = vec![axis(8, 0); 3];
    embeddings.extend(vec![axis(8, 1); 3]);
    embeddings.extend((2..6).map(|i| axis(8, i)));

    let labels = density_cluster(&embeddings, 2).unwrap();

    assert_eq!(&labels[..3], &[labels[0]; 3]);
    assert_eq!(&labels[3..6], &[labels[3]; 3]);
    assert_ne!(labels[0], labels[3]);
    assert!(labels[..6].iter().all(|l| *l != OUTLIER));
    assert!(labels[6..].iter().all(|l| *l == OUTLIER));
}

#[tokio::test(flavor = "current_thread")]
async fn blocking_work_runs_off_the_runtime_thread() {
    let caller = std::thread::current().id();
    let worker = run_blocking(|| Ok(std::thread::current().id())).await.unwrap();
    assert_ne!(worker, caller);

    let failed: Result<(), _> = run_blocking(|| Err(BackendError::EmptyCompletion)).await;
    assert!(matches!(failed, Err(BackendError::EmptyCompletion)));
}

#[test]
fn class_tfidf_prefers_cluster_specific_terms() {
    let docs: Vec<String> = ["lecture clear", "lecture clear pace", "grade slow", "grade slow unfair"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let labels = [0, 0, 1, 1];

    let all = class_tfidf(&docs, &labels, 10);
    assert_eq!(all.len(), 2);
    let first: Vec<&str> = all[&0].iter().map(|k| k.term.as_str()).collect();
    assert_eq!(first, vec!["clear", "lecture", "pace"]);
    assert!(all[&0].windows(2).all(|w| w[0].score >= w[1].score));

    let top = class_tfidf(&docs, &labels, 2);
    assert_eq!(top[&1].len(), 2);
    assert!(top[&1].iter().all(|k| k.term != "unfair"));
}

#[test]
fn class_tfidf_of_nothing_is_empty() {
    assert!(class_tfidf(&[], &[], 10).is_empty());
}

#[test]
fn model_labels_map_to_domain_labels() {
    assert_eq!(SentimentLabel::from_model_label("LABEL_0"), Some(SentimentLabel::Negative));
    assert_eq!(SentimentLabel::from_model_label("LABEL_1"), Some(SentimentLabel::Neutral));
    assert_eq!(SentimentLabel::from_model_label(" label_2 "), Some(SentimentLabel::Positive));
    assert_eq!(SentimentLabel::from_model_label("positive"), Some(SentimentLabel::Positive));
    assert_eq!(SentimentLabel::from_model_label("LABEL_7"), None);
    assert_eq!(SentimentLabel::Neutral.model_label(), "LABEL_1");
}

#[test]
fn logits_pick_the_highest_class() {
    assert_eq!(label_from_logits(&[2.1, -0.3, -1.7]), Some("LABEL_0"));
    assert_eq!(label_from_logits(&[-0.2, 0.9, 0.4]), Some("LABEL_1"));
    assert_eq!(label_from_logits(&[-2.5, 0.1, 3.2]), Some("LABEL_2"));
    assert_eq!(label_from_logits(&[0.1, 0.2]), None);
    assert_eq!(label_from_logits(&[0.1, f32::NAN, 0.3]), None);
}

#[tokio::test]
async fn offline_backend_falls_back_to_lexicon() {
    let backend = StandardBackend::offline();
    assert_eq!(backend.classify_sentiment("great helpful lecture").await.unwrap(), "LABEL_2");
    let label = sentiment::classify(&backend, "boring confusing slide").await.unwrap();
    assert_eq!(label, SentimentLabel::Negative);
}

#[test]
fn lexicon_scores_cleaned_text() {
    assert_eq!(lexicon_label("great helpful lecture"), "LABEL_2");
    assert_eq!(lexicon_label("boring confusing slide"), "LABEL_0");
    assert_eq!(lexicon_label("lecture room"), "LABEL_1");
    assert_eq!(lexicon_label("great boring"), "LABEL_1");
}

#[test]
fn hashed_embeddings_are_deterministic_and_normalized() {
    let embedder = HashedEmbedder::new(64);
    let a = embedder.embed("lecture clear pace");
    let b = embedder.embed("lecture clear pace");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    let norm: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
    assert!((cosine(&a, &b) - 1.0).abs() < 1e-5);
    assert!(embedder.embed("").iter().all(|v| *v == 0.0));
}
