//! Per-course natural language synopses.

use tracing::{debug, warn};

use crate::backend::InferenceBackend;

/// Below this many words the feedback is returned as-is.
pub const MIN_WORDS_TO_SUMMARIZE: usize = 30;

const FALLBACK_MAX_WORDS: usize = 60;

/// Summarize all raw feedback texts of one course.
///
/// Short input is returned verbatim without touching the backend. When the
/// backend fails the course still gets an extractive summary, so one failing
/// course never blocks the others.
pub async fn summarize(backend: &dyn InferenceBackend, course: &str, texts: &[&str]) -> String {
    let merged = texts.join(" ");
    if merged.split_whitespace().count() < MIN_WORDS_TO_SUMMARIZE {
        return merged;
    }

    let prompt = summary_prompt(course, &merged);
    match backend.generate_text(&prompt).await {
        Ok(summary) if !summary.trim().is_empty() => {
            debug!(course, "generated summary");
            summary.trim().to_string()
        }
        Ok(_) => {
            warn!(course, "empty summary; using extractive fallback");
            extractive_summary(&merged, FALLBACK_MAX_WORDS)
        }
        Err(err) => {
            warn!(course, error = %err, "summary generation failed; using extractive fallback");
            extractive_summary(&merged, FALLBACK_MAX_WORDS)
        }
    }
}

pub fn summary_prompt(course: &str, merged: &str) -> String {
    format!(
        "Summarize the following student feedback for the course \"{course}\" in one short \
         paragraph. Highlight the main strengths and weaknesses mentioned.\n\nFeedback:\n{merged}"
    )
}

/// Leading whole sentences of `text`, capped at `max_words` words.
pub fn extractive_summary(text: &str, max_words: usize) -> String {
    let mut picked: Vec<&str> = Vec::new();
    let mut words = 0;
    for sentence in split_sentences(text) {
        let count = sentence.split_whitespace().count();
        if words + count > max_words && !picked.is_empty() {
            break;
        }
        picked.push(sentence);
        words += count;
        if words >= max_words {
            break;
        }
    }
    let joined = picked.join(" ");
    if joined.split_whitespace().count() > max_words {
        joined
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        joined
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
