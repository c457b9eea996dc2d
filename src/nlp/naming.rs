//! Short human-readable names for discovered topics.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::backend::InferenceBackend;

use super::keywords::Keyword;

const PROMPT_KEYWORDS: usize = 5;
const PROMPT_EXAMPLES: usize = 2;
const MAX_NAME_WORDS: usize = 4;

static QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["'`“”‘’]"#).expect("valid regex"));

/// Name a topic through the backend, falling back to a keyword label on any failure.
pub async fn name_topic(
    backend: &dyn InferenceBackend,
    topic_id: usize,
    keywords: &[Keyword],
    examples: &[String],
) -> String {
    if keywords.is_empty() {
        return placeholder_name(topic_id);
    }
    let prompt = naming_prompt(keywords, examples);
    match backend.generate_text(&prompt).await {
        Ok(raw) => {
            let name = sanitize_name(&raw);
            if name.is_empty() {
                debug!(topic_id, "empty generated name; using keyword label");
                fallback_name(topic_id, keywords)
            } else {
                name
            }
        }
        Err(err) => {
            warn!(topic_id, error = %err, "topic naming failed; using keyword label");
            fallback_name(topic_id, keywords)
        }
    }
}

/// Prompt built from the top keywords with their scores and a couple of examples.
pub fn naming_prompt(keywords: &[Keyword], examples: &[String]) -> String {
    let keyword_lines = keywords
        .iter()
        .take(PROMPT_KEYWORDS)
        .map(|k| format!("- {} ({:.3})", k.term, k.score))
        .collect::<Vec<_>>()
        .join("\n");
    let example_lines = examples
        .iter()
        .take(PROMPT_EXAMPLES)
        .map(|e| format!("- {}", e.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    let focus = keywords
        .iter()
        .take(2)
        .map(|k| k.term.as_str())
        .collect::<Vec<_>>()
        .join(" and ");

    format!(
        "You label clusters of student course feedback.\n\
         Keywords (with relevance):\n{keyword_lines}\n\
         Example feedback:\n{example_lines}\n\
         Write a 2-4 word topic label focused on {focus}. \
         Reply with the label only, no quotes or punctuation."
    )
}

/// Strip quotes, collapse whitespace and keep at most four words.
pub fn sanitize_name(raw: &str) -> String {
    let first_line = raw.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let unquoted = QUOTES.replace_all(first_line, "");
    unquoted
        .split_whitespace()
        .take(MAX_NAME_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-cased, hyphen-joined top two keywords, or a placeholder with fewer.
pub fn fallback_name(topic_id: usize, keywords: &[Keyword]) -> String {
    match keywords {
        [first, second, ..] => format!("{}-{}", title_case(&first.term), title_case(&second.term)),
        _ => placeholder_name(topic_id),
    }
}

pub fn placeholder_name(topic_id: usize) -> String {
    format!("Topic {}", topic_id + 1)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
