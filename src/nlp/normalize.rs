//! Deterministic text cleaning applied before every NLP stage.
//!
//! The transform lowercases, removes links, e-mail addresses, digits and
//! punctuation, then lemmatizes the remaining words and drops stop words and
//! function words. Its output is a fixed point: cleaning already-cleaned text
//! returns it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::lexicon::{FUNCTION_WORDS, IRREGULAR_LEMMAS, PLURAL_EXCEPTIONS, STOP_WORDS, VERB_STEMS};

static LINKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid regex"));
static EMAILS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").expect("valid regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const MAX_LEMMA_STEPS: usize = 8;

/// Clean and lemmatize free text into a space-separated token string.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let scrubbed = LINKS.replace_all(&lowered, "");
    let scrubbed = EMAILS.replace_all(&scrubbed, "");
    let scrubbed = DIGITS.replace_all(&scrubbed, "");
    let scrubbed = PUNCTUATION.replace_all(&scrubbed, "");
    // removing punctuation can splice a link prefix back together
    let scrubbed = LINKS.replace_all(&scrubbed, "");
    let collapsed = WHITESPACE.replace_all(&scrubbed, " ");

    collapsed
        .split_whitespace()
        .filter(|token| is_content_word(token))
        .map(lemmatize)
        .filter(|lemma| is_content_word(lemma))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean an arbitrary JSON value; anything other than a string yields `""`.
pub fn clean_value(value: &Value) -> String {
    value.as_str().map(clean_text).unwrap_or_default()
}

/// Clean an optional text field; `None` yields `""`.
pub fn clean_optional(text: Option<&str>) -> String {
    text.map(clean_text).unwrap_or_default()
}

/// Number of tokens in an already-cleaned string.
pub fn token_count(cleaned: &str) -> usize {
    cleaned.split_whitespace().count()
}

fn is_content_word(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(char::is_alphabetic)
        && !STOP_WORDS.contains(token)
        && !FUNCTION_WORDS.contains(token)
}

/// Reduce a lowercase word to its dictionary form.
///
/// Rules are applied until the word stops changing, so the result is always
/// its own lemma.
pub fn lemmatize(word: &str) -> String {
    let mut current = word.to_string();
    for _ in 0..MAX_LEMMA_STEPS {
        let next = lemma_step(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn lemma_step(word: &str) -> String {
    if let Some(lemma) = IRREGULAR_LEMMAS.get(word) {
        return (*lemma).to_string();
    }
    if !word.is_ascii() || word.len() <= 3 || PLURAL_EXCEPTIONS.contains(word) {
        return word.to_string();
    }
    if let Some(stem) = verb_stem(word) {
        return stem;
    }
    plural_stem(word).unwrap_or_else(|| word.to_string())
}

fn verb_stem(word: &str) -> Option<String> {
    let base = if let Some(base) = word.strip_suffix("ing") {
        base
    } else if let Some(base) = word.strip_suffix("ied") {
        let candidate = format!("{base}y");
        return VERB_STEMS.contains(candidate.as_str()).then_some(candidate);
    } else {
        word.strip_suffix("ed")?
    };
    if base.len() < 2 {
        return None;
    }

    let mut candidates = vec![base.to_string(), format!("{base}e")];
    let bytes = base.as_bytes();
    if bytes.len() >= 3 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        candidates.push(base[..base.len() - 1].to_string());
    }
    candidates
        .into_iter()
        .find(|candidate| VERB_STEMS.contains(candidate.as_str()))
}

fn plural_stem(word: &str) -> Option<String> {
    if let Some(base) = word.strip_suffix("ies") {
        if base.len() >= 2 {
            return Some(format!("{base}y"));
        }
    }
    if word.ends_with("sses") || word.ends_with("xes") || word.ends_with("ches") || word.ends_with("shes") {
        return Some(word[..word.len() - 2].to_string());
    }
    if word.ends_with("zzes") {
        return Some(word[..word.len() - 3].to_string());
    }
    if word.ends_with('s') && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is")) {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}
