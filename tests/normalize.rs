use feedback_insights::nlp::normalize::{clean_text, clean_value, lemmatize};
use proptest::prelude::*;
use serde_json::{json, Value};

#[test]
fn strips_links_emails_digits_and_punctuation() {
    let cleaned =
        clean_text("Visit https://example.com or mail me@x.org! The lectures were GREAT in 2023.");
    assert_eq!(cleaned, "visit mail lecture great");
}

#[test]
fn lemmatizes_plurals_and_verb_forms() {
    assert_eq!(clean_text("Studies classes boxes quizzes"), "study class box quiz");
    assert_eq!(clean_text("explained enjoyed planned taught"), "explain enjoy plan teach");
    assert_eq!(lemmatize("boring"), "boring");
    assert_eq!(lemmatize("focus"), "focus");
}

#[test]
fn drops_stop_words_pronouns_and_conjunctions() {
    assert_eq!(clean_text("I think that they and we were all so tired"), "think tired");
}

#[test]
fn empty_and_non_string_inputs_yield_empty_output() {
    assert_eq!(clean_text(""), "");
    assert_eq!(clean_text("   !!! 123 "), "");
    assert_eq!(clean_value(&json!(42)), "");
    assert_eq!(clean_value(&Value::Null), "");
    assert_eq!(clean_value(&json!(["list"])), "");
    assert_eq!(clean_value(&json!("Helpful labs")), "helpful lab");
}

#[test]
fn punctuation_cannot_reassemble_a_link() {
    let once = clean_text("ht-tpx notes w.ww.site");
    assert_eq!(clean_text(&once), once);
    assert!(!once.contains("http"));
}

proptest! {
    #[test]
    fn cleaning_is_idempotent(text in "[ -~]{0,160}") {
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn cleaning_words_is_idempotent(words in prop::collection::vec("[A-Za-z]{1,12}(s|es|ies|ed|ing)?", 0..20)) {
        let text = words.join(" ");
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once);
    }
}
