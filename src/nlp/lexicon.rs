//! Static English word lists backing normalization and lexicon sentiment.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// English stop words (function words with little topical content).
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
        "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
        "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
        "below", "beside", "besides", "between", "beyond", "both", "bottom", "but", "by",
        "ca", "call", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down",
        "due", "during", "each", "eight", "either", "eleven", "else", "elsewhere", "empty",
        "enough", "even", "ever", "every", "everyone", "everything", "everywhere", "except",
        "few", "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have",
        "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
        "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
        "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter",
        "latterly", "least", "less", "made", "make", "many", "may", "me", "meanwhile",
        "might", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
        "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no",
        "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
        "put", "quite", "rather", "re", "really", "regarding", "same", "say", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
        "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that", "the",
        "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
        "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
        "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until",
        "up", "upon", "us", "used", "using", "various", "very", "via", "was", "we", "well",
        "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
        "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which",
        "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
        "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Closed-class words standing in for pronoun, determiner and coordinating
/// conjunction part-of-speech tags.
pub static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // pronouns
        "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves",
        "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
        "we", "us", "our", "ours", "ourselves", "they", "them", "their", "theirs",
        "themselves", "who", "whom", "whose", "someone", "somebody", "something", "anyone",
        "anybody", "anything", "everyone", "everybody", "everything", "nobody", "nothing",
        "oneself", "u", "ur", "ya", "yall", "im", "ive", "id", "youre", "theyre", "thats",
        // determiners
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "either",
        "neither", "some", "any", "no", "another", "all", "both", "half", "such", "what",
        "which", "whatever", "whichever",
        // coordinating conjunctions
        "and", "or", "but", "nor", "yet", "so", "plus",
    ]
    .into_iter()
    .collect()
});

/// Irregular inflections mapped to their dictionary form.
pub static IRREGULAR_LEMMAS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("taught", "teach"),
        ("thought", "think"),
        ("found", "find"),
        ("felt", "feel"),
        ("understood", "understand"),
        ("wrote", "write"),
        ("written", "write"),
        ("learnt", "learn"),
        ("began", "begin"),
        ("begun", "begin"),
        ("brought", "bring"),
        ("bought", "buy"),
        ("caught", "catch"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("knew", "know"),
        ("known", "know"),
        ("lost", "lose"),
        ("met", "meet"),
        ("paid", "pay"),
        ("ran", "run"),
        ("sat", "sit"),
        ("spent", "spend"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("stood", "stand"),
        ("told", "tell"),
        ("won", "win"),
        ("built", "build"),
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("better", "good"),
        ("best", "good"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("taken", "take"),
        ("took", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("went", "go"),
        ("gone", "go"),
        ("goes", "go"),
        ("got", "get"),
        ("gotten", "get"),
        ("said", "say"),
        ("saw", "see"),
        ("seen", "see"),
        ("kept", "keep"),
        ("held", "hold"),
        ("heard", "hear"),
        ("led", "lead"),
        ("meant", "mean"),
        ("slept", "sleep"),
    ]
    .into_iter()
    .collect()
});

/// Plural-looking words that are already in dictionary form.
pub static PLURAL_EXCEPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "yes", "news", "physics", "mathematics", "economics", "lens", "bias", "canvas",
        "atlas", "gas", "chaos", "series", "species", "always", "perhaps", "whereas",
    ]
    .into_iter()
    .collect()
});

/// Verb stems recognised when stripping `-ed` and `-ing` inflections.
pub static VERB_STEMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "explain", "learn", "enjoy", "help", "expect", "want", "improve", "like", "love",
        "hate", "struggle", "understand", "teach", "organize", "organise", "structure",
        "prepare", "engage", "cover", "focus", "discuss", "present", "practice", "practise",
        "study", "work", "test", "grade", "mark", "answer", "ask", "attend", "complete",
        "submit", "review", "read", "watch", "listen", "follow", "finish", "start", "provide",
        "include", "recommend", "suggest", "appreciate", "clarify", "add", "miss", "plan",
        "design", "cancel", "rush", "challenge", "motivate", "support", "encourage", "share",
        "assign", "check", "think", "code", "program", "schedule", "record", "upload",
        "update", "increase", "reduce", "fail", "pass", "wish", "hope", "try", "apply",
        "deliver", "simplify", "explore", "connect", "relate", "communicate", "respond",
        "reply", "release", "return", "post", "meet", "teach", "feel",
    ]
    .into_iter()
    .collect()
});

/// Lemmas signalling favourable feedback.
pub static POSITIVE_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "awesome", "helpful", "clear", "engaging", "engage",
        "interesting", "enjoy", "love", "like", "fantastic", "wonderful", "useful",
        "informative", "supportive", "organized", "organised", "knowledgeable", "insightful",
        "fun", "easy", "recommend", "brilliant", "outstanding", "perfect", "appreciate",
        "nice", "valuable", "practical", "effective", "inspiring", "patient", "friendly",
        "responsive", "passionate", "enthusiastic", "thorough", "relevant", "enjoyable",
        "organize", "organise", "inspire",
    ]
    .into_iter()
    .collect()
});

/// Lemmas signalling unfavourable feedback.
pub static NEGATIVE_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "poor", "boring", "confusing", "difficult", "hard", "terrible", "awful",
        "hate", "unclear", "disorganized", "disorganised", "slow", "rush", "rushed",
        "overwhelming", "useless", "waste", "late", "unhelpful", "frustrating", "tedious",
        "dull", "outdated", "lack", "struggle", "problem", "issue", "stressful", "unfair",
        "vague", "monotonous", "dislike", "fail", "confuse", "long", "messy", "irrelevant",
        "frustrate", "overwhelm", "disorganize", "disorganise",
    ]
    .into_iter()
    .collect()
});
