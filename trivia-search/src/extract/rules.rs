//! Sentence scoring rule table.
//!
//! Every rule is an independent `(condition → score delta)` entry; a
//! sentence's score is the sum of the deltas of all rules it satisfies plus
//! the word-count adjustment from [`length_delta`].

use regex::Regex;
use std::sync::LazyLock;

/// Phrases that mark navigation/meta text. Sentences containing any of these
/// are dropped before scoring and can never be selected.
pub const META_PHRASES: &[&str] = &[
    "click here",
    "read more",
    "learn more",
    "find out",
    "subscribe",
];

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));
static MONEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*\d+(?:\.\d+)?").expect("valid regex"));
static COPULA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:is|are|was|were|has|have|had)\b").expect("valid regex")
});
static CAUSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:because|therefore|thus|hence|since|due to)\b").expect("valid regex")
});
static PROPER_NOUN_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+").expect("valid regex"));

/// A fixed-delta scoring rule.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRule {
    /// Short identifier used in trace logs.
    pub name: &'static str,
    /// Added to the score when the rule applies.
    pub delta: i32,
    applies: fn(&str) -> bool,
}

impl ScoreRule {
    /// Whether this rule applies to `sentence`.
    pub fn applies(&self, sentence: &str) -> bool {
        (self.applies)(sentence)
    }
}

fn has_digit(sentence: &str) -> bool {
    sentence.chars().any(|c| c.is_ascii_digit())
}

fn has_year(sentence: &str) -> bool {
    YEAR.is_match(sentence)
}

fn has_money(sentence: &str) -> bool {
    MONEY.is_match(sentence)
}

fn has_copula(sentence: &str) -> bool {
    COPULA.is_match(sentence)
}

fn has_causal(sentence: &str) -> bool {
    CAUSAL.is_match(sentence)
}

fn has_proper_noun_span(sentence: &str) -> bool {
    PROPER_NOUN_SPAN.is_match(sentence)
}

/// The fixed-delta rules, applied to every surviving sentence.
pub const RULES: &[ScoreRule] = &[
    ScoreRule { name: "digit", delta: 3, applies: has_digit },
    ScoreRule { name: "year", delta: 2, applies: has_year },
    ScoreRule { name: "money", delta: 2, applies: has_money },
    ScoreRule { name: "copula", delta: 2, applies: has_copula },
    ScoreRule { name: "causal", delta: 2, applies: has_causal },
    ScoreRule { name: "proper_noun", delta: 1, applies: has_proper_noun_span },
];

/// Word-count adjustment: +2 for 6..=20 words, −1 below, −(n / 20) above.
pub fn length_delta(word_count: usize) -> i32 {
    match word_count {
        0..=5 => -1,
        6..=20 => 2,
        n => -i32::try_from(n / 20).unwrap_or(i32::MAX),
    }
}

/// Whether the sentence contains a meta/navigation phrase.
pub fn is_meta(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    META_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Score one sentence with every rule in [`RULES`] plus [`length_delta`].
pub fn score_sentence(sentence: &str) -> i32 {
    let rules: i32 = RULES
        .iter()
        .filter(|rule| rule.applies(sentence))
        .map(|rule| rule.delta)
        .sum();
    rules + length_delta(sentence.split_whitespace().count())
}

/// A sentence with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence {
    pub text: String,
    pub score: i32,
}

/// Score sentences, dropping meta sentences, and return the best one.
///
/// Order: score descending, then character length ascending, then the order
/// the sentences were given in (stable sort).
pub fn select_best<'a, I>(sentences: I) -> Option<ScoredSentence>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<ScoredSentence> = sentences
        .into_iter()
        .filter(|s| !is_meta(s))
        .map(|s| ScoredSentence {
            text: s.to_owned(),
            score: score_sentence(s),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.text.chars().count().cmp(&b.text.chars().count()))
    });

    if let Some(best) = scored.first() {
        tracing::trace!(score = best.score, candidates = scored.len(), "best sentence selected");
    }
    scored.into_iter().next()
}
