//! Question normalization: canonical search text or a local arithmetic query.
//!
//! Arithmetic is detected with a strict whole-string match after dropping a
//! leading request phrase ("what is", "calculate", ...) and mapping operator
//! words to symbols, so "what is 7 plus 5" is evaluated locally while
//! "what is 7 plus 5 squared" goes to search.

use crate::types::{ArithmeticQuery, NormalizedQuery, Operator};
use regex::Regex;
use std::sync::LazyLock;

/// Appended to superlative questions to favour factual pages over opinion pages.
pub const SUPERLATIVE_SUFFIX: &str = " facts confirmed";
/// Appended to interrogative questions to favour direct-answer snippets.
pub const INTERROGATIVE_SUFFIX: &str = " facts direct answer";

static LEADING_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:what\s+is|what's|calculate|solve|find|tell\s+me)\s*").expect("valid regex")
});

static ARITHMETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([-+*/x×÷])(\d+)$").expect("valid regex"));

static SUPERLATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:largest|biggest|highest|most|best)\b").expect("valid regex")
});

static INTERROGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:what|when|who|where|which|how)\b").expect("valid regex")
});

/// Operator words, longest phrases first.
const OPERATOR_WORDS: &[(&str, &str)] = &[
    ("multiplied by", "*"),
    ("divided by", "/"),
    ("plus", "+"),
    ("minus", "-"),
    ("times", "*"),
];

/// Lower-case, trim, and drop trailing question marks.
pub fn clean_question(question: &str) -> String {
    question
        .trim()
        .trim_end_matches('?')
        .trim()
        .to_lowercase()
}

/// Normalize a raw question into a search query or an arithmetic query.
pub fn normalize(question: &str) -> NormalizedQuery {
    let cleaned = clean_question(question);

    if let Some(arithmetic) = parse_arithmetic(&cleaned) {
        return NormalizedQuery::Arithmetic(arithmetic);
    }

    if SUPERLATIVE.is_match(&cleaned) {
        return NormalizedQuery::Search(format!("{cleaned}{SUPERLATIVE_SUFFIX}"));
    }
    if INTERROGATIVE.is_match(&cleaned) {
        return NormalizedQuery::Search(format!("{cleaned}{INTERROGATIVE_SUFFIX}"));
    }
    NormalizedQuery::Search(cleaned)
}

/// Parse `<digits> <op> <digits>` from an already cleaned question.
///
/// Returns `None` unless the *entire* remaining text is the expression, or if
/// an operand does not fit in `u64`.
pub fn parse_arithmetic(cleaned: &str) -> Option<ArithmeticQuery> {
    let mut expr = LEADING_REQUEST.replace(cleaned, "").into_owned();
    for (word, symbol) in OPERATOR_WORDS {
        expr = expr.replace(word, symbol);
    }
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();

    let caps = ARITHMETIC.captures(&compact)?;
    let lhs = caps[1].parse::<u64>().ok()?;
    let operator = caps[2].chars().next().and_then(Operator::from_symbol)?;
    let rhs = caps[3].parse::<u64>().ok()?;
    Some(ArithmeticQuery { lhs, operator, rhs })
}
