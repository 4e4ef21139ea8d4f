//! Answer extraction: turn a noisy snippet into one short answer sentence.
//!
//! # Pipeline
//!
//! 1. Collapse whitespace runs
//! 2. Strip one known boilerplate prefix ("Featured snippet from the web", ...)
//! 3. Remove `[n]` citation markers and bare URLs
//! 4. Split into sentences on `.`, `!`, `?` boundaries
//! 5. Drop meta sentences, score the rest with [`rules::RULES`], pick the best
//! 6. Bound the length and reject text with no letters

pub mod rules;

use regex::Regex;
use std::sync::LazyLock;

/// Hard cap on answer length, in characters.
pub const MAX_ANSWER_CHARS: usize = 500;
/// When truncating, a full stop before this character index is preferred as the cut point.
pub const SENTENCE_BACKTRACK_CHARS: usize = 400;

/// Leading boilerplate removed from snippets (case-insensitive, first match only).
pub const BOILERPLATE_PREFIXES: &[&str] = &[
    "Search Results",
    "Featured snippet from the web",
    "Web results",
    "People also ask",
    "Description",
    "Overview",
    "Quick Answer",
    "Top answer:",
    "Advertisement",
    "According to",
    "Below, we've compiled",
    "Here are",
    "In this article",
];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").expect("valid regex"));
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Clean `raw` and select the single best answer sentence.
///
/// Returns `None` when nothing usable remains: empty input, only meta
/// sentences, fewer than two characters, or no alphabetic character.
pub fn clean_and_select(raw: &str) -> Option<String> {
    let cleaned = clean_text(raw);
    let sentences = split_sentences(&cleaned);

    let chosen = if sentences.is_empty() {
        cleaned.trim().to_owned()
    } else {
        rules::select_best(sentences.iter().copied())?.text
    };

    finalize(&chosen)
}

/// Steps 1-3: whitespace collapse, prefix strip, citation and URL removal.
pub fn clean_text(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw, " ");
    let stripped = strip_boilerplate_prefix(collapsed.trim());
    let no_citations = CITATION.replace_all(stripped, "");
    let no_urls = URL.replace_all(&no_citations, "");
    WHITESPACE.replace_all(no_urls.trim(), " ").into_owned()
}

/// Remove the first boilerplate prefix `text` starts with, if any.
pub fn strip_boilerplate_prefix(text: &str) -> &str {
    for prefix in BOILERPLATE_PREFIXES {
        let Some(head) = text.get(..prefix.len()) else {
            continue;
        };
        if head.eq_ignore_ascii_case(prefix) {
            return text[prefix.len()..].trim_start();
        }
    }
    text
}

/// Split on runs of `.`, `!` or `?` that end the text or are followed by
/// whitespace, so decimals like `3.5` stay intact. Fragments are trimmed and
/// empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let mut end = idx + ch.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') {
                end = next_idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_boundary = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
        if at_boundary {
            push_fragment(&mut sentences, &text[start..idx]);
            start = end;
        }
    }
    push_fragment(&mut sentences, &text[start..]);
    sentences
}

fn push_fragment<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

/// Bound the answer to [`MAX_ANSWER_CHARS`] and reject unusable text.
fn finalize(text: &str) -> Option<String> {
    let bounded = truncate_answer(text.trim());
    let bounded = bounded.trim();
    if bounded.chars().count() < 2 || !bounded.chars().any(char::is_alphabetic) {
        return None;
    }
    Some(bounded.to_owned())
}

/// Truncate to [`MAX_ANSWER_CHARS`] characters. When a cut is needed, prefer
/// ending at the last full stop within the first [`SENTENCE_BACKTRACK_CHARS`]
/// characters. A `.` only counts as a full stop when whitespace or the end
/// of the text follows it, so decimals like `3.5` are never split.
pub fn truncate_answer(text: &str) -> String {
    let Some((cut, _)) = text.char_indices().nth(MAX_ANSWER_CHARS) else {
        return text.to_owned();
    };
    let backtrack_end = text
        .char_indices()
        .nth(SENTENCE_BACKTRACK_CHARS)
        .map_or(cut, |(idx, _)| idx);

    let full_stop = text[..backtrack_end]
        .match_indices('.')
        .map(|(idx, _)| idx)
        .filter(|&idx| text[idx + 1..].chars().next().is_none_or(char::is_whitespace))
        .last();

    match full_stop {
        Some(stop) => text[..=stop].to_owned(),
        None => text[..cut].to_owned(),
    }
}
