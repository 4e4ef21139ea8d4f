//! Trait definition for pluggable answer providers.
//!
//! Each provider (search API, Google, DuckDuckGo) implements
//! [`AnswerProvider`] so the resolver can walk the fallback chain as a plain
//! sequence of attempts, and tests can substitute doubles.

use crate::extract;
use crate::types::{Candidate, ProviderKind, ProviderOutcome};
use async_trait::async_trait;

/// A pluggable answer provider.
///
/// Implementors query one source and extract a cleaned answer. Each provider
/// handles its own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers and its own network timeout
/// - Response parsing (JSON fields or CSS selectors)
/// - Conversion of every failure into [`ProviderOutcome::Error`]
///
/// `attempt` never panics on bad input and never returns a Rust error: the
/// resolver only ever sees a tagged outcome.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Look up `query` and return the first candidate that cleans to an answer.
    async fn attempt(&self, query: &str) -> ProviderOutcome;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;
}

/// Clean candidates in order and return the first usable answer.
pub fn first_answer<I>(candidates: I) -> ProviderOutcome
where
    I: IntoIterator<Item = Candidate>,
{
    for candidate in candidates {
        if let Some(text) = extract::clean_and_select(&candidate.text) {
            tracing::debug!(
                provider = %candidate.provider,
                source = %candidate.source_field,
                "candidate cleaned to an answer"
            );
            return ProviderOutcome::Answer {
                text,
                source_field: candidate.source_field,
            };
        }
    }
    ProviderOutcome::Empty
}
