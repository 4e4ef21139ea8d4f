//! # trivia-search
//!
//! Answers spoken trivia questions with a short, speakable sentence.
//!
//! A question goes through a fixed pipeline: it is normalized, simple
//! two-operand arithmetic is evaluated locally, and everything else is sent
//! down a provider fallback chain (structured search API, then scraped Google
//! results, then scraped DuckDuckGo results). The first provider whose raw
//! text survives cleaning and sentence selection wins. The whole provider
//! sequence runs under one overall deadline.
//!
//! ## Design
//!
//! - Providers implement [`AnswerProvider`] and report a tagged
//!   [`ProviderOutcome`]; network failures never escape as panics or errors
//! - Every call yields exactly one [`ResolutionResult`]
//! - Stateless: no caching, no shared mutable state between calls
//! - An optional [`Acknowledger`] runs concurrently and never affects results
//!
//! ## Security
//!
//! - The search API key is redacted from `Debug` output and never logged
//! - Search queries are logged only at trace level

pub mod arithmetic;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod query;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::{Acknowledger, Resolver};
pub use provider::AnswerProvider;
pub use types::{
    FailureReason, NormalizedQuery, ProviderErrorKind, ProviderKind, ProviderOutcome,
    ResolutionResult,
};

/// Resolve a single question with the providers enabled in `config`.
///
/// Builds a fresh [`Resolver`] per call. Long-running callers should build
/// one [`Resolver`] and reuse it.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::Http`] if a provider's HTTP client cannot be built.
/// Failing to find an answer is not an error: it is reported as
/// [`ResolutionResult::Failed`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> trivia_search::Result<()> {
/// let config = trivia_search::SearchConfig::default();
/// let result = trivia_search::resolve("who wrote hamlet", &config).await?;
/// println!("{}", result.display_text());
/// # Ok(())
/// # }
/// ```
pub async fn resolve(question: &str, config: &SearchConfig) -> Result<ResolutionResult> {
    let resolver = Resolver::new(config)?;
    Ok(resolver.resolve(question).await)
}
