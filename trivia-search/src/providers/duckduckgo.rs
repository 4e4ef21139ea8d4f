//! DuckDuckGo HTML scraper, the last-resort fallback.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.
//! Result snippets there are short and noisy, so extracted text must clear a
//! minimum length before it is even cleaned.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::{first_answer, AnswerProvider};
use crate::types::{Candidate, ProviderErrorKind, ProviderKind, ProviderOutcome};
use async_trait::async_trait;
use url::Url;

/// Result containers, snippet text first.
pub const DUCKDUCKGO_SELECTORS: &[&str] = &[
    "div.result__snippet",
    "a.result__snippet",
    "div.result__body",
    "div.result__title",
];

/// Extracted text must be longer than this many characters, to skip
/// fragments like bare titles and breadcrumb labels.
pub const MIN_TEXT_CHARS: usize = 15;

/// DuckDuckGo HTML search engine scraper.
///
/// Priority 3 provider: only consulted once the search API and Google
/// have both produced nothing.
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoProvider {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let timeout = config.effective_timeout(ProviderKind::DuckDuckGo);
        Ok(Self {
            client: http::build_client(config, timeout)?,
            endpoint: config.duckduckgo_url.clone(),
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, ProviderErrorKind> {
        Url::parse_with_params(&self.endpoint, &[("q", query)])
            .map_err(|e| ProviderErrorKind::Parse(format!("invalid DuckDuckGo URL: {e}")))
    }

    async fn fetch(&self, query: &str) -> Result<String, ProviderErrorKind> {
        let url = self.search_url(query)?;
        let request = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9");
        let html = http::fetch_text(request).await?;
        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");
        Ok(html)
    }
}

#[async_trait]
impl AnswerProvider for DuckDuckGoProvider {
    async fn attempt(&self, query: &str) -> ProviderOutcome {
        tracing::trace!(query, "DuckDuckGo search");
        let result = match self.fetch(query).await {
            Ok(html) => duckduckgo_candidates(&html),
            Err(err) => Err(err),
        };
        match result {
            Ok(candidates) => first_answer(candidates),
            Err(err) => {
                tracing::warn!(provider = %self.kind(), error = %err, "provider failed");
                ProviderOutcome::Error(err)
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DuckDuckGo
    }
}

/// Parse a DuckDuckGo HTML response into answer candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub fn duckduckgo_candidates(html: &str) -> Result<Vec<Candidate>, ProviderErrorKind> {
    super::select_candidates(
        html,
        DUCKDUCKGO_SELECTORS,
        MIN_TEXT_CHARS,
        ProviderKind::DuckDuckGo,
    )
}
