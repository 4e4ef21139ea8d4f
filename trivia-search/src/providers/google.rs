//! Google results page scraper.
//!
//! Google embeds direct answers (featured snippets, knowledge panels,
//! calculator cards) in a handful of containers. Their class names change
//! often, so a long ordered list of selectors is probed.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::{first_answer, AnswerProvider};
use crate::types::{Candidate, ProviderErrorKind, ProviderKind, ProviderOutcome};
use async_trait::async_trait;
use url::Url;

/// Answer containers, most direct first.
pub const GOOGLE_SELECTORS: &[&str] = &[
    r#"div[data-tts="answers"]"#,
    r#"div[data-attrid*="description"]"#,
    r#"div[data-attrid*="answer"]"#,
    "span.ILfuVd",
    "div.wDYxhc",
    "div.kno-rdesc",
    "div.LGOjhe",
    "div.hgKElc",
    "div.FzvWSb",
    "div.IZ6rdc",
    "div.gsrt",
    "div.Z0LcW",
    "div.zCubwf",
    "div.XcVN5d",
    "div.PZPZlf",
    "div.iKJnec",
    "div.card-section",
];

/// Extracted text must be longer than this many characters.
const MIN_TEXT_CHARS: usize = 1;

/// Google HTML scraper.
///
/// Priority 2 provider: best coverage of direct answers, but the most
/// likely to block automated requests.
pub struct GoogleProvider {
    client: reqwest::Client,
    endpoint: String,
    gl: String,
    hl: String,
}

impl GoogleProvider {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let timeout = config.effective_timeout(ProviderKind::Google);
        Ok(Self {
            client: http::build_client(config, timeout)?,
            endpoint: config.google_url.clone(),
            gl: config.locale_gl.clone(),
            hl: config.locale_hl.clone(),
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, ProviderErrorKind> {
        Url::parse_with_params(
            &self.endpoint,
            &[("q", query), ("hl", self.hl.as_str()), ("gl", self.gl.as_str())],
        )
        .map_err(|e| ProviderErrorKind::Parse(format!("invalid Google URL: {e}")))
    }

    async fn fetch(&self, query: &str) -> Result<String, ProviderErrorKind> {
        let url = self.search_url(query)?;
        let request = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9");
        let html = http::fetch_text(request).await?;
        tracing::trace!(bytes = html.len(), "Google response received");
        Ok(html)
    }
}

#[async_trait]
impl AnswerProvider for GoogleProvider {
    async fn attempt(&self, query: &str) -> ProviderOutcome {
        tracing::trace!(query, "Google search");
        let result = match self.fetch(query).await {
            Ok(html) => google_candidates(&html),
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
        ProviderKind::Google
    }
}

/// Parse a Google results page into answer candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub fn google_candidates(html: &str) -> Result<Vec<Candidate>, ProviderErrorKind> {
    super::select_candidates(html, GOOGLE_SELECTORS, MIN_TEXT_CHARS, ProviderKind::Google)
}
