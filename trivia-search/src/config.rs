//! Resolution configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which providers are consulted, the overall
//! deadline, per-provider timeouts, locale and request behaviour. It is
//! `serde`-enabled so it can be embedded as the `[search]` table of an
//! application config file.

use crate::error::SearchError;
use crate::types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default structured search API endpoint.
pub const DEFAULT_SEARCH_API_URL: &str = "https://www.searchapi.io/api/v1/search";
/// Default Google results endpoint.
pub const DEFAULT_GOOGLE_URL: &str = "https://www.google.com/search";
/// Default DuckDuckGo HTML-only endpoint.
pub const DEFAULT_DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com/html/";

/// Configuration for question resolution.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Bearer credential for the structured search API. `None` skips that provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Structured search API endpoint.
    pub search_api_url: String,
    /// Google results page endpoint.
    pub google_url: String,
    /// DuckDuckGo results page endpoint.
    pub duckduckgo_url: String,
    /// Enabled providers. They are always tried in fixed priority order,
    /// whatever order they are listed in here.
    pub engines: Vec<ProviderKind>,
    /// Wall-clock budget for the whole provider sequence, in milliseconds.
    pub deadline_ms: u64,
    /// Network timeout for the structured search API, in seconds.
    pub api_timeout_seconds: u64,
    /// Network timeout for each scraped engine, in seconds.
    pub scrape_timeout_seconds: u64,
    /// Country code sent as `gl`.
    pub locale_gl: String,
    /// Interface language sent as `hl`.
    pub locale_hl: String,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            search_api_url: DEFAULT_SEARCH_API_URL.to_owned(),
            google_url: DEFAULT_GOOGLE_URL.to_owned(),
            duckduckgo_url: DEFAULT_DUCKDUCKGO_URL.to_owned(),
            engines: ProviderKind::all().to_vec(),
            deadline_ms: 8_000,
            api_timeout_seconds: 15,
            scrape_timeout_seconds: 5,
            locale_gl: "us".to_owned(),
            locale_hl: "en".to_owned(),
            user_agent: None,
        }
    }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("search_api_url", &self.search_api_url)
            .field("google_url", &self.google_url)
            .field("duckduckgo_url", &self.duckduckgo_url)
            .field("engines", &self.engines)
            .field("deadline_ms", &self.deadline_ms)
            .field("api_timeout_seconds", &self.api_timeout_seconds)
            .field("scrape_timeout_seconds", &self.scrape_timeout_seconds)
            .field("locale_gl", &self.locale_gl)
            .field("locale_hl", &self.locale_hl)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SearchConfig {
    /// Overall resolution deadline.
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Network timeout for a given provider.
    pub fn provider_timeout(&self, kind: ProviderKind) -> Duration {
        match kind {
            ProviderKind::SearchApi => Duration::from_secs(self.api_timeout_seconds),
            ProviderKind::Google | ProviderKind::DuckDuckGo => {
                Duration::from_secs(self.scrape_timeout_seconds)
            }
        }
    }

    /// Network timeout actually applied to `kind`.
    ///
    /// The configured timeout is capped so that the next enabled provider
    /// still fits inside the deadline with its own timeout. When the two
    /// cannot both fit, the deadline is split evenly between them. The last
    /// provider is capped at the deadline itself.
    pub fn effective_timeout(&self, kind: ProviderKind) -> Duration {
        let deadline = self.deadline();
        let own = self.provider_timeout(kind).min(deadline);
        let next = self
            .ordered_engines()
            .into_iter()
            .skip_while(|k| *k != kind)
            .nth(1);
        match next {
            Some(next) => {
                let reserve = self.provider_timeout(next);
                let budget = match deadline.checked_sub(reserve) {
                    Some(left) if !left.is_zero() => left,
                    _ => deadline / 2,
                };
                own.min(budget)
            }
            None => own,
        }
    }

    /// The configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Enabled providers sorted into fixed priority order.
    pub fn ordered_engines(&self) -> Vec<ProviderKind> {
        let mut engines = self.engines.clone();
        engines.sort_by_key(ProviderKind::priority);
        engines
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `deadline_ms`, `api_timeout_seconds` and `scrape_timeout_seconds` must be > 0
    /// - `engines` must not be empty or contain duplicates
    /// - every endpoint must parse as an absolute URL
    ///
    /// Provider timeouts larger than the deadline are accepted; see
    /// [`SearchConfig::effective_timeout`] for how they are capped.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.deadline_ms == 0 {
            return Err(SearchError::Config("deadline_ms must be greater than 0".into()));
        }
        if self.api_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "api_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.scrape_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "scrape_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.engines.is_empty() {
            return Err(SearchError::Config(
                "at least one engine must be enabled".into(),
            ));
        }
        let mut seen = self.engines.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != self.engines.len() {
            return Err(SearchError::Config("engines must not repeat".into()));
        }
        for (name, endpoint) in [
            ("search_api_url", &self.search_api_url),
            ("google_url", &self.google_url),
            ("duckduckgo_url", &self.duckduckgo_url),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| SearchError::Config(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }
}
