//! Answer provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::AnswerProvider`].
//! [`build_providers`] turns a [`SearchConfig`] into the fallback chain.

pub mod duckduckgo;
pub mod google;
pub mod search_api;

pub use duckduckgo::DuckDuckGoProvider;
pub use google::GoogleProvider;
pub use search_api::SearchApiProvider;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::AnswerProvider;
use crate::types::{Candidate, ProviderErrorKind, ProviderKind};
use scraper::{Html, Selector};
use std::sync::Arc;

/// Build the enabled providers in fixed priority order.
///
/// The search API provider is skipped (not an error) when no API key is
/// configured.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if a provider's HTTP client cannot be built.
pub fn build_providers(config: &SearchConfig) -> Result<Vec<Arc<dyn AnswerProvider>>, SearchError> {
    let mut providers: Vec<Arc<dyn AnswerProvider>> = Vec::new();
    for kind in config.ordered_engines() {
        match kind {
            ProviderKind::SearchApi => match config.api_key() {
                Some(key) => providers.push(Arc::new(SearchApiProvider::new(config, key)?)),
                None => tracing::debug!("no search API key configured, skipping provider"),
            },
            ProviderKind::Google => providers.push(Arc::new(GoogleProvider::new(config)?)),
            ProviderKind::DuckDuckGo => providers.push(Arc::new(DuckDuckGoProvider::new(config)?)),
        }
    }
    if providers.is_empty() {
        tracing::warn!("no answer providers enabled; search questions cannot be answered");
    }
    Ok(providers)
}

/// Probe `selectors` in order and collect the text of every match.
///
/// Text is trimmed and kept only when it is longer than `min_chars`
/// characters. Candidates come out in selector order, then document order.
pub(crate) fn select_candidates(
    html: &str,
    selectors: &[&str],
    min_chars: usize,
    provider: ProviderKind,
) -> Result<Vec<Candidate>, ProviderErrorKind> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for raw in selectors {
        let selector = Selector::parse(raw)
            .map_err(|e| ProviderErrorKind::Parse(format!("invalid selector {raw}: {e:?}")))?;
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.chars().count() > min_chars {
                candidates.push(Candidate::new(text, *raw, provider));
            }
        }
    }

    tracing::debug!(%provider, count = candidates.len(), "selector candidates collected");
    Ok(candidates)
}
