//! Shared HTTP client construction with User-Agent rotation.
//!
//! Each provider owns one [`reqwest::Client`] (and so one connection pool),
//! built once with that provider's network timeout.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::ProviderErrorKind;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] for one provider.
///
/// The client has:
/// - Cookie store enabled (for Google consent pages, etc.)
/// - The given network timeout
/// - Random User-Agent from the built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig, timeout: Duration) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array; choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Map a transport-level failure to the provider error taxonomy.
pub(crate) fn classify(err: &reqwest::Error) -> ProviderErrorKind {
    if err.is_timeout() {
        ProviderErrorKind::Timeout
    } else if let Some(status) = err.status() {
        ProviderErrorKind::Status(status.as_u16())
    } else {
        ProviderErrorKind::Transport(err.to_string())
    }
}

/// Send a GET request and return the body text of a successful response.
pub(crate) async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String, ProviderErrorKind> {
    let response = request.send().await.map_err(|e| classify(&e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderErrorKind::Status(status.as_u16()));
    }
    response.text().await.map_err(|e| classify(&e))
}
