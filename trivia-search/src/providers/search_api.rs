//! Structured search API provider: Google results as JSON, bearer-authenticated.
//!
//! Only enabled when an API key is configured. The response is inspected in
//! order: answer box, knowledge graph, then the first organic results.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::{first_answer, AnswerProvider};
use crate::types::{Candidate, ProviderErrorKind, ProviderKind, ProviderOutcome};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

/// Fields read from the answer box, most direct first.
const ANSWER_BOX_FIELDS: &[&str] = &["answer", "snippet", "title", "result"];
/// Fields read from the knowledge graph.
const KNOWLEDGE_GRAPH_FIELDS: &[&str] = &["description", "answer", "snippet", "title"];
/// Fields read from each organic result.
const ORGANIC_FIELDS: &[&str] = &["snippet", "title"];
/// How many organic results are inspected.
const ORGANIC_LIMIT: usize = 3;

/// Search API provider.
///
/// Priority 1 provider: structured answers are far cleaner than scraped
/// markup, but it needs a paid credential.
pub struct SearchApiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    gl: String,
    hl: String,
}

impl SearchApiProvider {
    /// Create a provider using `api_key` and the endpoint/locale from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig, api_key: &str) -> Result<Self, SearchError> {
        let timeout = config.effective_timeout(ProviderKind::SearchApi);
        Ok(Self {
            client: http::build_client(config, timeout)?,
            endpoint: config.search_api_url.clone(),
            api_key: api_key.to_owned(),
            gl: config.locale_gl.clone(),
            hl: config.locale_hl.clone(),
        })
    }

    async fn fetch(&self, query: &str) -> Result<Value, ProviderErrorKind> {
        let request = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .query(&[
                ("q", query),
                ("engine", "google"),
                ("google_domain", "google.com"),
                ("gl", self.gl.as_str()),
                ("hl", self.hl.as_str()),
                ("num", "3"),
            ]);

        let body = http::fetch_text(request).await?;
        tracing::trace!(bytes = body.len(), "search API response received");
        serde_json::from_str(&body).map_err(|e| ProviderErrorKind::Parse(e.to_string()))
    }
}

#[async_trait]
impl AnswerProvider for SearchApiProvider {
    async fn attempt(&self, query: &str) -> ProviderOutcome {
        tracing::trace!(query, "search API lookup");
        match self.fetch(query).await {
            Ok(body) => first_answer(search_api_candidates(&body)),
            Err(err) => {
                tracing::warn!(provider = %self.kind(), error = %err, "provider failed");
                ProviderOutcome::Error(err)
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SearchApi
    }
}

/// Extract candidates from a search API JSON body, in inspection order.
///
/// The answer box and knowledge graph each contribute only their first
/// populated field; each of the first [`ORGANIC_LIMIT`] organic results
/// contributes every populated field.
pub fn search_api_candidates(body: &Value) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (section, fields) in [
        ("answer_box", ANSWER_BOX_FIELDS),
        ("knowledge_graph", KNOWLEDGE_GRAPH_FIELDS),
    ] {
        if let Some(candidate) = body
            .get(section)
            .and_then(|object| first_populated(object, section, fields))
        {
            candidates.push(candidate);
        }
    }

    if let Some(results) = body.get("organic_results").and_then(Value::as_array) {
        for (i, result) in results.iter().take(ORGANIC_LIMIT).enumerate() {
            for field in ORGANIC_FIELDS {
                if let Some(text) = populated_str(result, field) {
                    candidates.push(Candidate::new(
                        text,
                        format!("organic_results[{i}].{field}"),
                        ProviderKind::SearchApi,
                    ));
                }
            }
        }
    }

    candidates
}

fn first_populated(object: &Value, section: &str, fields: &[&str]) -> Option<Candidate> {
    if !object.is_object() {
        return None;
    }
    fields.iter().find_map(|field| {
        populated_str(object, field).map(|text| {
            Candidate::new(text, format!("{section}.{field}"), ProviderKind::SearchApi)
        })
    })
}

/// A non-empty string field. Non-string values never count as populated.
fn populated_str(object: &Value, field: &str) -> Option<String> {
    object
        .get(field)?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}
