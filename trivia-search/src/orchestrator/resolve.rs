//! Deadline-bound question resolution over the provider fallback chain.
//!
//! # Pipeline
//!
//! 1. Reject questions with no letters or digits (`EmptyQuestion`)
//! 2. Start the optional acknowledgement on its own task
//! 3. Normalize the question
//! 4. Arithmetic: evaluate locally, never touching a provider
//! 5. Search: try providers strictly in priority order under the overall
//!    deadline, stopping at the first cleaned answer
//!
//! Exactly one [`ResolutionResult`] comes out of every call.

use crate::arithmetic;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::AnswerProvider;
use crate::providers::build_providers;
use crate::query;
use crate::types::{FailureReason, NormalizedQuery, ProviderOutcome, ResolutionResult};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::acknowledge::{spawn_acknowledgement, Acknowledger};

/// Resolution stages, logged at debug level as a call moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalizing,
    ArithmeticPath,
    SearchPath,
    Extracting,
    Answered,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normalizing => "normalizing",
            Self::ArithmeticPath => "arithmetic",
            Self::SearchPath => "search",
            Self::Extracting => "extracting",
            Self::Answered => "answered",
            Self::Failed => "failed",
        })
    }
}

/// Resolves questions against an ordered provider chain.
///
/// Cheap to clone and safe to share: every call owns its own query and
/// candidates, and nothing is cached between calls. Identical concurrent
/// questions are resolved independently.
#[derive(Clone)]
pub struct Resolver {
    providers: Arc<[Arc<dyn AnswerProvider>]>,
    deadline: Duration,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.kind()).collect::<Vec<_>>(),
            )
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl Resolver {
    /// Build a resolver with the providers enabled in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if a provider's HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let providers = build_providers(config)?;
        Ok(Self::with_providers(providers, config.deadline()))
    }

    /// Build a resolver over an explicit provider chain, tried in the given order.
    pub fn with_providers(providers: Vec<Arc<dyn AnswerProvider>>, deadline: Duration) -> Self {
        Self {
            providers: providers.into(),
            deadline,
        }
    }

    /// The overall deadline applied to the provider sequence.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Names of the providers in the order they are tried.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.kind().name()).collect()
    }

    /// Resolve one question.
    pub async fn resolve(&self, question: &str) -> ResolutionResult {
        self.run(question, None).await
    }

    /// Resolve one question while `ack` runs concurrently.
    ///
    /// The acknowledgement is started as soon as the question is accepted
    /// and is never awaited: it cannot delay or alter the result.
    pub async fn resolve_with_ack(
        &self,
        question: &str,
        ack: Arc<dyn Acknowledger>,
    ) -> ResolutionResult {
        self.run(question, Some(ack)).await
    }

    async fn run(&self, question: &str, ack: Option<Arc<dyn Acknowledger>>) -> ResolutionResult {
        let started = Instant::now();
        let question = question.trim();
        if !question.chars().any(char::is_alphanumeric) {
            tracing::debug!(stage = %Stage::Failed, "rejected empty question");
            return ResolutionResult::failed(FailureReason::EmptyQuestion);
        }

        if let Some(ack) = ack {
            // Detached: the handle is dropped and the task runs to completion on its own.
            drop(spawn_acknowledgement(ack, question.to_owned()));
        }

        tracing::debug!(stage = %Stage::Normalizing, "resolving question");
        let result = match query::normalize(question) {
            NormalizedQuery::Arithmetic(expr) => {
                tracing::debug!(stage = %Stage::ArithmeticPath, %expr, "evaluating locally");
                match arithmetic::evaluate(&expr) {
                    Ok(value) => ResolutionResult::answered(value),
                    Err(err) => {
                        tracing::warn!(%expr, error = %err, "arithmetic evaluation failed");
                        ResolutionResult::failed(FailureReason::ProviderError)
                    }
                }
            }
            NormalizedQuery::Search(text) => {
                tracing::debug!(stage = %Stage::SearchPath, "searching providers");
                match tokio::time::timeout(self.deadline, self.search(&text)).await {
                    Ok(Some(answer)) => ResolutionResult::answered(answer),
                    Ok(None) => ResolutionResult::failed(FailureReason::NoProviderAnswer),
                    Err(_) => {
                        tracing::warn!(
                            deadline_ms = self.deadline.as_millis() as u64,
                            "deadline exceeded, abandoning in-flight provider"
                        );
                        ResolutionResult::failed(FailureReason::Timeout)
                    }
                }
            }
        };

        let stage = if result.is_answered() {
            Stage::Answered
        } else {
            Stage::Failed
        };
        tracing::debug!(
            stage = %stage,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "resolution finished"
        );
        result
    }

    /// Walk the provider chain in order, stopping at the first answer.
    async fn search(&self, query: &str) -> Option<String> {
        for provider in self.providers.iter() {
            let kind = provider.kind();
            tracing::debug!(provider = %kind, stage = %Stage::Extracting, "attempting provider");
            match provider.attempt(query).await {
                ProviderOutcome::Answer { text, source_field } => {
                    tracing::info!(provider = %kind, source = %source_field, "found answer");
                    return Some(text);
                }
                ProviderOutcome::Empty => {
                    tracing::debug!(provider = %kind, "no usable answer, falling back");
                }
                ProviderOutcome::Error(err) => {
                    tracing::debug!(provider = %kind, error = %err, "provider error, falling back");
                }
            }
        }
        tracing::info!("no provider produced an answer");
        None
    }
}
