//! The interactive question/answer loop.

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use trivia_search::{Acknowledger, ResolutionResult, Resolver};

use crate::listen::{ListenError, QuestionSource};
use crate::speech::{Speaker, SpeakerAck};

/// Spoken when a question was heard but not understood.
pub const UNINTELLIGIBLE_MESSAGE: &str = "Sorry, I didn't catch that. Please try again.";

/// The most recent question and what was said back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub result: ResolutionResult,
}

/// Listens for questions, resolves them, and speaks the answers.
pub struct TriviaSession<Q> {
    resolver: Resolver,
    source: Q,
    speaker: Arc<dyn Speaker>,
    ack: Option<Arc<dyn Acknowledger>>,
    cancel: CancellationToken,
    last: Option<Exchange>,
}

impl<Q: QuestionSource> TriviaSession<Q> {
    pub fn new(resolver: Resolver, source: Q, speaker: Arc<dyn Speaker>) -> Self {
        Self {
            resolver,
            source,
            speaker,
            ack: None,
            cancel: CancellationToken::new(),
            last: None,
        }
    }

    /// Speak "Searching for answer to: ..." through `speaker` while resolving.
    pub fn with_acknowledgement(mut self, enabled: bool) -> Self {
        self.ack = enabled
            .then(|| Arc::new(SpeakerAck::new(Arc::clone(&self.speaker))) as Arc<dyn Acknowledger>);
        self
    }

    /// Returns a token that stops the loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The last resolved question, if any.
    pub fn last_exchange(&self) -> Option<&Exchange> {
        self.last.as_ref()
    }

    /// Run until the question source closes or the session is cancelled.
    pub async fn run(&mut self) {
        tracing::info!("trivia session started");
        let cancel = self.cancel.clone();
        loop {
            let next = tokio::select! {
                () = cancel.cancelled() => break,
                next = self.source.next_question() => next,
            };

            match next {
                Ok(Some(question)) => {
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = self.handle(question) => {}
                    }
                }
                Ok(None) => {
                    tracing::info!("question source closed");
                    break;
                }
                Err(ListenError::NoSpeech) => {
                    tracing::debug!("no speech detected, listening again");
                }
                Err(ListenError::Unintelligible) => {
                    tracing::debug!("unintelligible input");
                    self.say(UNINTELLIGIBLE_MESSAGE).await;
                }
                Err(ListenError::ServiceUnavailable(e)) => {
                    tracing::error!("question input unavailable: {e}");
                    break;
                }
            }
        }
        tracing::info!("trivia session stopped");
    }

    /// Resolve one question and speak the outcome.
    pub async fn handle(&mut self, question: String) {
        let started = Instant::now();
        let result = match &self.ack {
            Some(ack) => {
                self.resolver
                    .resolve_with_ack(&question, Arc::clone(ack))
                    .await
            }
            None => self.resolver.resolve(&question).await,
        };

        self.say(result.display_text()).await;
        tracing::info!(
            answered = result.is_answered(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "question handled"
        );
        self.last = Some(Exchange { question, result });
    }

    async fn say(&self, text: &str) {
        if let Err(e) = self.speaker.speak(text).await {
            tracing::warn!("failed to speak: {e}");
        }
    }
}
