//! Question input.
//!
//! [`QuestionSource`] is the input seam. [`LineQuestions`] reads typed
//! questions line by line, with the same outcomes a speech recognizer
//! reports: nothing heard within the listen window, something unintelligible,
//! or the input service failing.

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// Why no question came out of a listen attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenError {
    /// Nothing was said within the listen window.
    #[error("no speech detected")]
    NoSpeech,

    /// Input arrived but could not be understood.
    #[error("could not understand the question")]
    Unintelligible,

    /// The input service itself failed.
    #[error("input service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// A source of questions.
#[async_trait]
pub trait QuestionSource: Send {
    /// Wait for the next question. `Ok(None)` means the source is closed.
    async fn next_question(&mut self) -> Result<Option<String>, ListenError>;
}

/// Questions read one per line from any buffered reader.
pub struct LineQuestions<R> {
    lines: Lines<R>,
    listen_timeout: Duration,
}

/// Typed questions from standard input.
pub type StdinQuestions = LineQuestions<BufReader<tokio::io::Stdin>>;

impl StdinQuestions {
    pub fn stdin(listen_timeout: Duration) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), listen_timeout)
    }
}

impl<R: AsyncBufRead + Unpin> LineQuestions<R> {
    pub fn new(reader: R, listen_timeout: Duration) -> Self {
        Self {
            lines: reader.lines(),
            listen_timeout,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> QuestionSource for LineQuestions<R> {
    async fn next_question(&mut self) -> Result<Option<String>, ListenError> {
        let line = match tokio::time::timeout(self.listen_timeout, self.lines.next_line()).await {
            Err(_) => return Err(ListenError::NoSpeech),
            Ok(Err(e)) => return Err(ListenError::ServiceUnavailable(e.to_string())),
            Ok(Ok(None)) => return Ok(None),
            Ok(Ok(Some(line))) => line,
        };

        let question = line.trim();
        if question.is_empty() {
            return Err(ListenError::NoSpeech);
        }
        if !question.chars().any(char::is_alphanumeric) {
            return Err(ListenError::Unintelligible);
        }
        tracing::debug!(question, "heard question");
        Ok(Some(question.to_owned()))
    }
}
