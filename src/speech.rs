//! Spoken output.
//!
//! [`Speaker`] is the output seam: [`CommandSpeaker`] drives a system
//! text-to-speech program, [`LogSpeaker`] just prints. [`SpeakerAck`] adapts
//! any speaker into the resolver's acknowledgement hook.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::task::JoinHandle;
use trivia_search::{Acknowledger, SearchError};

use crate::config::SpeechSettings;
use crate::error::{Result, TriviaError};

/// Prefix of the acknowledgement spoken while an answer is being looked up.
pub const ACK_PREFIX: &str = "Searching for answer to:";

/// Something that can say a line of text.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Say `text`, returning once it has been spoken.
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Say `text` on a background task without waiting. Failures are logged.
pub fn speak_detached(speaker: Arc<dyn Speaker>, text: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = speaker.speak(&text).await {
            tracing::warn!("background speech failed: {e}");
        }
    })
}

/// Build the speaker described by `settings`.
pub fn from_settings(settings: &SpeechSettings) -> Arc<dyn Speaker> {
    if settings.enabled {
        Arc::new(CommandSpeaker::new(
            settings.resolved_command(),
            settings.args.clone(),
        ))
    } else {
        Arc::new(LogSpeaker)
    }
}

/// Speaks through an external TTS program, e.g. `say` or `espeak`.
///
/// The text is passed as the final argument; no shell is involved.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| TriviaError::Speech(format!("failed to run {}: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(TriviaError::Speech(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

/// Prints utterances instead of speaking them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeaker;

#[async_trait]
impl Speaker for LogSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        tracing::info!(utterance = text, "speak");
        println!("{text}");
        Ok(())
    }
}

/// Speaks "Searching for answer to: <question>" as the resolver's acknowledgement.
pub struct SpeakerAck {
    speaker: Arc<dyn Speaker>,
}

impl SpeakerAck {
    pub fn new(speaker: Arc<dyn Speaker>) -> Self {
        Self { speaker }
    }

    pub fn phrase(question: &str) -> String {
        format!("{ACK_PREFIX} {question}")
    }
}

#[async_trait]
impl Acknowledger for SpeakerAck {
    async fn acknowledge(&self, question: &str) -> std::result::Result<(), SearchError> {
        self.speaker
            .speak(&Self::phrase(question))
            .await
            .map_err(|e| SearchError::Acknowledge(e.to_string()))
    }
}
