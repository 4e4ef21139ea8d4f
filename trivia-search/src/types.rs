//! Core types: provider identification, normalized queries, candidates and
//! resolution outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of answer providers, in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Structured search API (JSON). Only used when an API key is configured.
    #[serde(rename = "search_api")]
    SearchApi,
    /// Google results page, scraped with CSS selectors.
    #[serde(rename = "google")]
    Google,
    /// DuckDuckGo HTML-only results page, scraped with CSS selectors.
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
}

impl ProviderKind {
    /// Returns the human-readable name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchApi => "SearchApi",
            Self::Google => "Google",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }

    /// Position in the fallback chain (lower is tried first).
    pub fn priority(&self) -> u8 {
        match self {
            Self::SearchApi => 0,
            Self::Google => 1,
            Self::DuckDuckGo => 2,
        }
    }

    /// Returns all provider variants in priority order.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::SearchApi, Self::Google, Self::DuckDuckGo]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary operator understood by the arithmetic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse a single operator symbol. `x`, `×` and `÷` are accepted aliases.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Canonical ASCII symbol.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// A two-operand arithmetic question, e.g. `7 plus 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticQuery {
    pub lhs: u64,
    pub operator: Operator,
    pub rhs: u64,
}

impl fmt::Display for ArithmeticQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator.symbol(), self.rhs)
    }
}

/// Output of the query normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedQuery {
    /// Text to send to search providers.
    Search(String),
    /// Arithmetic that is evaluated locally, bypassing every provider.
    Arithmetic(ArithmeticQuery),
}

/// One raw piece of text pulled from a provider response, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Raw text as found in the response.
    pub text: String,
    /// JSON field path or CSS selector the text came from.
    pub source_field: String,
    /// Provider that produced the text.
    pub provider: ProviderKind,
}

impl Candidate {
    pub fn new(text: impl Into<String>, source_field: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            text: text.into(),
            source_field: source_field.into(),
            provider,
        }
    }
}

/// Why a provider produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Connection, TLS or body read failure.
    Transport(String),
    /// The server answered with a non-success status code.
    Status(u16),
    /// The body could not be parsed (malformed JSON, bad selector, ...).
    Parse(String),
    /// The provider's own network timeout elapsed.
    Timeout,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status(code) => write!(f, "unexpected HTTP status {code}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Timeout => f.write_str("provider timed out"),
        }
    }
}

/// Tagged result of one provider attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// A cleaned answer, plus the field/selector it was extracted from.
    Answer { text: String, source_field: String },
    /// The provider responded but nothing cleaned to an answer.
    Empty,
    /// The provider failed. Treated as "no answer" by the resolver.
    Error(ProviderErrorKind),
}

impl ProviderOutcome {
    /// Returns the answer text, if any.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answer { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Why a resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The question was empty or had no letters/digits. No provider was called.
    EmptyQuestion,
    /// Every provider was tried and none produced a usable answer.
    NoProviderAnswer,
    /// The overall deadline elapsed before any provider answered.
    Timeout,
    /// The answer could not be computed (e.g. division by zero).
    ProviderError,
}

impl FailureReason {
    /// Human-readable fallback message suitable for speaking aloud.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyQuestion => "Please ask a question.",
            Self::NoProviderAnswer => "Sorry, I couldn't find an answer to that question.",
            Self::Timeout => "Sorry, that took too long. Please try again.",
            Self::ProviderError => "Sorry, I couldn't work out an answer to that question.",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyQuestion => "empty question",
            Self::NoProviderAnswer => "no provider answer",
            Self::Timeout => "timed out",
            Self::ProviderError => "provider error",
        })
    }
}

/// The single outcome of resolving one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionResult {
    Answered { text: String },
    Failed { reason: FailureReason },
}

impl ResolutionResult {
    pub fn answered(text: impl Into<String>) -> Self {
        Self::Answered { text: text.into() }
    }

    pub fn failed(reason: FailureReason) -> Self {
        Self::Failed { reason }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered { .. })
    }

    /// Returns the answer text, if the resolution succeeded.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answered { text } => Some(text),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the failure reason, if the resolution failed.
    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Self::Answered { .. } => None,
            Self::Failed { reason } => Some(*reason),
        }
    }

    /// Text to present to a user: the answer, or the failure's fallback message.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Answered { text } => text,
            Self::Failed { reason } => reason.user_message(),
        }
    }
}
