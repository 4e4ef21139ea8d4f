//! Trivia: ask a question, hear a short answer.
//!
//! The answer pipeline lives in the `trivia-search` crate. This crate wires
//! it to the outside world:
//!
//! - **Input**: typed questions, one per line ([`listen`])
//! - **Output**: a system text-to-speech command or plain stdout ([`speech`])
//! - **Loop**: listen, acknowledge, resolve, speak ([`session`])
//! - **HTTP**: `POST /ask` and status endpoints ([`server`])
//! - **Config**: one TOML file plus environment overrides ([`config`])

pub mod config;
pub mod error;
pub mod listen;
pub mod server;
pub mod session;
pub mod speech;

pub use config::TriviaConfig;
pub use error::{Result, TriviaError};
pub use session::TriviaSession;
pub use trivia_search::{FailureReason, ResolutionResult, Resolver};
