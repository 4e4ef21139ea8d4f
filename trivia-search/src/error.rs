//! Error types for the trivia-search crate.
//!
//! Resolution outcomes (no answer, timeout, ...) are *not* errors: they are
//! reported through [`crate::types::ResolutionResult`]. [`SearchError`] only
//! covers setup problems and collaborator failures that callers must handle.
//! No API keys or sensitive data appear in error messages.

/// Errors raised while building or driving the resolution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP client for a provider could not be constructed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The acknowledgement side action failed.
    #[error("acknowledgement error: {0}")]
    Acknowledge(String),
}

/// Convenience type alias for trivia-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = SearchError::Config("deadline_ms must be > 0".into());
        assert_eq!(err.to_string(), "config error: deadline_ms must be > 0");
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("tls backend unavailable".into());
        assert_eq!(err.to_string(), "HTTP error: tls backend unavailable");
    }

    #[test]
    fn display_acknowledge() {
        let err = SearchError::Acknowledge("speaker offline".into());
        assert_eq!(err.to_string(), "acknowledgement error: speaker offline");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
