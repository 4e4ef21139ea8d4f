//! Error types for the trivia assistant.

/// Top-level error type for the assistant's adapters and front-ends.
#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    /// Answer resolution setup error (invalid search config, HTTP client).
    #[error("search error: {0}")]
    Search(#[from] trivia_search::SearchError),

    /// Speech output error.
    #[error("speech error: {0}")]
    Speech(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP front-end error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TriviaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_speech() {
        let err = TriviaError::Speech("espeak not found".into());
        assert_eq!(err.to_string(), "speech error: espeak not found");
    }

    #[test]
    fn search_error_converts() {
        let err: TriviaError = trivia_search::SearchError::Config("bad".into()).into();
        assert_eq!(err.to_string(), "search error: config error: bad");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TriviaError = io.into();
        assert!(matches!(err, TriviaError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
