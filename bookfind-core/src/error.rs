/// Structured error types for bookfind-core library.
///
/// Uses `thiserror` for better API surface and error composition.
/// Binary crates (bookfind-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.
use thiserror::Error;

/// Main error type for bookfind-core operations
#[derive(Error, Debug)]
pub enum BookError {
    /// A search fetch failed: transport error, non-success HTTP status,
    /// or an undecodable response body. All three collapse into one
    /// kind; the state machine only ever stores the message.
    #[error("search request failed: {reason}")]
    Fetch { reason: String },

    /// Client construction or setup failed (e.g. invalid base URL)
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for bookfind-core operations
pub type Result<T> = std::result::Result<T, BookError>;

impl BookError {
    /// Create a fetch error
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookError::fetch("connection refused");
        assert_eq!(
            err.to_string(),
            "search request failed: connection refused"
        );

        let err = BookError::config("invalid base URL");
        assert!(err.to_string().contains("configuration error"));
    }
}
