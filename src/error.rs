//! Error types for Catsearch
//!
//! Search failures are surfaced to the session as a single message; the
//! variant only decides the wording.

use thiserror::Error;

/// Failure of a single search request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{}", http_message(*status, message.as_deref()))]
    Http { status: u16, message: Option<String> },

    #[error("Malformed search response: {0}")]
    Parse(String),
}

fn http_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.trim().is_empty() => msg.to_string(),
        _ => format!("HTTP error! status: {}", status),
    }
}

impl SearchError {
    /// Text shown in the error banner
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status code, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Parse(err.to_string())
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum CatsearchError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("GUI error: {0}")]
    Gui(String),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}

/// Result type alias for Catsearch operations
pub type Result<T> = std::result::Result<T, CatsearchError>;

impl From<toml::de::Error> for CatsearchError {
    fn from(err: toml::de::Error) -> Self {
        CatsearchError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_server_message() {
        let err = SearchError::Http {
            status: 500,
            message: Some("index unavailable".to_string()),
        };
        assert_eq!(err.message(), "index unavailable");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn http_error_falls_back_to_status() {
        let err = SearchError::Http { status: 502, message: None };
        assert_eq!(err.message(), "HTTP error! status: 502");

        let blank = SearchError::Http { status: 404, message: Some("  ".to_string()) };
        assert_eq!(blank.message(), "HTTP error! status: 404");
    }

    #[test]
    fn network_and_parse_have_no_status() {
        assert_eq!(SearchError::Network("refused".into()).status(), None);
        assert!(SearchError::Parse("eof".into()).message().contains("eof"));
    }
}
