//! CDP error types.

use autoapply_protocols::PageError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Endpoint discovery over HTTP.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// An exception thrown by evaluated script.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Whether the error means a remote object id no longer resolves.
    pub fn is_stale_object(&self) -> bool {
        matches!(self, CdpError::Protocol { message, .. } if message.contains("Could not find object"))
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::JavaScript(message) => PageError::Script(message),
            e if e.is_stale_object() => PageError::Detached(e.to_string()),
            e => PageError::Backend(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_not_available_hint() {
        let err = CdpError::ChromeNotAvailable("http://localhost:9222".to_string());
        assert!(err.to_string().contains("--remote-debugging-port"));
    }

    #[test]
    fn test_page_error_mapping() {
        let script: PageError = CdpError::JavaScript("TypeError: x is null".to_string()).into();
        assert!(matches!(script, PageError::Script(_)));

        let stale: PageError = CdpError::Protocol {
            code: -32000,
            message: "Could not find object with given id".to_string(),
        }
        .into();
        assert!(matches!(stale, PageError::Detached(_)));

        let other: PageError = CdpError::SessionClosed.into();
        assert!(matches!(other, PageError::Backend(_)));
    }
}
