//! Profile store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile store returned no usable profile")]
    Empty,

    #[error("Profile parse error: {0}")]
    Parse(String),

    #[error("Profile store request failed: {0}")]
    Http(String),

    #[error("Profile store rejected credentials: {0}")]
    Unauthorized(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_display() {
        assert!(StoreError::Empty.to_string().contains("no usable profile"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = StoreError::from(parse_err);
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "profile.json missing");
        let err: StoreError = io_err.into();
        assert!(err.to_string().contains("profile.json missing"));
    }
}
